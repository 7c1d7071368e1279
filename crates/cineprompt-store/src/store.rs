//! The [`LocalStore`] service object.
//!
//! `LocalStore` is the only owner of the ledgers.  It keeps every ledger in
//! memory and writes through to an optional [`Database`].  Compound mutations
//! build the new ledger values first, commit them as one [`Batch`], and only
//! then swap them into memory.
//!
//! A failing backend never fails an operation: the error is logged, the
//! backend is dropped, and the store keeps serving from memory for the rest
//! of the session.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use cineprompt_shared::constants::{
    self, KEY_GLOBAL_VOTES, KEY_LOGGED_IN_USER, KEY_PUBLISHED_IMAGES, KEY_SOCIAL_DATA, KEY_USERS,
    PREFIX_FAVORITES, PREFIX_IMAGE_HISTORY, PREFIX_PROMPT_HISTORY,
};
use cineprompt_shared::types::normalize_email;

use crate::database::Database;
use crate::error::StoreError;
use crate::kv::KvWrite;
use crate::models::{
    GlobalVotes, ImageHistoryItem, PromptHistoryItem, PublishedImage, SocialData, User,
};

// ---------------------------------------------------------------------------
// Clock & limits
// ---------------------------------------------------------------------------

/// Source of "today" for the daily credit reset.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Calendar date in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Allowances and list caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub daily_credits: u32,
    pub max_prompt_history: usize,
    pub max_image_history: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            daily_credits: constants::DAILY_CREDITS,
            max_prompt_history: constants::MAX_PROMPT_HISTORY_ITEMS,
            max_image_history: constants::MAX_IMAGE_HISTORY_ITEMS,
        }
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Writes staged by one operation.  Committed together or not at all.
#[derive(Default)]
pub(crate) struct Batch {
    writes: Vec<KvWrite>,
    error: Option<StoreError>,
}

impl Batch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put<T: Serialize + ?Sized>(mut self, key: impl Into<String>, value: &T) -> Self {
        match KvWrite::put(key, value) {
            Ok(write) => self.writes.push(write),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    pub(crate) fn remove(mut self, key: impl Into<String>) -> Self {
        self.writes.push(KvWrite::remove(key));
        self
    }

    fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.error.is_none()
    }
}

// ---------------------------------------------------------------------------
// LocalStore
// ---------------------------------------------------------------------------

/// Single authority over users, history, gallery, votes and the social graph.
pub struct LocalStore {
    backend: Option<Database>,
    clock: Box<dyn Clock>,
    pub(crate) limits: Limits,

    pub(crate) users: Vec<User>,
    pub(crate) published: Vec<PublishedImage>,
    pub(crate) votes: GlobalVotes,
    pub(crate) social: SocialData,
    /// Per-user ledgers, keyed by the owner's email as stored on the account.
    pub(crate) prompt_histories: BTreeMap<String, Vec<PromptHistoryItem>>,
    pub(crate) image_histories: BTreeMap<String, Vec<ImageHistoryItem>>,
    pub(crate) favorites: BTreeMap<String, Vec<String>>,

    /// Snapshot of the active user, without password.
    pub(crate) session: Option<User>,
}

impl LocalStore {
    /// Load every ledger from `db` using the system clock and default limits.
    pub fn open(db: Database) -> Self {
        Self::new(Some(db), SystemClock, Limits::default())
    }

    /// A store with no persistence at all.
    pub fn detached() -> Self {
        Self::new(None, SystemClock, Limits::default())
    }

    /// Full constructor.  Loads all ledgers and restores a persisted session.
    pub fn new(backend: Option<Database>, clock: impl Clock + 'static, limits: Limits) -> Self {
        let mut store = Self {
            backend: None,
            clock: Box::new(clock),
            limits,
            users: Vec::new(),
            published: Vec::new(),
            votes: GlobalVotes::default(),
            social: SocialData::default(),
            prompt_histories: BTreeMap::new(),
            image_histories: BTreeMap::new(),
            favorites: BTreeMap::new(),
            session: None,
        };

        let mut snapshot = None;
        if let Some(db) = backend {
            store.users = load_ledger(&db, KEY_USERS);
            store.published = load_ledger(&db, KEY_PUBLISHED_IMAGES);
            store.votes = load_ledger(&db, KEY_GLOBAL_VOTES);
            store.social = load_ledger(&db, KEY_SOCIAL_DATA);
            store.prompt_histories = load_per_user(&db, PREFIX_PROMPT_HISTORY);
            store.image_histories = load_per_user(&db, PREFIX_IMAGE_HISTORY);
            store.favorites = load_per_user(&db, PREFIX_FAVORITES);
            snapshot = load_ledger::<Option<User>>(&db, KEY_LOGGED_IN_USER);

            tracing::info!(
                users = store.users.len(),
                published = store.published.len(),
                "ledgers loaded"
            );
            store.backend = Some(db);
        }

        if let Some(user) = snapshot {
            store.restore_session(user);
        }
        store
    }

    /// Whether writes still reach the database.
    pub fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    #[cfg(test)]
    pub(crate) fn backend_for_tests(&self) -> &Database {
        self.backend.as_ref().expect("store has no backend")
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Email of the active user.
    pub(crate) fn session_email(&self) -> Option<&str> {
        self.session.as_ref().map(|u| u.email.as_str())
    }

    /// Active user's email, or a debug trace naming the skipped operation.
    pub(crate) fn acting_email(&self, op: &'static str) -> Option<String> {
        let email = self.session_email().map(str::to_string);
        if email.is_none() {
            tracing::debug!(op, "no active session, ignoring");
        }
        email
    }

    pub(crate) fn user_index(&self, email: &str) -> Option<usize> {
        let wanted = normalize_email(email);
        self.users
            .iter()
            .position(|u| normalize_email(&u.email) == wanted)
    }

    /// Persist a batch.  On failure the backend is dropped for the rest of
    /// the session and the caller carries on in memory.
    pub(crate) fn commit(&mut self, batch: Batch) {
        if batch.is_empty() {
            return;
        }
        let Some(db) = self.backend.as_mut() else {
            return;
        };

        let result = match batch.error {
            Some(e) => Err(e),
            None => db.write_batch(&batch.writes),
        };

        if let Err(e) = result {
            let keys: Vec<&str> = batch.writes.iter().map(KvWrite::key).collect();
            tracing::warn!(
                error = %e,
                ?keys,
                "storage unavailable, continuing in memory for this session"
            );
            self.backend = None;
        }
    }

    /// Apply `update` to the active user's snapshot and account record and
    /// persist both.
    pub(crate) fn update_current_user(&mut self, update: impl FnOnce(&mut User)) -> Option<User> {
        let mut snapshot = self.session.clone()?;
        update(&mut snapshot);

        let mut users = self.users.clone();
        if let Some(idx) = self.user_index(&snapshot.email) {
            let password = users[idx].password.take();
            users[idx] = User {
                password,
                ..snapshot.clone()
            };
        }

        self.commit(
            Batch::new()
                .put(KEY_USERS, &users)
                .put(KEY_LOGGED_IN_USER, &snapshot),
        );
        self.users = users;
        self.session = Some(snapshot.clone());
        Some(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a ledger, treating a missing or unreadable document as empty.
fn load_ledger<T: DeserializeOwned + Default>(db: &Database, key: &str) -> T {
    match db.get_json(key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to load ledger, starting empty");
            T::default()
        }
    }
}

/// Read every `<prefix><email>` ledger into a map keyed by email.
fn load_per_user<T: DeserializeOwned + Default>(
    db: &Database,
    prefix: &str,
) -> BTreeMap<String, T> {
    let keys = match db.keys_with_prefix(prefix) {
        Ok(keys) => keys,
        Err(e) => {
            tracing::warn!(prefix, error = %e, "failed to list per-user ledgers");
            return BTreeMap::new();
        }
    };

    keys.into_iter()
        .filter_map(|key| {
            let email = key.strip_prefix(prefix)?.to_string();
            Some((email, load_ledger(db, &key)))
        })
        .collect()
}

//! Domain records persisted in the local ledgers.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names, which is the on-disk JSON shape of each ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cineprompt_shared::curated::{CURATED_CREATOR_EMAIL, CURATED_CREATOR_NICKNAME};
use cineprompt_shared::types::new_item_id;
use cineprompt_shared::{CuratedImage, PromptFields, VoteKind};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A local account.  The email is the identity (compared case-insensitively).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    /// Opaque secret compared by equality.  Absent from session snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub prompt_credits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_prompt_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_subscribed: bool,
}

impl User {
    /// Copy of this record with the password removed.
    pub fn without_password(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }

    /// Subscribed users are never limited; everyone else needs a credit left.
    pub fn has_credits(&self) -> bool {
        self.is_subscribed || self.prompt_credits > 0
    }

    /// Reset the daily allowance if the last prompt date is not `today`.
    /// Returns `true` when a reset happened.
    pub(crate) fn refresh_daily_credits(&mut self, today: NaiveDate, allowance: u32) -> bool {
        if self.last_prompt_date == Some(today) {
            return false;
        }
        self.prompt_credits = allowance;
        self.last_prompt_date = Some(today);
        true
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// A generated image (or video) kept in the creator's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageHistoryItem {
    pub id: String,
    /// Data URI or remote URL.
    pub image_url: String,
    pub prompt: String,
}

impl ImageHistoryItem {
    pub fn new(image_url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: new_item_id(),
            image_url: image_url.into(),
            prompt: prompt.into(),
        }
    }
}

/// A generated prompt together with the selector values that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptHistoryItem {
    pub id: String,
    pub prompt: String,
    #[serde(flatten)]
    pub fields: PromptFields,
}

impl PromptHistoryItem {
    pub fn new(prompt: impl Into<String>, fields: PromptFields) -> Self {
        Self {
            id: new_item_id(),
            prompt: prompt.into(),
            fields,
        }
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// An image shared to the community gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublishedImage {
    #[serde(flatten)]
    pub image: ImageHistoryItem,
    pub creator_email: String,
    pub creator_nickname: String,
}

impl PublishedImage {
    pub fn id(&self) -> &str {
        &self.image.id
    }
}

impl From<&CuratedImage> for PublishedImage {
    fn from(item: &CuratedImage) -> Self {
        Self {
            image: ImageHistoryItem {
                id: item.id.to_string(),
                image_url: item.image_url.to_string(),
                prompt: item.prompt.to_string(),
            },
            creator_email: CURATED_CREATOR_EMAIL.to_string(),
            creator_nickname: CURATED_CREATOR_NICKNAME.to_string(),
        }
    }
}

/// Ordering of the community feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedOrder {
    /// Most recently published first.
    #[default]
    Latest,
    /// Most likes first; ties keep publication order.
    MostLiked,
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

/// Aggregate reactions for one image.  Both counters saturate at zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteTally {
    pub likes: u32,
    pub dislikes: u32,
}

impl VoteTally {
    pub(crate) fn cast(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Like => self.likes = self.likes.saturating_add(1),
            VoteKind::Dislike => self.dislikes = self.dislikes.saturating_add(1),
        }
    }

    pub(crate) fn retract(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Like => self.likes = self.likes.saturating_sub(1),
            VoteKind::Dislike => self.dislikes = self.dislikes.saturating_sub(1),
        }
    }
}

/// The `global_votes` ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalVotes {
    /// image id -> tally
    #[serde(default)]
    pub vote_data: BTreeMap<String, VoteTally>,
    /// user email -> image id -> vote
    #[serde(default)]
    pub user_votes: BTreeMap<String, BTreeMap<String, VoteKind>>,
}

// ---------------------------------------------------------------------------
// Social graph
// ---------------------------------------------------------------------------

/// Outgoing edges of one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialEdges {
    #[serde(default)]
    pub following: Vec<String>,
    #[serde(default)]
    pub blocked: Vec<String>,
}

/// The `social_data` ledger: user email -> edges.
pub type SocialData = BTreeMap<String, SocialEdges>;

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Figures shown on a user's own profile page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalytics {
    pub last_login: Option<NaiveDate>,
    pub creations: usize,
    pub likes_received: u32,
    pub dislikes_received: u32,
    pub likes_given: usize,
    pub dislikes_given: usize,
    pub followers: usize,
    pub following: usize,
}

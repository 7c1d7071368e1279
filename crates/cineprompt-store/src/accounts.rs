//! Sign-up, login, sessions and prompt credits.

use cineprompt_shared::constants::{KEY_LOGGED_IN_USER, KEY_USERS};
use cineprompt_shared::types::normalize_email;
use tracing::info;

use crate::error::AuthError;
use crate::models::{NewUser, User};
use crate::store::{Batch, LocalStore};

impl LocalStore {
    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    /// Register a new account with a full daily allowance.
    ///
    /// Fails with [`AuthError::EmailExists`] when the email is already taken,
    /// ignoring case.  Does not log the new user in.
    pub fn sign_up(&mut self, new_user: NewUser) -> Result<(), AuthError> {
        if self.user_index(&new_user.email).is_some() {
            return Err(AuthError::EmailExists);
        }

        let user = User {
            email: new_user.email.trim().to_string(),
            password: Some(new_user.password),
            nickname: new_user.nickname,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            prompt_credits: self.limits.daily_credits,
            last_prompt_date: Some(self.today()),
            last_login_date: None,
            is_subscribed: false,
        };
        info!(email = %user.email, "account created");

        let mut users = self.users.clone();
        users.push(user);
        self.commit(Batch::new().put(KEY_USERS, &users));
        self.users = users;
        Ok(())
    }

    /// Authenticate and make the account the active session.
    ///
    /// Resets the daily credits when the last prompt date is not today and
    /// stamps today's login date.  The returned snapshot carries no password.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let idx = self
            .user_index(email)
            .filter(|&i| self.users[i].password.as_deref() == Some(password))
            .ok_or(AuthError::InvalidCredentials)?;

        let today = self.today();
        let mut users = self.users.clone();
        let record = &mut users[idx];
        if record.refresh_daily_credits(today, self.limits.daily_credits) {
            info!(email = %record.email, credits = record.prompt_credits, "daily credits reset");
        }
        record.last_login_date = Some(today);
        let snapshot = record.without_password();

        self.commit(
            Batch::new()
                .put(KEY_USERS, &users)
                .put(KEY_LOGGED_IN_USER, &snapshot),
        );
        self.users = users;
        self.session = Some(snapshot.clone());

        info!(email = %snapshot.email, "logged in");
        Ok(snapshot)
    }

    /// End the session.  Global ledgers are untouched.
    pub fn logout(&mut self) {
        let Some(user) = self.session.take() else {
            return;
        };
        self.commit(Batch::new().remove(KEY_LOGGED_IN_USER));
        info!(email = %user.email, "logged out");
    }

    /// Re-establish a session persisted by a previous run.
    pub(crate) fn restore_session(&mut self, snapshot: User) {
        let today = self.today();
        let allowance = self.limits.daily_credits;
        self.session = Some(snapshot);
        if let Some(user) = self.update_current_user(|user| {
            user.password = None;
            user.refresh_daily_credits(today, allowance);
            user.last_login_date = Some(today);
        }) {
            info!(email = %user.email, "session restored");
        }
    }

    // ------------------------------------------------------------------
    // Credits & subscription
    // ------------------------------------------------------------------

    /// Spend one prompt credit.  Subscribers are exempt and the balance never
    /// goes below zero.
    pub fn consume_credit(&mut self) {
        let Some(user) = self.session.as_ref() else {
            tracing::debug!(op = "consume_credit", "no active session, ignoring");
            return;
        };
        if user.is_subscribed || user.prompt_credits == 0 {
            return;
        }
        if let Some(user) = self.update_current_user(|u| u.prompt_credits -= 1) {
            tracing::debug!(email = %user.email, remaining = user.prompt_credits, "credit consumed");
        }
    }

    /// Mark the active user as subscribed.
    pub fn subscribe(&mut self) {
        if let Some(user) = self.update_current_user(|u| u.is_subscribed = true) {
            info!(email = %user.email, "subscription activated");
        }
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// The active user, if any (no password).
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }

    /// Whether the active user may generate another prompt.
    pub fn has_credits(&self) -> bool {
        self.session.as_ref().is_some_and(User::has_credits)
    }

    /// Every account, without passwords.
    pub fn users(&self) -> Vec<User> {
        self.users.iter().map(User::without_password).collect()
    }

    /// Look an account up by email, ignoring case.
    pub fn find_user(&self, email: &str) -> Option<User> {
        let wanted = normalize_email(email);
        self.users
            .iter()
            .find(|u| normalize_email(&u.email) == wanted)
            .map(User::without_password)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AuthError;
    use crate::store::{FixedClock, Limits, LocalStore};
    use crate::test_support::{act_as, day, email, new_user, store_on};
    use crate::Database;

    #[test]
    fn sign_up_grants_daily_allowance() {
        let mut store = store_on(17);
        store.sign_up(new_user("ana")).unwrap();

        let ana = store.find_user(&email("ana")).unwrap();
        assert_eq!(ana.prompt_credits, 2);
        assert_eq!(ana.last_prompt_date, Some(day(17)));
        assert!(!ana.is_subscribed);
        assert!(ana.password.is_none());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn sign_up_rejects_duplicate_email_ignoring_case() {
        let mut store = store_on(17);
        store.sign_up(new_user("ana")).unwrap();

        let mut dup = new_user("ana");
        dup.email = "ANA@Example.com".into();
        assert_eq!(store.sign_up(dup), Err(AuthError::EmailExists));
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn login_checks_password_exactly() {
        let mut store = store_on(17);
        store.sign_up(new_user("ana")).unwrap();

        assert_eq!(
            store.login(&email("ana"), "ANA-PW"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            store.login("nobody@example.com", "ana-pw"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(store.current_user().is_none());

        let user = store.login("Ana@Example.com", "ana-pw").unwrap();
        assert_eq!(user.email, email("ana"));
        assert_eq!(user.last_login_date, Some(day(17)));
        assert!(user.password.is_none());
    }

    #[test]
    fn credits_are_spent_and_never_negative() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");

        store.consume_credit();
        store.consume_credit();
        assert_eq!(store.current_user().unwrap().prompt_credits, 0);
        assert!(!store.has_credits());

        store.consume_credit();
        assert_eq!(store.current_user().unwrap().prompt_credits, 0);
    }

    #[test]
    fn relogin_same_day_keeps_spent_credits() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.consume_credit();
        store.logout();

        let user = store.login(&email("ana"), "ana-pw").unwrap();
        assert_eq!(user.prompt_credits, 1);
    }

    #[test]
    fn login_on_a_new_day_resets_credits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let open = |d: u32| {
            LocalStore::new(
                Some(Database::open_at(&path).unwrap()),
                FixedClock(day(d)),
                Limits::default(),
            )
        };

        {
            let mut store = open(17);
            act_as(&mut store, "ana");
            store.consume_credit();
            store.consume_credit();
            store.logout();
        }

        let mut store = open(18);
        let user = store.login(&email("ana"), "ana-pw").unwrap();
        assert_eq!(user.prompt_credits, 2);
        assert_eq!(user.last_prompt_date, Some(day(18)));
    }

    #[test]
    fn persisted_session_is_restored_with_fresh_credits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let mut store = LocalStore::new(
                Some(Database::open_at(&path).unwrap()),
                FixedClock(day(17)),
                Limits::default(),
            );
            act_as(&mut store, "ana");
            store.consume_credit();
            store.consume_credit();
        }

        let store = LocalStore::new(
            Some(Database::open_at(&path).unwrap()),
            FixedClock(day(18)),
            Limits::default(),
        );
        let user = store.current_user().unwrap();
        assert_eq!(user.email, email("ana"));
        assert_eq!(user.prompt_credits, 2);
        assert_eq!(user.last_login_date, Some(day(18)));
        assert_eq!(store.find_user(&email("ana")).unwrap().prompt_credits, 2);
    }

    #[test]
    fn subscribers_do_not_consume_credits() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.subscribe();

        for _ in 0..5 {
            store.consume_credit();
        }
        let user = store.current_user().unwrap();
        assert!(user.is_subscribed);
        assert_eq!(user.prompt_credits, 2);
        assert!(store.has_credits());
        assert!(store.find_user(&email("ana")).unwrap().is_subscribed);
    }

    #[test]
    fn logout_clears_session_only() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.logout();

        assert!(store.current_user().is_none());
        assert!(store.image_history().is_empty());
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn password_stays_on_account_after_session_updates() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.subscribe();
        store.logout();

        assert!(store.login(&email("ana"), "ana-pw").is_ok());
    }
}

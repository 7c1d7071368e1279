//! Fixtures shared by the unit tests.

use chrono::NaiveDate;

use crate::database::Database;
use crate::models::NewUser;
use crate::store::{FixedClock, Limits, LocalStore};

pub(crate) fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

pub(crate) fn new_user(name: &str) -> NewUser {
    NewUser {
        email: format!("{name}@example.com"),
        password: format!("{name}-pw"),
        nickname: name.to_string(),
        first_name: name.to_uppercase(),
        last_name: "Tester".to_string(),
    }
}

/// In-memory SQLite store pinned to 2026-10-`d`.
pub(crate) fn store_on(d: u32) -> LocalStore {
    LocalStore::new(
        Some(Database::open_in_memory().unwrap()),
        FixedClock(day(d)),
        Limits::default(),
    )
}

/// Sign `name` up (if needed) and make them the active user.
pub(crate) fn act_as(store: &mut LocalStore, name: &str) {
    let user = new_user(name);
    let _ = store.sign_up(user.clone());
    store.login(&user.email, &user.password).unwrap();
}

pub(crate) fn email(name: &str) -> String {
    format!("{name}@example.com")
}

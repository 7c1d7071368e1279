//! # cineprompt-store
//!
//! Local data store for CinePrompt.  Users, prompt and image history, the
//! community gallery, votes, favorites and the follow/block graph are kept as
//! JSON ledgers in a single SQLite key-value table.
//!
//! [`LocalStore`] is the service object callers work with: it owns every
//! ledger in memory, enforces their invariants and writes each mutation
//! through to the [`Database`] in one transaction.

pub mod database;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod store;

mod accounts;
mod analytics;
mod error;
mod gallery;
mod history;
mod social;
mod votes;

#[cfg(test)]
mod test_support;

pub use database::Database;
pub use error::{AuthError, StoreError};
pub use kv::KvWrite;
pub use models::*;
pub use store::{Clock, FixedClock, Limits, LocalStore, SystemClock};

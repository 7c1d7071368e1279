//! # cineprompt-shared
//!
//! Vocabulary shared by the store and client crates: limits and storage keys,
//! vote kinds and item ids, the cinematic prompt template, the selector
//! option lists and the built-in examples and curated gallery.

pub mod constants;
pub mod curated;
pub mod error;
pub mod prompt;
pub mod types;
pub mod vocabulary;

pub use curated::{CuratedImage, Example};
pub use error::PromptError;
pub use prompt::PromptFields;
pub use types::VoteKind;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's reaction to a published image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Like,
    Dislike,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate an opaque, time-derived id for a history entry.
///
/// The millisecond timestamp keeps ids roughly ordered by creation; the random
/// suffix keeps two entries created in the same millisecond apart.
pub fn new_item_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{millis}-{}", &suffix[..8])
}

/// Normalise an email for identity comparisons.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

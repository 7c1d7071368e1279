/// Application name
pub const APP_NAME: &str = "CinePrompt Studio";

/// Free-tier prompt generations granted per calendar day
pub const DAILY_CREDITS: u32 = 2;

/// Maximum prompt history entries kept per user
pub const MAX_PROMPT_HISTORY_ITEMS: usize = 15;

/// Maximum image history entries kept per user
pub const MAX_IMAGE_HISTORY_ITEMS: usize = 8;

/// Storage keys for the global ledgers
pub const KEY_USERS: &str = "users";
pub const KEY_LOGGED_IN_USER: &str = "loggedInUser";
pub const KEY_PUBLISHED_IMAGES: &str = "published_images";
pub const KEY_GLOBAL_VOTES: &str = "global_votes";
pub const KEY_SOCIAL_DATA: &str = "social_data";

/// Prefixes for the per-user ledgers, followed by the user's email
pub const PREFIX_PROMPT_HISTORY: &str = "history_";
pub const PREFIX_IMAGE_HISTORY: &str = "image_history_";
pub const PREFIX_FAVORITES: &str = "favorites_";

pub fn prompt_history_key(email: &str) -> String {
    format!("{PREFIX_PROMPT_HISTORY}{email}")
}

pub fn image_history_key(email: &str) -> String {
    format!("{PREFIX_IMAGE_HISTORY}{email}")
}

pub fn favorites_key(email: &str) -> String {
    format!("{PREFIX_FAVORITES}{email}")
}

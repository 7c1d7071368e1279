//! Client configuration loaded from environment variables.
//!
//! Every setting has a default, so the client starts with zero configuration.

use std::path::PathBuf;

use cineprompt_store::{Database, LocalStore};
use tracing::{info, warn};

/// Filter used when neither `CINEPROMPT_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "cineprompt_client=debug,cineprompt_store=info,warn";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Explicit database file.
    /// Env: `CINEPROMPT_DB_PATH`
    /// Default: `cineprompt.db` in the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the process.
    /// Env: `CINEPROMPT_IN_MEMORY` (true/false)
    /// Default: `false`
    pub in_memory: bool,

    /// tracing-subscriber filter directives.
    /// Env: `CINEPROMPT_LOG`, then `RUST_LOG`
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            in_memory: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("CINEPROMPT_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(val) = lookup("CINEPROMPT_IN_MEMORY") {
            config.in_memory = val == "true" || val == "1";
        }

        if let Some(filter) = lookup("CINEPROMPT_LOG").or_else(|| lookup("RUST_LOG")) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }

    /// Open the configured database and load the store from it.
    ///
    /// A database that cannot be opened is logged and the store runs in
    /// memory instead.
    pub fn open_store(&self) -> LocalStore {
        let opened = if self.in_memory {
            Database::open_in_memory()
        } else {
            match &self.db_path {
                Some(path) => Database::open_at(path),
                None => Database::new(),
            }
        };

        match opened {
            Ok(db) => {
                info!(path = ?db.path(), "store opened");
                LocalStore::open(db)
            }
            Err(e) => {
                warn!(error = %e, "storage unavailable, running in memory only");
                LocalStore::detached()
            }
        }
    }
}

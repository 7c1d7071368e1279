//! # cineprompt-client
//!
//! Application layer of the CinePrompt studio: configuration, logging, the
//! shared [`AppState`] and the prompt/image generation workflow on top of
//! [`cineprompt_store::LocalStore`].

pub mod config;
pub mod error;
pub mod generator;
pub mod service;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::ClientConfig;
pub use error::GenerateError;
pub use generator::{InspirationOutcome, PromptOutcome, Refinement};
pub use service::{
    GeneratedMedia, GenerationRequest, ImageService, SceneService, ServiceError,
};
pub use state::AppState;

/// Install the global `fmt` subscriber filtered by `config.log_filter`.
///
/// Calling this again after a subscriber is installed is harmless.
pub fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Read the environment, start logging and open the store.
pub fn start() -> AppState {
    let config = ClientConfig::from_env();
    init_tracing(&config);

    tracing::info!(app = cineprompt_shared::constants::APP_NAME, "starting");
    AppState::new(config.open_store())
}

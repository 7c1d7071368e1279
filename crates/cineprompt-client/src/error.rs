use cineprompt_shared::PromptError;
use thiserror::Error;

use crate::service::ServiceError;

/// Reasons a generation request is refused or fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// The scene description is blank.
    #[error("a scene description is required")]
    EmptyScene,

    /// There is no prompt to render.
    #[error("generate a prompt first")]
    EmptyPrompt,

    /// Generation needs an active session.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// The generation service failed; nothing was recorded.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<PromptError> for GenerateError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::EmptyScene => Self::EmptyScene,
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PromptError {
    #[error("A scene description is required")]
    EmptyScene,
}

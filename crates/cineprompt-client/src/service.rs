//! Boundary to the hosted generation service.
//!
//! The client never talks to a concrete backend directly: callers hand the
//! generator an [`ImageService`] implementation, and a [`SceneService`] for
//! the text model behind scene inspiration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the service is asked to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Text prompt, or an editing instruction when `source_image` is set.
    pub prompt: String,
    /// Image to start from, as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
}

impl GenerationRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            source_image: None,
        }
    }
}

/// The rendered result: a data URI or a remote URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMedia {
    pub url: String,
}

/// Failure reported by the generation service.  Always safe to retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("the service returned no media")]
    NoMedia,

    #[error("the service returned no text")]
    NoText,

    #[error("generation service failed: {0}")]
    Failed(String),
}

/// A hosted image generator.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn generate_image(&self, request: &GenerationRequest)
        -> Result<GeneratedMedia, ServiceError>;
}

/// A hosted text model that writes scene descriptions.
#[async_trait]
pub trait SceneService: Send + Sync {
    async fn describe_scene(&self, instruction: &str) -> Result<String, ServiceError>;
}

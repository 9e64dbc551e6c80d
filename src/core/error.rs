//! Error types for the Gorgon scene system

use thiserror::Error;

use crate::scene::SceneId;

/// Main error type for the scene system
#[derive(Debug, Error)]
pub enum Error {
    #[error("Scene {0} is already registered")]
    DuplicateId(SceneId),

    #[error("Scene {0} is not registered")]
    NotFound(SceneId),

    #[error("Scene id {} is reserved for \"no scene\"", SceneId::NONE.0)]
    ReservedId,

    #[error("Scene {id} is not a {expected}")]
    TypeMismatch { id: SceneId, expected: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

//! Gorgon - scene lifecycle management for games

pub mod core;
pub mod scene;

pub use crate::core::{Error, Result};
pub use crate::scene::{Scene, SceneContext, SceneId, SceneManager};

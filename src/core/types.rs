//! Core type aliases and re-exports

pub use glam::UVec2;
pub use winit::keyboard::KeyCode;

/// Standard Result type for the scene system
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

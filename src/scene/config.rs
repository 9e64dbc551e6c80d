//! Scene manager configuration

use std::path::Path;

use glam::UVec2;
use serde::{Deserialize, Serialize};

use crate::core::Result;

/// What switching to the already active scene does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReswitchPolicy {
    /// Nothing happens.
    #[default]
    Ignore,
    /// The scene is deactivated and activated again.
    Restart,
}

/// Display settings handed to the window collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Gorgon".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl WindowSettings {
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }
}

/// Configuration for a [`SceneManager`](super::SceneManager)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub window: WindowSettings,
    pub reswitch: ReswitchPolicy,
}

impl ManagerConfig {
    /// Config with the given title and size, other fields default
    pub fn new(title: impl Into<String>, size: UVec2) -> Self {
        Self {
            window: WindowSettings {
                title: title.into(),
                width: size.x,
                height: size.y,
            },
            ..Default::default()
        }
    }

    /// Builder-style setter for the re-switch policy
    pub fn with_reswitch(mut self, policy: ReswitchPolicy) -> Self {
        self.reswitch = policy;
        self
    }

    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded scene manager config from {}", path.display());
        Ok(config)
    }
}

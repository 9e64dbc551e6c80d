//! Serializable snapshot of a scene manager, for logging and debug tooling

use serde::Serialize;

use super::id::SceneId;
use super::lifecycle::SceneState;

/// State of one registered scene
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SceneStatus {
    pub id: SceneId,
    pub state: SceneState,
    pub requires_key_input: bool,
    /// Completed activations so far
    pub activations: u32,
}

/// Manager-wide snapshot. Scenes are sorted by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManagerStatus {
    pub title: String,
    pub size: [u32; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<SceneId>,
    pub key_routing: bool,
    pub scenes: Vec<SceneStatus>,
}

impl ManagerStatus {
    /// Render as pretty JSON
    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

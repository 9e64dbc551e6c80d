//! Scene identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a scene within a [`SceneManager`](super::SceneManager).
///
/// Games usually map their own enum onto these values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub i32);

impl SceneId {
    /// Sentinel meaning "no scene". Never registered; switching to it
    /// deactivates the current scene.
    pub const NONE: SceneId = SceneId(-1);

    /// Whether this is the "no scene" sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<i32> for SceneId {
    fn from(id: i32) -> Self {
        SceneId(id)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

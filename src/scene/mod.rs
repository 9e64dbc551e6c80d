//! Scene management: scenes with an activate/deactivate/update/render
//! lifecycle, switched under a single active slot by a [`SceneManager`].

pub mod config;
pub mod event;
pub mod id;
pub mod lifecycle;
pub mod manager;
pub mod status;

pub use config::{ManagerConfig, ReswitchPolicy, WindowSettings};
pub use event::{EventHub, EventToken, SceneEvent};
pub use id::SceneId;
pub use lifecycle::{AsAny, Scene, SceneContext, SceneState};
pub use manager::SceneManager;
pub use status::{ManagerStatus, SceneStatus};

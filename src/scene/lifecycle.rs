//! Scene trait, lifecycle state and the context handed to scene hooks

use std::any::Any;

use glam::UVec2;
use serde::Serialize;
use winit::keyboard::KeyCode;

use super::id::SceneId;

/// Lifecycle state of a registered scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneState {
    #[default]
    Inactive,
    Active,
}

/// Upcast helper so boxed scenes can be downcast to their concrete type.
///
/// Blanket-implemented for every `'static` type; scenes never implement it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A unit of game state: menu, gameplay, pause screen and so on.
///
/// `G` is the drawable target the manager owns (a window, a surface, a
/// framebuffer); it is passed to [`Scene::render`] untouched.
///
/// Every hook receives a [`SceneContext`] through which the scene can ask its
/// manager to switch scenes or quit.
pub trait Scene<G>: AsAny {
    /// Whether key events should be routed to this scene while it is active.
    fn requires_key_input(&self) -> bool;

    /// Called once, before [`Scene::activate`], the first time the scene is
    /// activated. Allocate expensive resources here.
    fn first_activation(&mut self, _ctx: &mut SceneContext) {}

    /// Called on every activation.
    fn activate(&mut self, _ctx: &mut SceneContext) {}

    /// Called before the scene stops being active.
    fn deactivate(&mut self, _ctx: &mut SceneContext) {}

    /// Per-frame logic. `delta_ms` is the time since the previous frame.
    fn update(&mut self, ctx: &mut SceneContext, delta_ms: u32);

    /// Draw into the target. May be called without a preceding `update`, so
    /// the two should not depend on each other.
    fn render(&mut self, ctx: &mut SceneContext, target: &mut G);

    /// A routed key. `amount` is 1.0 for a press and 0.0 for a release.
    fn key_event(&mut self, _ctx: &mut SceneContext, _key: KeyCode, _amount: f32) {}
}

/// Requests a hook makes of its manager. Applied right after the hook returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Request {
    Switch(SceneId),
    Quit(SceneId),
}

/// Handle passed into every scene hook.
pub struct SceneContext {
    id: SceneId,
    size: UVec2,
    requests: Vec<Request>,
}

impl SceneContext {
    pub(crate) fn new(id: SceneId, size: UVec2) -> Self {
        Self {
            id,
            size,
            requests: Vec::new(),
        }
    }

    /// Id of the scene receiving the hook.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Current display size of the manager.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Ask the manager to switch to `id` once this hook returns.
    /// [`SceneId::NONE`] deactivates everything.
    pub fn switch_scene(&mut self, id: impl Into<SceneId>) {
        self.requests.push(Request::Switch(id.into()));
    }

    /// Ask the manager to stop its run loop after the current frame.
    pub fn quit(&mut self) {
        self.requests.push(Request::Quit(self.id));
    }

    pub(crate) fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }
}

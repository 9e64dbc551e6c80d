//! Scene manager: registry of scenes, the active-scene switch and the frame step

use std::collections::{HashMap, VecDeque};

use glam::UVec2;
use winit::keyboard::KeyCode;

use crate::core::time::FrameClock;
use crate::core::{Error, Result};
use super::config::{ManagerConfig, ReswitchPolicy};
use super::event::{EventHub, SceneEvent};
use super::id::SceneId;
use super::lifecycle::{Request, Scene, SceneContext, SceneState};
use super::status::{ManagerStatus, SceneStatus};

/// A registered scene plus the bookkeeping the manager keeps for it.
struct SceneSlot<G: 'static> {
    scene: Box<dyn Scene<G>>,
    state: SceneState,
    activations: u32,
}

/// Owns a set of scenes and switches between them.
///
/// At most one scene is active. Only the active scene receives `update`,
/// `render` and routed key events; inactive scenes are effectively paused.
///
/// Requests a scene makes through its [`SceneContext`] are applied as soon as
/// the hook that made them returns, in the order they were made.
///
/// ```
/// use gorgon::scene::{ManagerConfig, Scene, SceneContext, SceneManager};
///
/// struct Intro { frames: u32 }
///
/// impl Scene<Vec<String>> for Intro {
///     fn requires_key_input(&self) -> bool { false }
///     fn update(&mut self, _ctx: &mut SceneContext, _delta_ms: u32) { self.frames += 1; }
///     fn render(&mut self, _ctx: &mut SceneContext, target: &mut Vec<String>) {
///         target.push(format!("intro frame {}", self.frames));
///     }
/// }
///
/// const INTRO: i32 = 0;
///
/// let mut manager = SceneManager::new(Vec::new(), ManagerConfig::default());
/// manager.register(INTRO, Intro { frames: 0 })?;
/// manager.switch_scene(INTRO)?;
/// manager.step(16)?;
/// assert_eq!(manager.target(), &vec!["intro frame 1".to_string()]);
/// # Ok::<(), gorgon::core::Error>(())
/// ```
pub struct SceneManager<G: 'static> {
    target: G,
    config: ManagerConfig,
    scenes: HashMap<SceneId, SceneSlot<G>>,
    active: SceneId,
    key_routing: bool,
    quitting: bool,
    pending: VecDeque<Request>,
    events: EventHub<SceneEvent>,
}

impl<G: 'static> SceneManager<G> {
    /// Create a manager drawing into `target`.
    pub fn new(target: G, config: ManagerConfig) -> Self {
        log::info!(
            "Scene manager created: \"{}\" {}x{}",
            config.window.title, config.window.width, config.window.height
        );

        Self {
            target,
            config,
            scenes: HashMap::new(),
            active: SceneId::NONE,
            key_routing: false,
            quitting: false,
            pending: VecDeque::new(),
            events: EventHub::new(),
        }
    }

    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------

    /// Register `scene` under `id` and return it. The scene starts inactive.
    pub fn register<S: Scene<G>>(&mut self, id: impl Into<SceneId>, scene: S) -> Result<&mut S> {
        let id = id.into();
        self.check_free(id)?;
        self.insert(id, Box::new(scene));
        self.scene_mut::<S>(id)
    }

    /// Register a scene built by `build`, which receives the id it will live under.
    pub fn register_with<S, F>(&mut self, id: impl Into<SceneId>, build: F) -> Result<&mut S>
    where
        S: Scene<G>,
        F: FnOnce(SceneId) -> S,
    {
        let id = id.into();
        self.check_free(id)?;
        self.insert(id, Box::new(build(id)));
        self.scene_mut::<S>(id)
    }

    /// Take ownership of an already boxed scene, e.g. one obtained from [`release`](Self::release).
    pub fn assume(&mut self, id: impl Into<SceneId>, scene: Box<dyn Scene<G>>) -> Result<()> {
        let id = id.into();
        self.check_free(id)?;
        self.insert(id, scene);
        Ok(())
    }

    /// Drop a scene. The active scene is deactivated first.
    pub fn remove_scene(&mut self, id: impl Into<SceneId>) -> Result<()> {
        let id = id.into();
        self.detach(id)?;
        self.flush()
    }

    /// Remove a scene from the manager and hand it back. The active scene is
    /// deactivated first. Its activation history does not travel with it.
    ///
    /// If a request queued by the scene's `deactivate` hook fails, the scene
    /// stays registered (inactive) and the error is returned.
    pub fn release(&mut self, id: impl Into<SceneId>) -> Result<Box<dyn Scene<G>>> {
        let id = id.into();
        let slot = self.detach(id)?;
        if let Err(e) = self.flush() {
            log::warn!("Release of scene {} failed, keeping it registered: {}", id, e);
            self.scenes.insert(id, slot);
            return Err(e);
        }
        Ok(slot.scene)
    }

    /// Whether `id` is registered.
    pub fn scene_exists(&self, id: impl Into<SceneId>) -> bool {
        self.scenes.contains_key(&id.into())
    }

    /// Number of registered scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.scenes.keys().copied()
    }

    /// Lifecycle state of a registered scene.
    pub fn scene_state(&self, id: impl Into<SceneId>) -> Result<SceneState> {
        let id = id.into();
        self.scenes.get(&id).map(|slot| slot.state).ok_or(Error::NotFound(id))
    }

    /// Borrow a scene as its concrete type.
    pub fn scene<S: Scene<G>>(&self, id: impl Into<SceneId>) -> Result<&S> {
        let id = id.into();
        let slot = self.scenes.get(&id).ok_or(Error::NotFound(id))?;
        let scene: &dyn Scene<G> = slot.scene.as_ref();
        scene.as_any().downcast_ref::<S>().ok_or(Error::TypeMismatch {
            id,
            expected: std::any::type_name::<S>(),
        })
    }

    /// Mutably borrow a scene as its concrete type.
    pub fn scene_mut<S: Scene<G>>(&mut self, id: impl Into<SceneId>) -> Result<&mut S> {
        let id = id.into();
        let slot = self.scenes.get_mut(&id).ok_or(Error::NotFound(id))?;
        let scene: &mut dyn Scene<G> = slot.scene.as_mut();
        scene.as_any_mut().downcast_mut::<S>().ok_or(Error::TypeMismatch {
            id,
            expected: std::any::type_name::<S>(),
        })
    }

    // ------------------------------------------------------------------
    // Switching
    // ------------------------------------------------------------------

    /// The active scene, if any.
    pub fn active_scene(&self) -> Option<SceneId> {
        (!self.active.is_none()).then_some(self.active)
    }

    /// Make `id` the active scene, deactivating the current one.
    ///
    /// [`SceneId::NONE`] only deactivates. Unknown ids fail with
    /// [`Error::NotFound`] before anything changes. Switching to the scene
    /// that is already active follows the configured [`ReswitchPolicy`].
    pub fn switch_scene(&mut self, id: impl Into<SceneId>) -> Result<()> {
        self.try_switch(id.into())?;
        self.flush()
    }

    /// Deactivate the active scene, leaving none active.
    pub fn deactivate(&mut self) -> Result<()> {
        self.deactivate_active();
        self.flush()
    }

    fn try_switch(&mut self, id: SceneId) -> Result<()> {
        if !id.is_none() && !self.scenes.contains_key(&id) {
            return Err(Error::NotFound(id));
        }

        if !id.is_none() && id == self.active {
            match self.config.reswitch {
                ReswitchPolicy::Ignore => {
                    log::debug!("Scene {} already active", id);
                    return Ok(());
                }
                ReswitchPolicy::Restart => log::debug!("Restarting scene {}", id),
            }
        }

        log::info!("Switching scene {} -> {}", self.active, id);

        self.deactivate_active();
        if !id.is_none() {
            self.activate(id);
        }
        Ok(())
    }

    fn activate(&mut self, id: SceneId) {
        self.active = id;

        let wants_keys = self
            .with_scene(id, |slot, ctx, _| {
                slot.state = SceneState::Active;
                if slot.activations == 0 {
                    slot.scene.first_activation(ctx);
                }
                slot.activations += 1;
                slot.scene.activate(ctx);
                slot.scene.requires_key_input()
            })
            .unwrap_or(false);

        self.key_routing = wants_keys;
        self.events.fire(&SceneEvent::Activated(id));
    }

    fn deactivate_active(&mut self) {
        let id = std::mem::replace(&mut self.active, SceneId::NONE);
        self.key_routing = false;
        if id.is_none() {
            return;
        }

        self.with_scene(id, |slot, ctx, _| {
            slot.scene.deactivate(ctx);
            slot.state = SceneState::Inactive;
        });

        log::debug!("Scene {} deactivated", id);
        self.events.fire(&SceneEvent::Deactivated(id));
    }

    // ------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------

    /// Advance one frame: `update` the active scene with `delta_ms`, then
    /// `render` whichever scene is active afterwards. Does nothing when no
    /// scene is active.
    pub fn step(&mut self, delta_ms: u32) -> Result<()> {
        let id = self.active;
        if id.is_none() {
            return Ok(());
        }

        self.with_scene(id, |slot, ctx, _| slot.scene.update(ctx, delta_ms));
        self.flush()?;

        let id = self.active;
        if !id.is_none() {
            self.with_scene(id, |slot, ctx, target| slot.scene.render(ctx, target));
            self.flush()?;
        }
        Ok(())
    }

    /// Step the active scene every frame until [`quit`](Self::quit) is
    /// requested, then deactivate it. `next_frame` runs after each step and is
    /// where the caller pumps OS events and presents the frame.
    pub fn run<F>(&mut self, clock: &mut FrameClock, mut next_frame: F) -> Result<()>
    where
        F: FnMut(&mut Self),
    {
        log::info!("Scene manager running");

        while !self.quitting {
            clock.tick();
            self.step(clock.delta_millis())?;
            next_frame(self);
        }

        log::info!("Scene manager stopped after {} frames", clock.frame_count());
        self.quitting = false;
        self.switch_scene(SceneId::NONE)
    }

    /// Stop [`run`](Self::run) once the current frame completes.
    pub fn quit(&mut self) {
        self.quitting = true;
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    // ------------------------------------------------------------------
    // Keyboard routing
    // ------------------------------------------------------------------

    /// Route a key to the active scene. Returns whether the scene received it.
    pub fn handle_key(&mut self, key: KeyCode, amount: f32) -> Result<bool> {
        let id = self.active;
        if !self.key_routing || id.is_none() {
            return Ok(false);
        }

        let delivered = self
            .with_scene(id, |slot, ctx, _| {
                if !slot.scene.requires_key_input() {
                    return false;
                }
                slot.scene.key_event(ctx, key, amount);
                true
            })
            .unwrap_or(false);

        self.flush()?;
        Ok(delivered)
    }

    /// Resume key routing if the active scene wants keys.
    pub fn activate_keyboard(&mut self) {
        if let Some(slot) = self.scenes.get(&self.active) {
            self.key_routing = slot.scene.requires_key_input();
        }
    }

    /// Stop routing keys to scenes, e.g. while a text field has focus.
    pub fn release_keyboard(&mut self) {
        self.key_routing = false;
    }

    /// Whether keys are currently routed to the active scene.
    pub fn key_routing(&self) -> bool {
        self.key_routing
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Listeners for scene activation and deactivation.
    pub fn events_mut(&mut self) -> &mut EventHub<SceneEvent> {
        &mut self.events
    }

    pub fn target(&self) -> &G {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut G {
        &mut self.target
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.window.title
    }

    pub fn size(&self) -> UVec2 {
        self.config.window.size()
    }

    /// Record a new display size. Scenes see it through [`SceneContext::size`].
    pub fn resize(&mut self, size: UVec2) {
        self.config.window.width = size.x;
        self.config.window.height = size.y;
    }

    /// Snapshot of the manager and every scene.
    pub fn status(&self) -> ManagerStatus {
        let mut scenes: Vec<SceneStatus> = self
            .scenes
            .iter()
            .map(|(id, slot)| SceneStatus {
                id: *id,
                state: slot.state,
                requires_key_input: slot.scene.requires_key_input(),
                activations: slot.activations,
            })
            .collect();
        scenes.sort_by_key(|s| s.id);

        ManagerStatus {
            title: self.config.window.title.clone(),
            size: self.size().to_array(),
            active: self.active_scene(),
            key_routing: self.key_routing,
            scenes,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn check_free(&self, id: SceneId) -> Result<()> {
        if id.is_none() {
            return Err(Error::ReservedId);
        }
        if self.scenes.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }
        Ok(())
    }

    fn insert(&mut self, id: SceneId, scene: Box<dyn Scene<G>>) {
        self.scenes.insert(id, SceneSlot {
            scene,
            state: SceneState::Inactive,
            activations: 0,
        });
        log::info!("Registered scene {} ({} total)", id, self.scenes.len());
    }

    /// Take a scene out of the registry, deactivating it first if active.
    fn detach(&mut self, id: SceneId) -> Result<SceneSlot<G>> {
        if !self.scenes.contains_key(&id) {
            return Err(Error::NotFound(id));
        }
        if self.active == id {
            log::warn!("Removing active scene {}", id);
            self.deactivate_active();
        }

        let slot = self.scenes.remove(&id).ok_or(Error::NotFound(id))?;
        log::info!("Removed scene {} ({} left)", id, self.scenes.len());
        Ok(slot)
    }

    /// Run `hook` against a registered scene with a fresh context, queueing
    /// whatever the scene requested. `None` if `id` is not registered.
    fn with_scene<R>(
        &mut self,
        id: SceneId,
        hook: impl FnOnce(&mut SceneSlot<G>, &mut SceneContext, &mut G) -> R,
    ) -> Option<R> {
        let size = self.config.window.size();
        let slot = self.scenes.get_mut(&id)?;
        let mut ctx = SceneContext::new(id, size);
        let out = hook(slot, &mut ctx, &mut self.target);
        self.pending.extend(ctx.take_requests());
        Some(out)
    }

    /// Apply queued scene requests until none remain.
    fn flush(&mut self) -> Result<()> {
        while let Some(request) = self.pending.pop_front() {
            match request {
                Request::Quit(from) => {
                    log::info!("Quit requested by scene {}", from);
                    self.quitting = true;
                }
                Request::Switch(id) => {
                    if let Err(e) = self.try_switch(id) {
                        self.pending.clear();
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }
}

//! Scene activation notifications

use serde::Serialize;

use super::id::SceneId;

/// Lifecycle transitions announced by the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "scene", rename_all = "snake_case")]
pub enum SceneEvent {
    /// Fired after the scene's `activate` hook has run.
    Activated(SceneId),
    /// Fired after the scene's `deactivate` hook has run.
    Deactivated(SceneId),
}

/// Handle returned by [`EventHub::register`], used to unregister a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventToken(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Ordered list of listeners for one event type.
pub struct EventHub<E> {
    listeners: Vec<(EventToken, Listener<E>)>,
    next_token: u64,
}

impl<E> EventHub<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_token: 0,
        }
    }

    /// Add a listener. Listeners run in registration order.
    pub fn register(&mut self, listener: impl FnMut(&E) + 'static) -> EventToken {
        let token = EventToken(self.next_token);
        self.next_token += 1;
        self.listeners.push((token, Box::new(listener)));
        token
    }

    /// Remove a listener. Returns false if the token was unknown.
    pub fn unregister(&mut self, token: EventToken) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(t, _)| *t != token);
        self.listeners.len() != before
    }

    pub(crate) fn fire(&mut self, event: &E) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl<E> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

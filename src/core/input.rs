//! Keyboard input tracking for scene key routing

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Amount reported for a pressed key
pub const KEY_PRESSED: f32 = 1.0;
/// Amount reported for a released key
pub const KEY_RELEASED: f32 = 0.0;

/// Tracks keyboard state and turns window events into `(key, amount)` pairs
/// suitable for [`SceneManager::handle_key`](crate::scene::SceneManager::handle_key).
#[derive(Default)]
pub struct InputState {
    /// Currently held keys, used to drop OS key repeats
    keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event. Returns the key event to route, if any.
    ///
    /// OS key repeats of an already held key are swallowed.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<(KeyCode, f32)> {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => self.apply(*key_code, *state),
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never reach us
                self.keys_pressed.clear();
                None
            }
            _ => None,
        }
    }

    fn apply(&mut self, key: KeyCode, state: ElementState) -> Option<(KeyCode, f32)> {
        match state {
            ElementState::Pressed => {
                if !self.keys_pressed.insert(key) {
                    return None;
                }
                Some((key, KEY_PRESSED))
            }
            ElementState::Released => {
                self.keys_pressed.remove(&key);
                Some((key, KEY_RELEASED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert_eq!(input.apply(KeyCode::Enter, ElementState::Pressed), Some((KeyCode::Enter, KEY_PRESSED)));
        assert_eq!(input.apply(KeyCode::Enter, ElementState::Released), Some((KeyCode::Enter, KEY_RELEASED)));
    }

    #[test]
    fn test_repeat_is_swallowed() {
        let mut input = InputState::new();
        assert!(input.apply(KeyCode::KeyW, ElementState::Pressed).is_some());
        assert!(input.apply(KeyCode::KeyW, ElementState::Pressed).is_none());

        // Released keys can be pressed again
        input.apply(KeyCode::KeyW, ElementState::Released);
        assert!(input.apply(KeyCode::KeyW, ElementState::Pressed).is_some());
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut input = InputState::new();
        input.apply(KeyCode::ShiftLeft, ElementState::Pressed);
        assert_eq!(input.process_event(&WindowEvent::Focused(false)), None);
        assert!(input.apply(KeyCode::ShiftLeft, ElementState::Pressed).is_some());
    }

    #[test]
    fn test_non_key_events_ignored() {
        let mut input = InputState::new();
        assert_eq!(input.process_event(&WindowEvent::Focused(true)), None);
        assert_eq!(input.process_event(&WindowEvent::CloseRequested), None);
    }
}

use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for the board window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event. Returns true when it is a fresh key press
    /// (the key was not already held).
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck keys when focus changes mid-press.
                    self.keys_down.clear();
                }
                false
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => self.keys_down.insert(*key),
                KeyState::Released => {
                    self.keys_down.remove(key);
                    false
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

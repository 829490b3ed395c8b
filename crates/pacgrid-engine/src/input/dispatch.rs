use std::collections::HashMap;

use super::types::{InputEvent, Key, KeyState};

/// Board-level action triggered by a key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    /// Ask the window to close.
    Close,
    /// Advance the polygon mode (Fill → Line → Point).
    CyclePolygonMode,
}

/// Maps fresh key presses to [`Action`]s.
///
/// Repeats and releases never trigger anything.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    bindings: HashMap<Key, Action>,
}

impl Default for InputDispatcher {
    /// Escape closes, Space cycles the polygon mode.
    fn default() -> Self {
        let mut d = Self::empty();
        d.bind(Key::Escape, Action::Close);
        d.bind(Key::Space, Action::CyclePolygonMode);
        d
    }
}

impl InputDispatcher {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `key`, returning the action it previously triggered.
    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        self.bindings.insert(key, action)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.bindings.remove(&key)
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    pub fn dispatch(&self, event: &InputEvent) -> Option<Action> {
        match event {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
            } => self.action_for(*key),
            _ => None,
        }
    }
}

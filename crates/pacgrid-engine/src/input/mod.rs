//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s; the dispatcher
//! turns fresh key presses into board actions.

mod dispatch;
mod state;
mod types;

pub use dispatch::{Action, InputDispatcher};
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};

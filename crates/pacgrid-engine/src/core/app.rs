use anyhow::Result;

use crate::input::InputEvent;
use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// Call order: `on_gpu_ready` once, then `on_input`/`on_frame` until something
/// returns [`AppControl::Exit`] or the window is closed, then `on_exit` once.
pub trait App {
    /// Called once the window and GPU context exist. Load GPU resources here.
    ///
    /// An error aborts the run; `Runtime::run` returns it.
    fn on_gpu_ready(&mut self, ctx: &RenderCtx<'_>) -> Result<()>;

    /// Called for each translated input event, between frames.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once while closing, before the GPU context is destroyed.
    ///
    /// GPU resources held by the app should be released here.
    fn on_exit(&mut self) {}
}

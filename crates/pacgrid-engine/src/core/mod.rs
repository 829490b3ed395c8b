//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the board
//! application: lifecycle callbacks plus a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, FrameErrors};

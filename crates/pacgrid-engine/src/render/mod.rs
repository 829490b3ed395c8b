//! Board rendering on top of wgpu.
//!
//! Responsibilities:
//! - upload placed cell geometry into owned vertex buffers
//! - load the shader program (one pipeline per polygon mode) and the board texture
//! - record each frame as an ordered command list, then replay it into a render pass
//!
//! Recording is GPU-free so frame ordering can be checked in tests.

mod cmd;
mod ctx;
mod frame;
mod polygon;
mod program;
mod renderer;
mod scope;
mod texture;
mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use cmd::{FrameCmd, FrameCommands};
pub use ctx::RenderCtx;
pub use frame::record_frame;
pub use polygon::PolygonMode;
pub use program::{read_source, ShaderProgram, FRAGMENT_ENTRY, VERTEX_ENTRY};
pub use renderer::{GridRenderer, GridRendererDesc};
pub use texture::{GpuTexture, TextureImage};
pub use upload::{CellBuffer, GpuCellUploader};

//! Pacgrid engine crate.
//!
//! Compiles a logical board grid into GPU-resident quads and drives the
//! per-frame render loop on top of wgpu + winit.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod geometry;
pub mod grid;
pub mod render;

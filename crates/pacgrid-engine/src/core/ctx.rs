use anyhow::anyhow;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputState;

use super::app::AppControl;

/// First fatal error raised while drawing a frame.
///
/// The runtime drains it after each frame and returns it from `Runtime::run`.
#[derive(Debug, Default)]
pub struct FrameErrors {
    first: Option<anyhow::Error>,
}

impl FrameErrors {
    /// Keeps `err` if it is the first and asks to exit. The runtime logs it.
    pub fn record(&mut self, err: anyhow::Error) -> AppControl {
        if self.first.is_none() {
            self.first = Some(err);
        }
        AppControl::Exit
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn take(&mut self) -> Option<anyhow::Error> {
        self.first.take()
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    /// Frames presented before this one.
    pub frame_index: u64,
    pub errors: &'a mut FrameErrors,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Ends the run with `err`; `Runtime::run` returns it.
    pub fn fail(&mut self, err: anyhow::Error) -> AppControl {
        self.errors.record(err)
    }

    /// Acquires a frame, clears it to `clear`, lets `draw` record into a single
    /// render pass, then submits and presents.
    ///
    /// Surface errors skip the frame, except fatal ones which end the run.
    pub fn render_pass<F>(&mut self, clear: wgpu::Color, draw: F) -> AppControl
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let reason = err.to_string();
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    let frame = self.frame_index;
                    return self.fail(anyhow!("failed to acquire frame {frame}: {reason}"));
                }
                return AppControl::Continue;
            }
        };

        // Pass is dropped before the encoder is moved into submit().
        {
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("pacgrid board"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            draw(&mut pass);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{AppControl, FrameCtx};
use crate::geometry::GridDims;
use crate::grid::{build_grid, Grid, VisibleCells};

use super::{
    record_frame, CellBuffer, FrameCmd, FrameCommands, GpuCellUploader, GpuTexture, PolygonMode,
    RenderCtx, ShaderProgram, TextureImage,
};

/// Everything needed to set up a [`GridRenderer`].
#[derive(Debug, Clone)]
pub struct GridRendererDesc<'p> {
    pub dims: GridDims,
    pub vertex_shader: &'p Path,
    pub fragment_shader: &'p Path,
    pub texture: &'p Path,
    pub clear: wgpu::Color,
}

/// Draws a textured board: one shared program and texture, one buffer per cell.
///
/// Owns the grid, so dropping the renderer releases every cell buffer along with
/// the texture and pipelines.
pub struct GridRenderer {
    program: ShaderProgram,
    // Kept alive for `texture_binding`.
    _texture: GpuTexture,
    texture_binding: wgpu::BindGroup,
    grid: Grid<CellBuffer>,
    visible: Box<dyn VisibleCells>,
    mode: PolygonMode,
    warned: [bool; 3],
    clear: wgpu::Color,
    commands: FrameCommands,
}

impl GridRenderer {
    /// Loads shaders and texture, then builds the whole grid.
    ///
    /// Any failure aborts setup; nothing partially built is kept.
    pub fn new(
        ctx: &RenderCtx<'_>,
        desc: &GridRendererDesc<'_>,
        visible: Box<dyn VisibleCells>,
    ) -> Result<Self> {
        let program = ShaderProgram::load(ctx, desc.vertex_shader, desc.fragment_shader)
            .context("failed to load cell shader program")?;

        let image = TextureImage::load(desc.texture)?;
        let texture = GpuTexture::upload(ctx, &image, &desc.texture.display().to_string())?;
        let texture_binding = program.bind_texture(ctx, &texture)?;
        let (width, height) = texture.size();
        log::debug!("texture {} uploaded ({width}x{height})", desc.texture.display());

        let mut uploader = GpuCellUploader::new(ctx);
        let grid = build_grid(&mut uploader, desc.dims)?;

        Ok(Self {
            program,
            _texture: texture,
            texture_binding,
            grid,
            visible,
            mode: PolygonMode::default(),
            warned: [false; 3],
            clear: desc.clear,
            commands: FrameCommands::new(),
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid<CellBuffer> {
        &self.grid
    }

    #[inline]
    pub fn polygon_mode(&self) -> PolygonMode {
        self.mode
    }

    /// Advances Fill → Line → Point → Fill.
    ///
    /// Modes the device cannot rasterize still advance the state but draw filled.
    pub fn cycle_polygon_mode(&mut self) -> PolygonMode {
        self.mode = self.mode.next();

        if !self.program.supports(self.mode) && !self.warned[self.mode.index()] {
            self.warned[self.mode.index()] = true;
            log::warn!(
                "polygon mode {:?} not supported by this device; drawing filled",
                self.mode
            );
        }

        log::debug!("polygon mode -> {:?}", self.mode);
        self.mode
    }

    /// Records this frame's commands and checks them against the grid.
    fn record(&mut self) -> Result<()> {
        record_frame(
            &mut self.commands,
            &self.grid,
            self.visible.as_ref(),
            self.mode,
            self.clear,
        );
        self.commands.validate(self.grid.len())
    }

    /// Records and draws one frame.
    ///
    /// A malformed frame ends the run with an error.
    pub fn render(&mut self, frame: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Err(e) = self.record() {
            let index = frame.frame_index;
            return frame.fail(e.context(format!("frame {index} was not drawn")));
        }

        let clear = self.commands.clear_color().unwrap_or(self.clear);
        let (commands, program, binding, grid) =
            (&self.commands, &self.program, &self.texture_binding, &self.grid);

        frame.render_pass(clear, |pass| {
            execute(pass, commands, program, binding, grid);
        })
    }
}

/// Replays `commands` into `pass`. Returns the number of draws issued.
fn execute(
    pass: &mut wgpu::RenderPass<'_>,
    commands: &FrameCommands,
    program: &ShaderProgram,
    binding: &wgpu::BindGroup,
    grid: &Grid<CellBuffer>,
) -> usize {
    let mut draws = 0;
    for cmd in commands.iter() {
        match *cmd {
            // Applied as the pass load op.
            FrameCmd::Clear(_) => {}
            FrameCmd::UseProgram(mode) => pass.set_pipeline(program.pipeline(mode)),
            FrameCmd::BindTexture => pass.set_bind_group(0, binding, &[]),
            FrameCmd::Draw(slot) => {
                // Validated frames never get here.
                let Some(cell) = grid.cells().get(slot) else {
                    log::error!("skipping draw of slot {slot}: grid has {} cells", grid.len());
                    continue;
                };
                let buffer = &cell.drawable;
                pass.set_vertex_buffer(0, buffer.slice());
                pass.draw(0..buffer.vertex_count(), 0..1);
                draws += 1;
            }
            FrameCmd::Present => break,
        }
    }
    draws
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::grid::{AllCells, FixedCells};
    use crate::render::testing::{noop_ctx, noop_device, target, FRAGMENT_WGSL, VERTEX_WGSL};

    /// Shader and texture files on disk, removed on drop.
    struct Assets {
        vertex: PathBuf,
        fragment: PathBuf,
        texture: PathBuf,
    }

    impl Assets {
        fn write(tag: &str) -> Self {
            let dir = std::env::temp_dir();
            let pid = std::process::id();
            let assets = Self {
                vertex: dir.join(format!("pacgrid-{pid}-{tag}.vert.wgsl")),
                fragment: dir.join(format!("pacgrid-{pid}-{tag}.frag.wgsl")),
                texture: dir.join(format!("pacgrid-{pid}-{tag}.png")),
            };
            std::fs::write(&assets.vertex, VERTEX_WGSL).unwrap();
            std::fs::write(&assets.fragment, FRAGMENT_WGSL).unwrap();
            image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]))
                .save(&assets.texture)
                .unwrap();
            assets
        }

        fn desc(&self, dims: GridDims) -> GridRendererDesc<'_> {
            GridRendererDesc {
                dims,
                vertex_shader: &self.vertex,
                fragment_shader: &self.fragment,
                texture: &self.texture,
                clear: wgpu::Color::BLACK,
            }
        }
    }

    impl Drop for Assets {
        fn drop(&mut self) {
            for path in [&self.vertex, &self.fragment, &self.texture] {
                std::fs::remove_file(path).ok();
            }
        }
    }

    fn dims() -> GridDims {
        GridDims::new(20, 20).unwrap()
    }

    // ── setup ────────────────────────────────────────────────────────────

    #[test]
    fn builds_the_whole_board_filled() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let assets = Assets::write("board");

        let renderer =
            GridRenderer::new(&ctx, &assets.desc(dims()), Box::new(FixedCells::demo(dims())))
                .unwrap();

        assert_eq!(renderer.grid().len(), 400);
        assert_eq!(renderer.grid().dims(), dims());
        assert_eq!(renderer.polygon_mode(), PolygonMode::Fill);
    }

    #[test]
    fn unreadable_texture_aborts_setup() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let assets = Assets::write("no-texture");
        std::fs::remove_file(&assets.texture).unwrap();

        let result = GridRenderer::new(&ctx, &assets.desc(dims()), Box::new(AllCells));
        assert!(result.is_err());
    }

    // ── polygon modes ────────────────────────────────────────────────────

    #[test]
    fn unsupported_modes_advance_and_warn_once() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let assets = Assets::write("modes");
        let mut renderer =
            GridRenderer::new(&ctx, &assets.desc(dims()), Box::new(AllCells)).unwrap();

        assert_eq!(renderer.cycle_polygon_mode(), PolygonMode::Line);
        assert!(renderer.warned[PolygonMode::Line.index()]);
        assert!(!renderer.warned[PolygonMode::Point.index()]);

        assert_eq!(renderer.cycle_polygon_mode(), PolygonMode::Point);
        assert_eq!(renderer.cycle_polygon_mode(), PolygonMode::Fill);
        assert_eq!(renderer.cycle_polygon_mode(), PolygonMode::Line);

        assert_eq!(renderer.warned, [false, true, true]);
        assert_eq!(renderer.polygon_mode(), PolygonMode::Line);
    }

    // ── recording + replay ───────────────────────────────────────────────

    fn replay(renderer: &GridRenderer, device: &wgpu::Device, queue: &wgpu::Queue) -> usize {
        let view = target(device);
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("test encoder"),
        });
        let draws = {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("test pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            execute(
                &mut pass,
                &renderer.commands,
                &renderer.program,
                &renderer.texture_binding,
                &renderer.grid,
            )
        };
        queue.submit([encoder.finish()]);
        draws
    }

    #[test]
    fn demo_frame_issues_two_draws() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let assets = Assets::write("demo-frame");
        let mut renderer =
            GridRenderer::new(&ctx, &assets.desc(dims()), Box::new(FixedCells::demo(dims())))
                .unwrap();

        renderer.record().unwrap();
        assert_eq!(replay(&renderer, &device, &queue), 2);
    }

    #[test]
    fn all_cells_frame_draws_every_buffer() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let assets = Assets::write("all-frame");
        let mut renderer =
            GridRenderer::new(&ctx, &assets.desc(dims()), Box::new(AllCells)).unwrap();

        renderer.record().unwrap();
        assert_eq!(replay(&renderer, &device, &queue), 400);
    }

    #[test]
    fn draw_past_the_grid_is_skipped_on_replay() {
        let (device, queue) = noop_device();
        let ctx = noop_ctx(&device, &queue);
        let assets = Assets::write("bad-slot");
        let mut renderer =
            GridRenderer::new(&ctx, &assets.desc(dims()), Box::new(AllCells)).unwrap();

        renderer.commands.clear();
        renderer.commands.push(FrameCmd::Clear(wgpu::Color::BLACK));
        renderer.commands.push(FrameCmd::UseProgram(PolygonMode::Fill));
        renderer.commands.push(FrameCmd::BindTexture);
        renderer.commands.push(FrameCmd::Draw(0));
        renderer.commands.push(FrameCmd::Draw(400));
        renderer.commands.push(FrameCmd::Present);

        assert!(renderer.commands.validate(renderer.grid.len()).is_err());
        assert_eq!(replay(&renderer, &device, &queue), 1);
    }
}

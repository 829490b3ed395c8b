use std::path::PathBuf;

use anyhow::Result;
use winit::dpi::LogicalSize;

use pacgrid_engine::core::{App, AppControl, FrameCtx};
use pacgrid_engine::device::GpuInit;
use pacgrid_engine::geometry::GridDims;
use pacgrid_engine::grid::FixedCells;
use pacgrid_engine::input::{Action, InputDispatcher, InputEvent};
use pacgrid_engine::logging::{init_logging, LoggingConfig};
use pacgrid_engine::render::{GridRenderer, GridRendererDesc, RenderCtx};
use pacgrid_engine::window::{Runtime, RuntimeConfig};

const ROWS: u32 = 20;
const COLUMNS: u32 = 20;
const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 500.0;
const TITLE: &str = "Pacman";

const CLEAR: wgpu::Color = wgpu::Color::BLACK;

fn asset(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(rel)
}

/// The maze board: a 20x20 grid with two lit cells.
struct PacmanBoard {
    dims: GridDims,
    dispatcher: InputDispatcher,
    renderer: Option<GridRenderer>,
}

impl PacmanBoard {
    fn new(dims: GridDims) -> Self {
        Self {
            dims,
            dispatcher: InputDispatcher::default(),
            renderer: None,
        }
    }
}

impl App for PacmanBoard {
    fn on_gpu_ready(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let vertex_shader = asset("shaders/square.vert.wgsl");
        let fragment_shader = asset("shaders/square.frag.wgsl");
        let texture = asset("green.png");

        let desc = GridRendererDesc {
            dims: self.dims,
            vertex_shader: &vertex_shader,
            fragment_shader: &fragment_shader,
            texture: &texture,
            clear: CLEAR,
        };

        let renderer = GridRenderer::new(ctx, &desc, Box::new(FixedCells::demo(self.dims)))?;
        log::info!(
            "board ready: {} cells, mode {:?}",
            renderer.grid().len(),
            renderer.polygon_mode()
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        match self.dispatcher.dispatch(event) {
            Some(Action::Close) => AppControl::Exit,
            Some(Action::CyclePolygonMode) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    let mode = renderer.cycle_polygon_mode();
                    log::info!("polygon mode {mode:?}");
                }
                AppControl::Continue
            }
            None => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        match self.renderer.as_mut() {
            Some(renderer) => renderer.render(ctx),
            None => AppControl::Continue,
        }
    }

    fn on_exit(&mut self) {
        // Release the grid and GPU resources while the device is still alive.
        self.renderer = None;
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let dims = GridDims::new(COLUMNS, ROWS)?;
    log::info!("{TITLE}: {COLUMNS}x{ROWS} board in a {WIDTH}x{HEIGHT} window");

    Runtime::run(
        RuntimeConfig {
            title: TITLE.to_string(),
            size: LogicalSize::new(WIDTH, HEIGHT),
            resizable: false,
        },
        GpuInit::default(),
        PacmanBoard::new(dims),
    )
}

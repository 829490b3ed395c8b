use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, FrameErrors};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputEvent, InputState, Key, KeyState};
use crate::render::RenderCtx;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pacgrid".to_string(),
            size: LogicalSize::new(500.0, 500.0),
            resizable: false,
        }
    }
}

/// Lifecycle of the board window.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RunState {
    #[default]
    Running,
    /// Close requested; app teardown in progress.
    Closing,
    /// Window and GPU context destroyed.
    Terminated,
}

impl RunState {
    /// Running → Closing. Returns false if already closing or terminated.
    pub fn begin_close(&mut self) -> bool {
        if *self != RunState::Running {
            return false;
        }
        *self = RunState::Closing;
        true
    }

    /// Closing → Terminated. Returns false from any other state.
    pub fn finish_close(&mut self) -> bool {
        if *self != RunState::Closing {
            return false;
        }
        *self = RunState::Terminated;
        true
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, drives `app` until it closes, and returns the first
    /// fatal setup error, if any.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,
    frame_index: u64,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    run_state: RunState,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            run_state: RunState::Running,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input: InputState::default(),
            frame_index: 0,
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    /// Records a fatal error and shuts everything down.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.close(event_loop);
    }

    /// Running → Closing → Terminated. App resources go first, then the GPU
    /// context, then the window.
    fn close(&mut self, event_loop: &ActiveEventLoop) {
        if self.run_state.begin_close() {
            log::info!("closing");
            self.app.on_exit();
            self.entry = None;
            self.run_state.finish_close();
            log::info!("terminated");
        }
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.run_state != RunState::Running {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(e) => e,
            Err(e) => return self.fail(event_loop, e),
        };

        let app = &mut self.app;
        let ready = entry.with_gpu(|gpu| app.on_gpu_ready(&RenderCtx::from_gpu(gpu)));

        self.entry = Some(entry);
        if let Err(e) = ready {
            return self.fail(event_loop, e.context("application setup failed"));
        }

        log::info!("running");
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.run_state != RunState::Running {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.run_state != RunState::Running {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);

        let Some(entry) = entry.as_mut() else {
            return;
        };

        let control = match &event {
            WindowEvent::CloseRequested => AppControl::Exit,

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let ev = translate_key(key_event.physical_key, key_event.state, key_event.repeat);
                entry.with_input_mut(|input| input.apply_event(&ev));
                app.on_input(&ev)
            }

            WindowEvent::Focused(focused) => {
                let ev = InputEvent::Focused(*focused);
                entry.with_input_mut(|input| input.apply_event(&ev));
                app.on_input(&ev)
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
                AppControl::Continue
            }

            WindowEvent::RedrawRequested => {
                let mut errors = FrameErrors::default();
                let control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: fields.window,
                        gpu: fields.gpu,
                        input: fields.input,
                        frame_index: *fields.frame_index,
                        errors: &mut errors,
                    };

                    let control = app.on_frame(&mut ctx);
                    *fields.frame_index += 1;
                    control
                });
                if let Some(err) = errors.take() {
                    return self.fail(event_loop, err);
                }
                control
            }

            _ => AppControl::Continue,
        };

        if control == AppControl::Exit {
            self.close(event_loop);
        }
    }
}

fn translate_key(physical: PhysicalKey, state: ElementState, repeat: bool) -> InputEvent {
    let state = match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    InputEvent::Key {
        key: map_key(physical),
        state,
        repeat,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

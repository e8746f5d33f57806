use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use orbitgrid_frame::{
    FrameDriver, OrbitCamera, RefreshHandle, RefreshScheduler, RenderContext, Viewport,
};
use orbitgrid_mesh::MAX_SUBDIVISIONS;
use orbitgrid_render_wgpu::{
    Demo, GpuContext, GpuInit, StartupError, SurfaceBackend, SurfaceErrorAction, WgpuRenderer,
};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoKind {
    /// Single colored triangle
    Triangle,
    /// Tessellated ground grid under an orbiting camera
    Grid,
}

#[derive(Parser)]
#[command(name = "orbitgrid-desktop", about = "Orbit camera render demos")]
struct Cli {
    /// Demo to run
    #[arg(long, value_enum, default_value_t = DemoKind::Grid)]
    demo: DemoKind,

    /// Grid cells per edge (grid demo only)
    #[arg(
        long,
        default_value_t = 64,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SUBDIVISIONS as i64)
    )]
    subdivisions: u32,

    /// Initial window width in physical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in physical pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn demo(&self) -> Demo {
        match self.demo {
            DemoKind::Triangle => Demo::Triangle,
            DemoKind::Grid => Demo::Grid {
                subdivisions: self.subdivisions,
            },
        }
    }
}

/// Display refresh scheduling backed by winit redraw requests.
///
/// Holds at most one registration; the frame driver never asks for a
/// second before the first fires or is cancelled. A cancelled
/// registration may still produce a redraw event, which then finds
/// nothing due.
struct WindowScheduler {
    request_redraw: Box<dyn FnMut()>,
    next_id: u64,
    pending: Option<RefreshHandle>,
}

impl WindowScheduler {
    fn new(request_redraw: impl FnMut() + 'static) -> Self {
        Self {
            request_redraw: Box::new(request_redraw),
            next_id: 0,
            pending: None,
        }
    }

    fn for_window(window: Arc<Window>) -> Self {
        Self::new(move || window.request_redraw())
    }

    /// Registration due on this redraw, if the loop asked for one.
    fn take_due(&mut self) -> Option<RefreshHandle> {
        self.pending.take()
    }
}

impl RefreshScheduler for WindowScheduler {
    fn request_refresh(&mut self) -> RefreshHandle {
        let handle = RefreshHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(handle);
        (self.request_redraw)();
        handle
    }

    fn cancel_refresh(&mut self, handle: RefreshHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Everything that exists once the window and GPU are up.
struct Session {
    gpu: GpuContext,
    renderer: WgpuRenderer,
    driver: FrameDriver,
    scheduler: WindowScheduler,
}

impl Session {
    fn redraw(&mut self, t: f64) -> Result<()> {
        let Some(fired) = self.scheduler.take_due() else {
            return Ok(());
        };

        let mut backend = SurfaceBackend::new(&mut self.gpu, &mut self.renderer);
        let err = match self
            .driver
            .on_frame(t, fired, &mut backend, &mut self.scheduler)
        {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };

        match SurfaceErrorAction::for_error(&err) {
            SurfaceErrorAction::Reconfigure => {
                tracing::warn!("surface {err}; reconfiguring");
                self.gpu.reconfigure();
                self.driver.start(&mut self.scheduler);
                Ok(())
            }
            SurfaceErrorAction::SkipFrame => {
                tracing::debug!("surface {err}; skipping frame");
                self.driver.start(&mut self.scheduler);
                Ok(())
            }
            SurfaceErrorAction::Fatal => {
                Err(anyhow::Error::new(err).context("frame submission failed"))
            }
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        let mut backend = SurfaceBackend::new(&mut self.gpu, &mut self.renderer);
        self.driver
            .resize(viewport, &mut backend, &mut self.scheduler);
    }
}

struct GpuApp {
    demo: Demo,
    initial_size: Viewport,
    started: Instant,
    session: Option<Session>,
    exit_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(demo: Demo, initial_size: Viewport) -> Self {
        Self {
            demo,
            initial_size,
            started: Instant::now(),
            session: None,
            exit_error: None,
        }
    }

    fn create_session(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let attrs = Window::default_attributes()
            .with_title(format!("orbitgrid: {}", self.demo.label()))
            .with_inner_size(PhysicalSize::new(
                self.initial_size.width,
                self.initial_size.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let size = window.inner_size();
        let gpu = pollster::block_on(GpuContext::new(
            &instance,
            window.clone(),
            Viewport::new(size.width, size.height),
            &GpuInit::default(),
        ))?;

        let geometry = self.demo.geometry().map_err(StartupError::from)?;
        let renderer =
            WgpuRenderer::new(&gpu.device, gpu.format(), gpu.viewport(), self.demo, &geometry);

        let mut driver = FrameDriver::new(
            OrbitCamera::default(),
            RenderContext::new(gpu.viewport(), renderer.index_count()),
        );
        let mut scheduler = WindowScheduler::for_window(window);
        driver.start(&mut scheduler);

        Ok(Session {
            gpu,
            renderer,
            driver,
            scheduler,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.exit_error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match self.create_session(event_loop) {
            Ok(session) => {
                tracing::info!(demo = self.demo.label(), "render loop started");
                self.session = Some(session);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                session.driver.stop(&mut session.scheduler);
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                session.resize(Viewport::new(new_size.width, new_size.height));
            }
            WindowEvent::RedrawRequested => {
                let t = self.started.elapsed().as_secs_f64() * 1000.0;
                if let Err(err) = session.redraw(t) {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("orbitgrid-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(cli.demo(), Viewport::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    match app.exit_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use orbitgrid_frame::{DebugTextBackend, LoopState};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_grid_demo() {
        let cli = Cli::parse_from(["orbitgrid-desktop"]);
        assert_eq!(cli.demo(), Demo::Grid { subdivisions: 64 });
        assert_eq!((cli.width, cli.height), (1280, 720));
    }

    #[test]
    fn triangle_demo_flag() {
        let cli = Cli::parse_from(["orbitgrid-desktop", "--demo", "triangle"]);
        assert_eq!(cli.demo(), Demo::Triangle);
    }

    fn counting_scheduler() -> (WindowScheduler, Rc<Cell<u32>>) {
        let redraws = Rc::new(Cell::new(0));
        let counter = redraws.clone();
        let scheduler = WindowScheduler::new(move || counter.set(counter.get() + 1));
        (scheduler, redraws)
    }

    #[test]
    fn request_asks_for_redraw_and_becomes_due() {
        let (mut scheduler, redraws) = counting_scheduler();
        let first = scheduler.request_refresh();
        let second = scheduler.request_refresh();
        assert_ne!(first, second);
        assert_eq!(redraws.get(), 2);
        assert_eq!(scheduler.take_due(), Some(second));
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn cancel_only_clears_matching_registration() {
        let (mut scheduler, _) = counting_scheduler();
        let stale = scheduler.request_refresh();
        let current = scheduler.request_refresh();

        scheduler.cancel_refresh(stale);
        assert_eq!(scheduler.pending, Some(current));

        scheduler.cancel_refresh(current);
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn driver_resize_leaves_single_due_registration() {
        let (mut scheduler, redraws) = counting_scheduler();
        let mut backend = DebugTextBackend::new();
        let mut driver = FrameDriver::new(
            OrbitCamera::default(),
            RenderContext::new(Viewport::default(), 6),
        );

        let before = driver.start(&mut scheduler);
        driver.resize(Viewport::new(640, 480), &mut backend, &mut scheduler);

        let due = scheduler.take_due().unwrap();
        assert_ne!(due, before);
        assert_eq!(driver.state(), LoopState::Running(due));
        assert_eq!(redraws.get(), 2);
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn stopped_driver_leaves_nothing_due() {
        let (mut scheduler, _) = counting_scheduler();
        let mut driver = FrameDriver::new(
            OrbitCamera::default(),
            RenderContext::new(Viewport::default(), 6),
        );
        driver.start(&mut scheduler);
        driver.stop(&mut scheduler);
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn subdivisions_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["orbitgrid-desktop", "--subdivisions", "0"]).is_err());
        assert!(Cli::try_parse_from(["orbitgrid-desktop", "--subdivisions", "256"]).is_err());
        let cli = Cli::try_parse_from(["orbitgrid-desktop", "--subdivisions", "255"]).unwrap();
        assert_eq!(cli.subdivisions, 255);
    }
}

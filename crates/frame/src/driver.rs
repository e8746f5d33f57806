use crate::backend::{FrameBackend, FrameSubmission};
use crate::camera::OrbitCamera;
use crate::scheduler::{RefreshHandle, RefreshScheduler};
use crate::uniforms::UniformBlock;
use crate::viewport::Viewport;

/// Per-loop render state threaded through every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub viewport: Viewport,
    /// Length of the static index list built at startup.
    pub index_count: u32,
}

impl RenderContext {
    pub fn new(viewport: Viewport, index_count: u32) -> Self {
        Self {
            viewport,
            index_count,
        }
    }
}

/// Whether the loop currently holds a refresh registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Registered for the next refresh under this handle.
    Running(RefreshHandle),
    /// Not registered: before `start`, after `stop`, mid-resize, or after a
    /// failed submission.
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// The callback's handle is not the current registration.
    Stale,
}

/// Drives the orbit-camera render loop, one callback per display refresh.
#[derive(Debug)]
pub struct FrameDriver {
    camera: OrbitCamera,
    context: RenderContext,
    state: LoopState,
    frames: u64,
}

impl FrameDriver {
    /// Create a suspended driver. Call [`FrameDriver::start`] to register
    /// the first refresh.
    pub fn new(camera: OrbitCamera, context: RenderContext) -> Self {
        Self {
            camera,
            context,
            state: LoopState::Suspended,
            frames: 0,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// Frames successfully submitted since creation.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Register for the next refresh. A running loop keeps its existing
    /// registration.
    pub fn start(&mut self, scheduler: &mut impl RefreshScheduler) -> RefreshHandle {
        if let LoopState::Running(handle) = self.state {
            return handle;
        }
        let handle = scheduler.request_refresh();
        self.state = LoopState::Running(handle);
        tracing::debug!(?handle, "frame loop started");
        handle
    }

    /// Cancel the outstanding registration, if any.
    pub fn stop(&mut self, scheduler: &mut impl RefreshScheduler) {
        if let LoopState::Running(handle) = self.state {
            scheduler.cancel_refresh(handle);
            tracing::debug!(?handle, "frame loop stopped");
        }
        self.state = LoopState::Suspended;
    }

    /// Compute the submission for time `t` without touching the backend or
    /// the scheduler.
    pub fn prepare(&self, t: f64) -> FrameSubmission {
        let view_proj = self
            .camera
            .view_projection(t, self.context.viewport.aspect());
        FrameSubmission {
            uniforms: UniformBlock::new(view_proj, t),
            viewport: self.context.viewport,
            index_count: self.context.index_count,
        }
    }

    /// Refresh callback. Renders the frame for `t` and re-registers.
    ///
    /// Backend errors are returned unchanged; the loop is then left
    /// suspended and the host decides whether to restart it.
    pub fn on_frame<B, S>(
        &mut self,
        t: f64,
        fired: RefreshHandle,
        backend: &mut B,
        scheduler: &mut S,
    ) -> Result<FrameOutcome, B::Error>
    where
        B: FrameBackend,
        S: RefreshScheduler,
    {
        if self.state != LoopState::Running(fired) {
            tracing::trace!(?fired, state = ?self.state, "ignoring stale refresh");
            return Ok(FrameOutcome::Stale);
        }
        // The registration that fired is spent.
        self.state = LoopState::Suspended;

        tracing::trace!(t, "frame");
        let frame = self.prepare(t);
        backend.submit_frame(&frame)?;
        self.frames += 1;

        self.state = LoopState::Running(scheduler.request_refresh());
        Ok(FrameOutcome::Rendered)
    }

    /// Apply a viewport resize: cancel the pending refresh, rebuild
    /// size-dependent targets, then re-register if the loop was running.
    pub fn resize<B, S>(&mut self, viewport: Viewport, backend: &mut B, scheduler: &mut S)
    where
        B: FrameBackend,
        S: RefreshScheduler,
    {
        let was_running = self.is_running();
        if let LoopState::Running(handle) = self.state {
            scheduler.cancel_refresh(handle);
        }
        self.state = LoopState::Suspended;

        backend.resize(viewport);
        self.context.viewport = viewport;

        if was_running {
            self.state = LoopState::Running(scheduler.request_refresh());
        }
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            running = was_running,
            "viewport resized"
        );
    }
}

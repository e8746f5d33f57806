use std::convert::Infallible;

use crate::uniforms::UniformBlock;
use crate::viewport::Viewport;

/// Everything the backend needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSubmission {
    pub uniforms: UniformBlock,
    pub viewport: Viewport,
    /// Draw covers indices `0..index_count` of the static index buffer.
    pub index_count: u32,
}

/// Graphics backend seam consumed by the frame driver.
///
/// The backend never writes the uniform block; it only uploads what it is
/// given.
pub trait FrameBackend {
    type Error;

    /// Upload uniforms, acquire this frame's color target, issue one indexed
    /// draw, and submit.
    fn submit_frame(&mut self, frame: &FrameSubmission) -> Result<(), Self::Error>;

    /// Rebuild size-dependent targets (depth buffer, surface) for `viewport`.
    fn resize(&mut self, viewport: Viewport);
}

/// Debug text backend.
///
/// Records a human-readable line per submitted frame and per resize. Useful
/// for CLI output, logging, and testing the driver without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextBackend {
    lines: Vec<String>,
    last: Option<FrameSubmission>,
    submitted: u64,
}

impl DebugTextBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Remove and return the recorded lines.
    pub fn drain_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    pub fn last_submission(&self) -> Option<&FrameSubmission> {
        self.last.as_ref()
    }

    pub fn submitted(&self) -> u64 {
        self.submitted
    }
}

impl FrameBackend for DebugTextBackend {
    type Error = Infallible;

    fn submit_frame(&mut self, frame: &FrameSubmission) -> Result<(), Infallible> {
        let vp = frame.uniforms.view_projection();
        // Column 3 of the view-projection carries the translation, which
        // changes visibly as the camera orbits.
        let w = vp.w_axis;
        self.lines.push(format!(
            "frame {:>5} t={:>10.2} viewport={}x{} indices={} vp.w=({:.3}, {:.3}, {:.3}, {:.3})",
            self.submitted,
            frame.uniforms.time(),
            frame.viewport.width,
            frame.viewport.height,
            frame.index_count,
            w.x,
            w.y,
            w.z,
            w.w,
        ));
        self.last = Some(*frame);
        self.submitted += 1;
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.lines
            .push(format!("resize {}x{}", viewport.width, viewport.height));
    }
}

//! Frame driver: renderer-agnostic per-frame camera and uniform updates.
//!
//! The driver computes a view-projection matrix from a time value, packs it
//! into a uniform block, hands the frame to a [`FrameBackend`], and
//! re-registers itself with a [`RefreshScheduler`].
//!
//! # Invariants
//! - Camera state is recomputed from the time value each frame, never accumulated.
//! - At most one refresh registration is outstanding per driver.
//! - The driver is the only writer of the uniform block; the backend only reads it.
//!
//! # Workaround
//! Ships a debug text backend and a manual scheduler so the loop can run
//! headless (CLI simulation, tests). The traits are stable; the wgpu backend
//! plugs in without changing the driver.

mod backend;
mod camera;
mod driver;
mod scheduler;
mod uniforms;
mod viewport;

pub use backend::{DebugTextBackend, FrameBackend, FrameSubmission};
pub use camera::OrbitCamera;
pub use driver::{FrameDriver, FrameOutcome, LoopState, RenderContext};
pub use scheduler::{ManualScheduler, RefreshHandle, RefreshScheduler};
pub use uniforms::{UNIFORM_FLOATS, UniformBlock};
pub use viewport::Viewport;

pub fn crate_info() -> &'static str {
    "orbitgrid-frame v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("frame"));
    }
}

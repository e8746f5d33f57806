//! wgpu render backend for the orbit demos.
//!
//! Builds one pipeline for either the colored triangle or the tessellated
//! ground grid, and implements the frame driver's backend seam over a
//! window surface.
//!
//! # Invariants
//! - Geometry buffers are created once and never rewritten.
//! - The uniform buffer is only written from a frame submission.
//! - The depth target always matches the configured surface size.

mod backend;
mod context;
mod error;
mod gpu;
mod scene;
mod shaders;

pub use backend::{SurfaceBackend, SurfaceErrorAction};
pub use context::{GpuContext, GpuInit, PREFERRED_SURFACE_FORMAT, choose_surface_format};
pub use error::StartupError;
pub use gpu::{DEPTH_FORMAT, WgpuRenderer};
pub use scene::{Demo, SceneGeometry};

pub fn crate_info() -> &'static str {
    "orbitgrid-render-wgpu v0.1.0"
}

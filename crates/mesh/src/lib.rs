//! Mesh: static geometry built once at startup.
//!
//! # Invariants
//! - Tessellation is pure: the same subdivision count always yields the
//!   same vertices and indices, bit for bit.
//! - Every emitted index addresses a vertex of the same mesh.
//! - Geometry is immutable once built; the render setup owns it.

mod grid;
mod triangle;

pub use grid::{GridMesh, MAX_SUBDIVISIONS, MeshError, tessellate};
pub use triangle::ColoredTriangle;

pub fn crate_info() -> &'static str {
    "orbitgrid-mesh v0.1.0"
}

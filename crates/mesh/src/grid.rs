use serde::Serialize;
use thiserror::Error;

/// Largest subdivision count whose lattice still fits u16 indices
/// (256 x 256 = 65 536 vertices).
pub const MAX_SUBDIVISIONS: u32 = u16::MAX as u32 / 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("subdivisions must be at least 1")]
    ZeroSubdivisions,
    #[error("{subdivisions} subdivisions produce {vertices} vertices, more than u16 indices can address")]
    TooManyVertices { subdivisions: u32, vertices: u64 },
}

/// Flat square grid in the X-Z plane spanning [-1, 1] on both axes.
///
/// Vertices are laid out row-major over a `resolution x resolution`
/// lattice. Each cell contributes two clockwise triangles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridMesh {
    subdivisions: u32,
    positions: Vec<[f32; 3]>,
    indices: Vec<u16>,
}

impl GridMesh {
    /// Number of cells along one edge.
    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    /// Number of lattice points along one edge.
    pub fn resolution(&self) -> u32 {
        self.subdivisions + 1
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Position of lattice point (x, z).
    pub fn position_at(&self, x: u32, z: u32) -> Option<[f32; 3]> {
        let resolution = self.resolution();
        if x >= resolution || z >= resolution {
            return None;
        }
        self.positions.get((z * resolution + x) as usize).copied()
    }

    /// Consume the mesh, returning positions and indices.
    pub fn into_parts(self) -> (Vec<[f32; 3]>, Vec<u16>) {
        (self.positions, self.indices)
    }
}

/// Tessellate the unit ground square into `subdivisions x subdivisions` cells.
pub fn tessellate(subdivisions: u32) -> Result<GridMesh, MeshError> {
    if subdivisions == 0 {
        return Err(MeshError::ZeroSubdivisions);
    }
    if subdivisions > MAX_SUBDIVISIONS {
        let resolution = u64::from(subdivisions) + 1;
        return Err(MeshError::TooManyVertices {
            subdivisions,
            vertices: resolution * resolution,
        });
    }
    let resolution = subdivisions + 1;

    let step = 2.0 / subdivisions as f32;

    let mut positions = Vec::with_capacity((resolution * resolution) as usize);
    for z in 0..resolution {
        for x in 0..resolution {
            positions.push([x as f32 * step - 1.0, 0.0, z as f32 * step - 1.0]);
        }
    }

    // Bounded by MAX_SUBDIVISIONS, so every corner fits u16.
    let stride = resolution as u16;
    let mut indices = Vec::with_capacity((subdivisions * subdivisions * 6) as usize);
    for z in 0..subdivisions as u16 {
        for x in 0..subdivisions as u16 {
            let p0 = z * stride + x;
            let p1 = p0 + 1;
            let p2 = p1 + stride;
            let p3 = p0 + stride;
            indices.extend_from_slice(&[p0, p1, p2, p0, p2, p3]);
        }
    }

    tracing::debug!(
        subdivisions,
        vertices = positions.len(),
        indices = indices.len(),
        "tessellated grid"
    );

    Ok(GridMesh {
        subdivisions,
        positions,
        indices,
    })
}

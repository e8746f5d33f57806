use orbitgrid_mesh::{ColoredTriangle, MeshError, tessellate};

use crate::shaders;

/// Which demo to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// A single colored triangle in clip space.
    Triangle,
    /// A tessellated ground plane seen from the orbit camera.
    Grid { subdivisions: u32 },
}

/// CPU-side geometry for one demo, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex colors, bound at vertex slot 1 when present.
    pub colors: Option<Vec<[f32; 3]>>,
    pub indices: Vec<u16>,
}

impl SceneGeometry {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

impl Demo {
    pub fn label(&self) -> &'static str {
        match self {
            Demo::Triangle => "triangle",
            Demo::Grid { .. } => "grid",
        }
    }

    pub fn shader_source(&self) -> &'static str {
        match self {
            Demo::Triangle => shaders::TRIANGLE_SHADER,
            Demo::Grid { .. } => shaders::GRID_SHADER,
        }
    }

    /// Build the static geometry. Runs once at startup.
    pub fn geometry(&self) -> Result<SceneGeometry, MeshError> {
        match *self {
            Demo::Triangle => {
                let tri = ColoredTriangle::new();
                Ok(SceneGeometry {
                    positions: tri.positions.to_vec(),
                    colors: Some(tri.colors.to_vec()),
                    indices: tri.indices.to_vec(),
                })
            }
            Demo::Grid { subdivisions } => {
                let (positions, indices) = tessellate(subdivisions)?.into_parts();
                Ok(SceneGeometry {
                    positions,
                    colors: None,
                    indices,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_geometry_has_colors() {
        let geo = Demo::Triangle.geometry().unwrap();
        assert_eq!(geo.positions.len(), 3);
        assert_eq!(geo.colors.as_ref().map(Vec::len), Some(3));
        assert_eq!(geo.index_count(), 3);
    }

    #[test]
    fn grid_geometry_matches_tessellation() {
        let geo = Demo::Grid { subdivisions: 8 }.geometry().unwrap();
        assert_eq!(geo.positions.len(), 81);
        assert_eq!(geo.index_count(), 384);
        assert!(geo.colors.is_none());
    }

    #[test]
    fn grid_rejects_zero_subdivisions() {
        let err = Demo::Grid { subdivisions: 0 }.geometry().unwrap_err();
        assert_eq!(err, MeshError::ZeroSubdivisions);
    }

    #[test]
    fn shader_entry_points_present() {
        for demo in [Demo::Triangle, Demo::Grid { subdivisions: 1 }] {
            let src = demo.shader_source();
            assert!(src.contains("fn vs_main"), "{}", demo.label());
            assert!(src.contains("fn fs_main"), "{}", demo.label());
            assert!(src.contains("@group(0) @binding(0)"));
        }
    }
}

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Number of f32 values in a [`UniformBlock`].
pub const UNIFORM_FLOATS: usize = 20;

/// Per-frame shader parameters, uploaded as raw bytes.
///
/// Float offset 0 holds the column-major view-projection matrix, offset 16
/// the auxiliary vector. Only `aux[0]` carries data (the frame time); the
/// rest stays zero.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    pub view_proj: [[f32; 4]; 4],
    pub aux: [f32; 4],
}

impl Default for UniformBlock {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            aux: [0.0; 4],
        }
    }
}

impl UniformBlock {
    pub fn new(view_proj: Mat4, time: f64) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            aux: [time as f32, 0.0, 0.0, 0.0],
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view_proj)
    }

    pub fn time(&self) -> f32 {
        self.aux[0]
    }

    pub fn as_floats(&self) -> &[f32; UNIFORM_FLOATS] {
        bytemuck::cast_ref(self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

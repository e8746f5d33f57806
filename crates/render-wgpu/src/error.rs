use thiserror::Error;

/// Unmet startup precondition. Raised before the frame loop starts; there
/// is no recovery path.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("graphics surface is not supported on this platform: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("unable to request a GPU adapter")]
    NoAdapter,
    #[error("unable to initialize the GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("the GPU surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("invalid scene geometry: {0}")]
    Geometry(#[from] orbitgrid_mesh::MeshError),
}

use orbitgrid_frame::{FrameBackend, FrameSubmission, Viewport};

use crate::context::GpuContext;
use crate::gpu::WgpuRenderer;

/// What the host should do after a failed frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Reconfigure the surface and restart the loop.
    Reconfigure,
    /// Transient; restart the loop without reconfiguring.
    SkipFrame,
    /// Give up and exit.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn for_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
            _ => Self::Fatal,
        }
    }
}

/// Frame backend over a window surface, borrowed for one callback.
pub struct SurfaceBackend<'a> {
    gpu: &'a mut GpuContext,
    renderer: &'a mut WgpuRenderer,
}

impl<'a> SurfaceBackend<'a> {
    pub fn new(gpu: &'a mut GpuContext, renderer: &'a mut WgpuRenderer) -> Self {
        Self { gpu, renderer }
    }
}

impl FrameBackend for SurfaceBackend<'_> {
    type Error = wgpu::SurfaceError;

    fn submit_frame(&mut self, frame: &FrameSubmission) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let size = output.texture.size();

        self.renderer.render(
            &self.gpu.device,
            &self.gpu.queue,
            &view,
            Viewport::new(size.width, size.height),
            frame,
        );

        output.present();
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.gpu.resize(viewport);
        self.renderer.resize(&self.gpu.device, viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_error_policy() {
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigure
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigure
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Other),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }
}

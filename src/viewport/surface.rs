//! Seams between the viewport and the window system / GPU

use std::sync::Arc;

use crate::error::Result;
use crate::gfx::camera::PerspectiveCamera;
use crate::gfx::scene::Scene;

/// Anything with a client area the viewport can fill
pub trait Container {
    /// Client area in physical pixels
    fn client_size(&self) -> (u32, u32);
}

impl Container for winit::window::Window {
    fn client_size(&self) -> (u32, u32) {
        self.inner_size().into()
    }
}

impl<T: Container + ?Sized> Container for Arc<T> {
    fn client_size(&self) -> (u32, u32) {
        (**self).client_size()
    }
}

/// Drawing target owned by the viewport
pub trait RenderSurface {
    /// Extra layer drawn on top of the scene, such as a GUI
    type Overlay;

    fn set_size(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Draws and presents one frame
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        overlay: Option<&mut Self::Overlay>,
    ) -> Result<()>;
}

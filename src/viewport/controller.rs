//! Viewport lifecycle
//!
//! [`ViewportBuilder`] collects the parts of a viewport and fails fast if one
//! is missing. The resulting [`ViewportController`] always has a camera and a
//! surface, and drives one frame per call to [`ViewportController::frame`].

use std::time::Duration;

use log::debug;

use super::resize::ResizeSubscription;
use super::surface::{Container, RenderSurface};
use crate::error::{Result, ViewerError};
use crate::gfx::camera::{CameraSettings, PerspectiveCamera};
use crate::gfx::scene::Scene;

/// Per-frame hook run before the camera update and render
pub trait SceneUpdate {
    fn update(&mut self, elapsed: Duration, scene: &mut Scene);
}

impl<F> SceneUpdate for F
where
    F: FnMut(Duration, &mut Scene),
{
    fn update(&mut self, elapsed: Duration, scene: &mut Scene) {
        self(elapsed, scene)
    }
}

pub struct ViewportBuilder<S, C> {
    surface: Option<S>,
    container: Option<C>,
    resize_events: Option<ResizeSubscription>,
    camera: CameraSettings,
    on_update: Option<Box<dyn SceneUpdate>>,
}

impl<S: RenderSurface, C: Container> Default for ViewportBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface, C: Container> ViewportBuilder<S, C> {
    pub fn new() -> Self {
        Self {
            surface: None,
            container: None,
            resize_events: None,
            camera: CameraSettings::default(),
            on_update: None,
        }
    }

    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn container(mut self, container: C) -> Self {
        self.container = Some(container);
        self
    }

    pub fn resize_events(mut self, subscription: ResizeSubscription) -> Self {
        self.resize_events = Some(subscription);
        self
    }

    pub fn camera(mut self, settings: CameraSettings) -> Self {
        self.camera = settings;
        self
    }

    pub fn on_update(mut self, update: impl SceneUpdate + 'static) -> Self {
        self.on_update = Some(Box::new(update));
        self
    }

    /// Assembles the controller and sizes it to the container
    pub fn build(self) -> Result<ViewportController<S, C>> {
        let surface = self
            .surface
            .ok_or(ViewerError::MissingViewportPart("render surface"))?;
        let container = self
            .container
            .ok_or(ViewerError::MissingViewportPart("container"))?;
        let resize_events = self
            .resize_events
            .ok_or(ViewerError::MissingViewportPart("resize subscription"))?;

        let mut controller = ViewportController {
            camera: PerspectiveCamera::new(self.camera),
            surface,
            container,
            resize_events,
            on_update: self.on_update,
            last_elapsed: Duration::ZERO,
            frames: 0,
        };
        controller.resize();

        Ok(controller)
    }
}

pub struct ViewportController<S, C> {
    camera: PerspectiveCamera,
    surface: S,
    container: C,
    resize_events: ResizeSubscription,
    on_update: Option<Box<dyn SceneUpdate>>,
    last_elapsed: Duration,
    frames: u64,
}

impl<S: RenderSurface, C: Container> ViewportController<S, C> {
    /// Matches the camera aspect and surface size to the container
    ///
    /// Zero-area containers (a minimised window) are ignored.
    pub fn resize(&mut self) {
        let (width, height) = self.container.client_size();
        if width == 0 || height == 0 {
            debug!("ignoring zero-area resize to {}x{}", width, height);
            return;
        }

        self.camera.resize_projection(width, height);
        self.camera.update_view_proj();
        self.surface.set_size(width, height);
        debug!("viewport resized to {}x{} (aspect {:.3})", width, height, self.camera.aspect);
    }

    /// Runs one frame: pending resizes, the update hook, then one render
    ///
    /// `elapsed` is time since start; values earlier than the previous frame
    /// are raised to it so the hook never sees time run backwards.
    pub fn frame(
        &mut self,
        elapsed: Duration,
        scene: &mut Scene,
        overlay: Option<&mut S::Overlay>,
    ) -> Result<()> {
        if self.resize_events.drain() > 0 {
            self.resize();
        }

        let elapsed = elapsed.max(self.last_elapsed);
        self.last_elapsed = elapsed;

        if let Some(update) = self.on_update.as_mut() {
            update.update(elapsed, scene);
        }

        self.camera.update_view_proj();
        self.frames += 1;
        self.surface.render(scene, &self.camera, overlay)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::Fog;
    use crate::viewport::resize::{resize_channel, ResizeNotifier};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakeContainer(Rc<Cell<(u32, u32)>>);

    impl FakeContainer {
        fn new(width: u32, height: u32) -> Self {
            Self(Rc::new(Cell::new((width, height))))
        }

        fn set(&self, width: u32, height: u32) {
            self.0.set((width, height));
        }
    }

    impl Container for FakeContainer {
        fn client_size(&self) -> (u32, u32) {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        size: (u32, u32),
        renders: Vec<RenderRecord>,
        fail: bool,
    }

    struct RenderRecord {
        aspect: f32,
        fogged: bool,
    }

    impl RenderSurface for RecordingSurface {
        type Overlay = ();

        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera, _: Option<&mut ()>) -> Result<()> {
            if self.fail {
                return Err(ViewerError::Frame(wgpu::SurfaceError::OutOfMemory));
            }
            self.renders.push(RenderRecord {
                aspect: camera.aspect,
                fogged: scene.fog.is_some(),
            });
            Ok(())
        }
    }

    fn viewport(
        width: u32,
        height: u32,
    ) -> (ViewportController<RecordingSurface, FakeContainer>, FakeContainer, ResizeNotifier) {
        let container = FakeContainer::new(width, height);
        let (notifier, subscription) = resize_channel();
        let controller = ViewportBuilder::new()
            .surface(RecordingSurface::default())
            .container(container.clone())
            .resize_events(subscription)
            .build()
            .expect("all parts supplied");
        (controller, container, notifier)
    }

    #[test]
    fn missing_parts_fail_the_build() {
        let (_, subscription) = resize_channel();
        let missing_surface = ViewportBuilder::<RecordingSurface, FakeContainer>::new()
            .container(FakeContainer::new(10, 10))
            .resize_events(subscription)
            .build();
        assert!(matches!(
            missing_surface,
            Err(ViewerError::MissingViewportPart("render surface"))
        ));

        let missing_container = ViewportBuilder::<RecordingSurface, FakeContainer>::new()
            .surface(RecordingSurface::default())
            .build();
        assert!(matches!(
            missing_container,
            Err(ViewerError::MissingViewportPart("container"))
        ));
    }

    #[test]
    fn build_sizes_the_surface() {
        let (controller, _, _) = viewport(800, 600);
        assert_eq!(controller.surface().size(), (800, 600));
        assert!((controller.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(controller.camera().fovy, cgmath::Deg(75.0));
    }

    #[test]
    fn resize_notification_is_applied_on_the_next_frame() {
        let (mut controller, container, notifier) = viewport(800, 600);
        let mut scene = Scene::new();

        container.set(1000, 400);
        notifier.notify();
        notifier.notify();
        controller.frame(Duration::ZERO, &mut scene, None).unwrap();

        assert_eq!(controller.camera().aspect, 2.5);
        assert_eq!(controller.surface().size(), (1000, 400));
        assert_eq!(controller.surface().renders[0].aspect, 2.5);
    }

    #[test]
    fn zero_area_container_keeps_the_last_size() {
        let (mut controller, container, _) = viewport(800, 600);
        container.set(0, 0);
        controller.resize();

        assert_eq!(controller.surface().size(), (800, 600));
        assert!((controller.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn each_frame_renders_once_after_the_update_hook() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let (_, subscription) = resize_channel();

        let mut controller = ViewportBuilder::new()
            .surface(RecordingSurface::default())
            .container(FakeContainer::new(640, 480))
            .resize_events(subscription)
            .on_update(move |elapsed: Duration, scene: &mut Scene| {
                log.borrow_mut().push(elapsed);
                scene.fog = Some(Fog {
                    color: [0.0; 3],
                    near: 1.0,
                    far: 3.5,
                });
            })
            .build()
            .unwrap();
        let mut scene = Scene::new();

        controller.frame(Duration::from_secs(2), &mut scene, None).unwrap();
        controller.frame(Duration::from_secs(1), &mut scene, None).unwrap();

        assert_eq!(controller.frame_count(), 2);
        assert_eq!(controller.surface().renders.len(), 2);
        assert!(controller.surface().renders[0].fogged);
        assert_eq!(*seen.borrow(), vec![Duration::from_secs(2), Duration::from_secs(2)]);
    }

    #[test]
    fn surface_errors_propagate() {
        let (mut controller, _, _) = viewport(320, 240);
        controller.surface_mut().fail = true;

        let result = controller.frame(Duration::ZERO, &mut Scene::new(), None);
        assert!(matches!(result, Err(ViewerError::Frame(wgpu::SurfaceError::OutOfMemory))));
    }
}

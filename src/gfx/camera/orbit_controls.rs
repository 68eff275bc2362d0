use cgmath::*;
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::perspective::PerspectiveCamera;

#[derive(Debug, Clone, Copy)]
pub struct OrbitBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_distance: 0.2,
            max_distance: 50.0,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.01,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}

/// Spherical orbit around a target point
///
/// Left drag rotates, right drag pans the target, the wheel zooms. The
/// controls own the orbit state and write eye and target into a camera with
/// [`OrbitControls::apply`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub target: Vector3<f32>,
    pub bounds: OrbitBounds,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    rotating: bool,
    panning: bool,
}

impl OrbitControls {
    /// Starts orbiting from the camera's current placement
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.magnitude().max(f32::EPSILON);

        Self {
            distance,
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            yaw: offset.x.atan2(offset.z),
            target: camera.target.to_vec(),
            bounds: OrbitBounds::default(),
            rotate_speed: 0.005,
            pan_speed: 0.002,
            zoom_speed: 0.1,
            rotating: false,
            panning: false,
        }
    }

    pub fn eye(&self) -> Vector3<f32> {
        Vector3::new(
            self.distance * self.yaw.sin() * self.pitch.cos(),
            self.distance * self.pitch.sin(),
            self.distance * self.yaw.cos() * self.pitch.cos(),
        ) + self.target
    }

    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.eye = Point3::from_vec(self.eye());
        camera.target = Point3::from_vec(self.target);
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.rotate_speed;
        self.pitch = (self.pitch + dy * self.rotate_speed)
            .clamp(self.bounds.min_pitch, self.bounds.max_pitch);
    }

    /// Moves the target in the view plane, scaled by distance
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * self.pan_speed;
        self.target += right * (-dx * scale) + up * (dy * scale);
    }

    /// Positive steps move away from the target
    pub fn zoom(&mut self, steps: f32) {
        let factor = (1.0 + self.zoom_speed).powf(steps);
        self.distance =
            (self.distance * factor).clamp(self.bounds.min_distance, self.bounds.max_distance);
    }

    /// Tracks button state and wheel input; returns true if the view changed
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.rotating = pressed,
                    MouseButton::Right => self.panning = pressed,
                    _ => (),
                }
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 50.0,
                };
                self.zoom(steps);
                true
            }
            WindowEvent::Focused(false) => {
                self.rotating = false;
                self.panning = false;
                false
            }
            _ => false,
        }
    }

    /// Applies raw mouse motion while a button is held
    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        let DeviceEvent::MouseMotion { delta } = event else {
            return false;
        };
        let (dx, dy) = (delta.0 as f32, delta.1 as f32);

        if self.rotating {
            self.rotate(dx, dy);
            true
        } else if self.panning {
            self.pan(dx, dy);
            true
        } else {
            false
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.rotating || self.panning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::CameraSettings;

    fn controls() -> (PerspectiveCamera, OrbitControls) {
        let camera = PerspectiveCamera::new(CameraSettings::default());
        let controls = OrbitControls::from_camera(&camera);
        (camera, controls)
    }

    #[test]
    fn starting_orbit_reproduces_the_camera() {
        let (camera, controls) = controls();
        assert!((controls.distance - 2.0).abs() < 1e-6);
        let eye = controls.eye();
        assert!((eye - camera.eye.to_vec()).magnitude() < 1e-5);
    }

    #[test]
    fn rotation_keeps_distance_and_clamps_pitch() {
        let (_, mut controls) = controls();
        controls.rotate(120.0, 10_000.0);

        assert!((controls.eye().magnitude() - 2.0).abs() < 1e-4);
        assert_eq!(controls.pitch, controls.bounds.max_pitch);
    }

    #[test]
    fn zoom_is_bounded() {
        let (_, mut controls) = controls();
        controls.zoom(1_000.0);
        assert_eq!(controls.distance, controls.bounds.max_distance);
        controls.zoom(-1_000.0);
        assert_eq!(controls.distance, controls.bounds.min_distance);
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let (mut camera, mut controls) = controls();
        controls.pan(100.0, 0.0);
        controls.apply(&mut camera);

        assert!(controls.target.x.abs() > 0.0);
        let offset = camera.eye - camera.target;
        assert!((offset - Vector3::new(0.0, 0.0, 2.0)).magnitude() < 1e-5);
    }

    #[test]
    fn motion_without_a_button_is_ignored() {
        let (_, mut controls) = controls();
        let moved = controls.process_device_event(&DeviceEvent::MouseMotion { delta: (5.0, 5.0) });
        assert!(!moved);
        assert_eq!(controls.yaw, 0.0);
    }
}

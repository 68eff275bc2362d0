use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Lens and placement used to create a [`PerspectiveCamera`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fovy: Deg(75.0),
            znear: 0.1,
            zfar: 100.0,
            eye: Point3::new(0.0, 0.0, 2.0),
            target: Point3::new(0.0, 0.0, 0.0),
        }
    }
}

/// Per-frame camera data as laid out for the shader
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// Eye position in homogeneous coordinates (keeps 16 byte alignment)
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
            view: Matrix4::identity().into(),
        }
    }
}

/// Right-handed, Y-up perspective camera
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl PerspectiveCamera {
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            eye: settings.eye,
            target: settings.target,
            up: Vector3::unit_y(),
            aspect: 1.0,
            fovy: settings.fovy,
            znear: settings.znear,
            zfar: settings.zfar,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    /// Sets the aspect ratio to `width / height`; zero heights are ignored
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Refreshes the uniform after the eye, target or aspect changed
    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = self.build_view_projection_matrix().into();
        self.uniform.view = self.view_matrix().into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_lens() {
        let camera = PerspectiveCamera::new(CameraSettings::default());
        assert_eq!(camera.fovy, Deg(75.0));
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 100.0);
        assert_eq!(camera.eye, Point3::new(0.0, 0.0, 2.0));
        assert_eq!(camera.uniform.view_position, [0.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn origin_projects_to_the_middle_of_the_depth_range() {
        let mut camera = PerspectiveCamera::new(CameraSettings::default());
        camera.resize_projection(1000, 400);
        assert_eq!(camera.aspect, 2.5);

        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn zero_height_keeps_the_previous_aspect() {
        let mut camera = PerspectiveCamera::new(CameraSettings::default());
        camera.resize_projection(800, 600);
        camera.resize_projection(800, 0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }
}

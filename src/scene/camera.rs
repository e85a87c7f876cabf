use glam::{Affine3A, Mat4, Vec3, Vec4Swizzles};
use uuid::Uuid;

/// Width of the virtual sensor the focal length is measured against (mm).
pub const DEFAULT_SENSOR_WIDTH: f32 = 36.0;

/// Perspective camera described physically (focal length over sensor width).
#[derive(Debug, Clone)]
pub struct Camera {
    pub uuid: Uuid,

    /// Focal length in millimetres.
    pub lens: f32,
    pub sensor_width: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Opacity of the frame mask drawn outside the camera bounds in previews.
    pub passepartout_alpha: f32,

    // 缓存的矩阵 renderer只读
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(lens: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            uuid: Uuid::new_v4(),
            lens,
            sensor_width: DEFAULT_SENSOR_WIDTH,
            aspect,
            near,
            far,
            passepartout_alpha: 0.5,

            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    /// Field of view (radians) along the wider image axis.
    #[must_use]
    pub fn fov(&self) -> f32 {
        2.0 * (self.sensor_width / (2.0 * self.lens)).atan()
    }

    /// Vertical field of view (radians), which is what the projection uses.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        if self.aspect >= 1.0 {
            2.0 * ((self.fov() * 0.5).tan() / self.aspect).atan()
        } else {
            self.fov()
        }
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(self.fov_y(), self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    pub fn update_view_projection(&mut self, world_transform: &Affine3A) {
        // View Matrix = World Inverse
        self.view_matrix = Mat4::from(*world_transform).inverse();
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    /// Projects a world point to normalised device coordinates.
    /// Returns `None` for points behind the camera.
    #[must_use]
    pub fn project(&self, world_point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection_matrix * world_point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.xyz() / clip.w)
    }
}

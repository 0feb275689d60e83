use foundation::math::{Mat4, Vec2, Vec3};
use scene::picking::Ray;

use crate::pose::CameraPose;
use crate::viewport::Viewport;

/// Perspective camera with a look-at pose.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub pose: CameraPose,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            pose: CameraPose::overview(),
            fov_y_deg: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn fov_y_rad(&self) -> f64 {
        self.fov_y_deg.to_radians()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.pose.position, self.pose.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_rad(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection().mul(&self.view())
    }

    /// Picking ray from the camera position through an NDC point.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inv = self.view_proj().inverse()?;
        let far = inv.transform_point_affine(Vec3::new(ndc.x, ndc.y, 1.0))?;
        let dir = (far - self.pose.position).normalize()?;
        Some(Ray::new(self.pose.position, dir))
    }

    /// Picking ray through a client-space pointer position.
    pub fn ray_through_client(&self, viewport: &Viewport, client: Vec2) -> Option<Ray> {
        let ndc = viewport.to_ndc(client)?;
        self.ray_through_ndc(ndc)
    }

    /// Viewport-local pixel position of a world point.
    ///
    /// Clip space -> NDC -> pixels, with Y flipped. `None` for points behind
    /// the camera.
    pub fn project_to_viewport(&self, world: Vec3, viewport: &Viewport) -> Option<Vec2> {
        let ndc = self.view_proj().project_point(world)?;
        Some(viewport.ndc_to_local(Vec2::new(ndc.x, ndc.y)))
    }
}

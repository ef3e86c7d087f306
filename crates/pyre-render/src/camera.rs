//! Camera: view/projection matrix owner.

use glam::{Mat4, Vec3};

/// A look-at camera with a perspective projection.
///
/// `update()` recomputes the view matrix from eye/target/up each frame so
/// live repositioning takes effect; `set_aspect_ratio` plus
/// `update_projection_matrix` recompute the projection on resize.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Create a camera looking from `eye` towards `target`, +Y up.
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            eye,
            target,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update();
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the view matrix from the current eye/target/up.
    pub fn update(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.target, self.up);
    }

    /// Set width / height. Call `update_projection_matrix` to apply.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Recompute the projection matrix (GL clip-space convention).
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov_y, self.aspect_ratio, self.near, self.far);
    }

    /// Combined projection * view, reflecting the most recent `update()`
    /// and `update_projection_matrix()` calls.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_maps_target_onto_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let target_in_view = camera.view.transform_point3(Vec3::ZERO);
        assert!((target_in_view.x).abs() < 1e-6);
        assert!((target_in_view.y).abs() < 1e-6);
        assert!((target_in_view.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_update_reflects_live_repositioning() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let before = camera.view_projection_matrix();
        camera.eye = Vec3::new(3.0, 1.0, 5.0);
        camera.update();
        let after = camera.view_projection_matrix();
        assert_ne!(before, after);
    }

    #[test]
    fn test_projection_tracks_aspect_ratio() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let square = camera.view_projection_matrix();
        camera.set_aspect_ratio(1920.0 / 1080.0);
        // Not applied until update_projection_matrix.
        assert_eq!(square, camera.view_projection_matrix());
        camera.update_projection_matrix();
        assert_ne!(square, camera.view_projection_matrix());
    }

    #[test]
    fn test_view_projection_is_product() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 5.0), Vec3::ZERO);
        let vp = camera.view_projection_matrix();
        let expected = camera.projection * camera.view;
        assert_eq!(vp.to_cols_array(), expected.to_cols_array());
    }

    #[test]
    fn test_point_between_planes_lands_in_clip_range() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let clip = camera.view_projection_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc_z = clip.z / clip.w;
        assert!((-1.0..=1.0).contains(&ndc_z), "ndc z = {ndc_z}");
    }
}

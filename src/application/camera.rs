use macroquad::prelude::*;

use crate::domain::Ray;

const FOVY_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.01;
const Z_FAR: f32 = 10000.0;

/// Orbit camera circling the lattice centre
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            yaw: 0.8,
            pitch: 0.6,
            distance: 25.0,
        }
    }

    /// Pull back far enough to see a lattice of side `bound`
    pub fn frame_lattice(&mut self, bound: i32, cell_size: f32) {
        self.distance = (bound as f32 * cell_size * 2.2).clamp(3.0, 200.0);
    }

    /// Zoom in by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.distance = (self.distance / factor).clamp(3.0, 200.0);
    }

    /// Zoom out by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(3.0, 200.0);
    }

    /// Rotate around the target by a mouse delta in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * 0.01;
        self.pitch = (self.pitch + dy * 0.01).clamp(-1.5, 1.5);
    }

    pub fn eye(&self) -> Vec3 {
        self.distance
            * vec3(
                self.pitch.cos() * self.yaw.cos(),
                self.pitch.sin(),
                self.pitch.cos() * self.yaw.sin(),
            )
    }

    pub fn to_camera3d(&self, aspect: f32) -> Camera3D {
        Camera3D {
            position: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: FOVY_DEGREES.to_radians(),
            aspect: Some(aspect),
            ..Default::default()
        }
    }

    fn view_projection(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh_gl(FOVY_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
        projection * view
    }

    /// World ray through a screen pixel
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = 2.0 * screen_x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_y / height;
        let inverse = self.view_projection(width / height).inverse();

        let near = inverse.project_point3(vec3(ndc_x, ndc_y, -1.0));
        let far = inverse.project_point3(vec3(ndc_x, ndc_y, 1.0));
        Ray::towards(near, far)
    }

    /// Reset camera to default
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new();
        let ray = camera.screen_ray(400.0, 300.0, 800.0, 600.0);
        let expected = (-camera.eye()).normalize();

        assert!(ray.direction.dot(expected) > 0.9999);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.zoom_in(2.0);
        }
        assert_eq!(camera.distance, 3.0);
        for _ in 0..100 {
            camera.zoom_out(2.0);
        }
        assert_eq!(camera.distance, 200.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new();
        camera.orbit(0.0, 10_000.0);
        assert_eq!(camera.pitch, 1.5);
    }
}

use nalgebra::{vector, Point3, Vector3};

use crate::ray::Ray;

/// Pinhole camera looking down -z, parameterized by a vertical field of view.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Vertical field of view in degrees.
    pub vfov: f32,
    pub focal_length: f32,
}

impl Camera {
    pub fn new(position: Point3<f32>, vfov: f32) -> Self {
        Camera {
            position,
            vfov,
            focal_length: 1.0,
        }
    }

    /// Computes the aspect-corrected viewport basis for a frame of the given
    /// pixel dimensions. Done once per frame, shared by every pixel.
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        let image_width = width as f32;
        let image_height = height as f32;
        let aspect_ratio = image_width / image_height;

        let vertical = 2.0 * (self.vfov.to_radians() / 2.0).tan() * self.focal_length;
        let horizontal = vertical * aspect_ratio;

        let vertical = vector![0.0, vertical, 0.0];
        let horizontal = vector![horizontal, 0.0, 0.0];
        let depth = vector![0.0, 0.0, self.focal_length];

        let lower_left_corner = self.position - vertical / 2.0 - horizontal / 2.0 - depth;

        Viewport {
            origin: self.position,
            image_width,
            image_height,
            horizontal,
            vertical,
            lower_left_corner,
        }
    }
}

/// Per-frame ray emission basis: the image plane spanned by `horizontal` and
/// `vertical` from `lower_left_corner`, addressed by (u, v) in [0, 1]².
pub struct Viewport {
    pub origin: Point3<f32>,
    pub image_width: f32,
    pub image_height: f32,
    pub horizontal: Vector3<f32>,
    pub vertical: Vector3<f32>,
    pub lower_left_corner: Point3<f32>,
}

impl Viewport {
    pub fn emit_ray(&self, u: f32, v: f32) -> Ray {
        let target = self.lower_left_corner + u * self.horizontal + v * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    #[test]
    fn center_ray_points_down_negative_z() {
        let camera = Camera::new(point![0.0, 0.0, 0.0], 90.0);
        let viewport = camera.viewport(800, 600);
        let ray = viewport.emit_ray(0.5, 0.5);
        assert!((ray.direction - vector![0.0, 0.0, -1.0]).magnitude() < 1e-6);
        assert_eq!(ray.origin, point![0.0, 0.0, 0.0]);
    }

    #[test]
    fn viewport_is_aspect_corrected() {
        let camera = Camera::new(point![0.0, 0.0, 0.0], 90.0);
        let viewport = camera.viewport(800, 600);
        let aspect = viewport.horizontal.magnitude() / viewport.vertical.magnitude();
        assert!((aspect - 800.0 / 600.0).abs() < 1e-5);
        // 90 degrees vfov at focal length 1 spans a height of 2.
        assert!((viewport.vertical.magnitude() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn corner_rays_bracket_the_center() {
        let camera = Camera::new(point![1.0, 2.0, 3.0], 60.0);
        let viewport = camera.viewport(100, 100);
        let low = viewport.emit_ray(0.0, 0.0);
        let high = viewport.emit_ray(1.0, 1.0);
        assert!(low.direction.y < 0.0 && high.direction.y > 0.0);
        assert!(low.direction.x < 0.0 && high.direction.x > 0.0);
    }
}

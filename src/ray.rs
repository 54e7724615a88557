use nalgebra::{Point3, Vector3};

/// Normalizes `v`, passing zero-length vectors through unchanged rather than
/// producing NaN components.
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(0.0).unwrap_or(v)
}

/// A half-line with unit-length direction.
///
/// The direction is normalized at construction; every consumer may rely on
/// `|direction| == 1` without re-normalizing.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: normalize_or_zero(direction),
        }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// A resolved ray-surface intersection.
///
/// `normal` always opposes the incoming ray direction, so shading code sees a
/// single convention whether the ray arrived from outside or inside the
/// surface. Produced per intersection test and owned by the caller.
#[derive(Copy, Clone, Debug)]
pub struct RayHit {
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
    pub t: f32,
    pub material: usize,
}

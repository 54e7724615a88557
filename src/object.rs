use nalgebra::Point3;
use thiserror::Error;

use crate::material::Material;
use crate::ray::{Ray, RayHit};

/// Capacity of a scene's material table. Indices stay small and dense so the
/// surrounding application can use them in per-object arithmetic.
pub const MAX_MATERIALS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("material table full (64 entries)")]
    MaterialTableFull,
}

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
    pub material: usize,
}

impl Sphere {
    /// `radius` must be positive and `material` must name a registered
    /// material; neither is validated here.
    pub fn new(center: Point3<f32>, radius: f32, material: usize) -> Self {
        Sphere { center, radius, material }
    }

    /// Ray-sphere intersection over the inclusive window `[t_min, t_max]`.
    pub fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<RayHit> {
        let oc = ray.origin - self.center;
        // Ray directions are unit length by construction, but a is computed
        // generally in case a caller hands over a denormalized ray.
        let a = ray.direction.magnitude_squared();
        let half_b = oc.dot(&ray.direction);
        let c = oc.magnitude_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Near root first, far root as fallback.
        let mut root = (-half_b - sqrtd) / a;
        if root < t_min || root > t_max {
            root = (-half_b + sqrtd) / a;
            if root < t_min || root > t_max {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;
        // The reported normal always opposes the incoming ray, flipping when
        // the ray exits from inside the sphere.
        let normal = if ray.direction.dot(&outward_normal) > 0.0 {
            -outward_normal
        } else {
            outward_normal
        };

        Some(RayHit {
            point,
            normal,
            t: root,
            material: self.material,
        })
    }
}

/// An ordered sphere list plus a fixed-capacity material table.
///
/// Populated during setup and treated as read-only while rendering, so
/// workers may share it freely.
#[derive(Default)]
pub struct Scene {
    materials: Vec<Material>,
    spheres: Vec<Sphere>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    /// Registers a material and returns its table index. Indices are assigned
    /// monotonically; materials are never removed.
    pub fn add_material(&mut self, material: Material) -> Result<usize, SceneError> {
        if self.materials.len() >= MAX_MATERIALS {
            return Err(SceneError::MaterialTableFull);
        }
        self.materials.push(material);
        Ok(self.materials.len() - 1)
    }

    pub fn add_object(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Nearest intersection over all spheres in `[t_min, t_max]`.
    ///
    /// Each sphere is tested against a window shrunk to the closest hit so
    /// far, so only strictly closer hits replace the result; ties go to the
    /// earlier-added sphere.
    pub fn hit_any(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<RayHit> {
        let mut closest = t_max;
        let mut result = None;

        for sphere in &self.spheres {
            if let Some(hit) = sphere.hit(ray, t_min, closest) {
                closest = hit.t;
                result = Some(hit);
            }
        }

        result
    }
}

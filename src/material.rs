use crate::picture::Color;

/// Surface scattering behavior, one variant per material kind.
///
/// Spheres reference materials by index into [`crate::object::Scene`]'s
/// material table rather than owning them, so one material can be shared by
/// many objects.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// Matte surface; scatters around the normal, attenuated by `albedo`.
    Diffuse { albedo: Color },
    /// Mirror reflection blurred by `fuzz` (0 = perfect mirror).
    Metal { albedo: Color, fuzz: f32 },
    /// Transparent material. Defined for scene construction but not yet
    /// handled by the kernel, which falls back to normal visualization.
    Dielectric { index_of_refraction: f32 },
}

impl Material {
    pub fn diffuse(albedo: Color) -> Material {
        Material::Diffuse { albedo }
    }

    pub fn metal(albedo: Color, fuzz: f32) -> Material {
        Material::Metal { albedo, fuzz }
    }

    pub fn dielectric(index_of_refraction: f32) -> Material {
        Material::Dielectric { index_of_refraction }
    }
}

use std::iter::repeat_with;

use fastrand::Rng;
use log::trace;
use nalgebra::{vector, Vector3};
use rayon::prelude::*;

use crate::camera::{Camera, Viewport};
use crate::material::Material;
use crate::object::Scene;
use crate::picture::{Color, Picture};
use crate::ray::{normalize_or_zero, Ray};

/// Hard bounce budget; bounds worst-case recursion depth per camera ray.
pub const MAX_DEPTH: u32 = 5;

/// Near plane for scene intersection, keeps scattered rays from re-hitting
/// the surface they just left.
const T_MIN: f32 = 1e-3;
const T_MAX: f32 = 1e6;

/// Per-bounce energy loss on diffuse scattering, applied on top of albedo.
/// Metal reflection carries no such constant; the asymmetry is inherited
/// behavior and kept for parity.
const DIFFUSE_ATTENUATION: f32 = 0.7;

const SKY_HORIZON: Color = Color::WHITE;
const SKY_ZENITH: Color = Color::new(0.5, 0.7, 1.0);

pub fn random_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.f32()
}

fn random_vec(rng: &mut Rng) -> Vector3<f32> {
    vector![
        random_range(rng, -1.0, 1.0),
        random_range(rng, -1.0, 1.0),
        random_range(rng, -1.0, 1.0)
    ]
}

/// Rejection-samples the cube [-1,1]³ until a draw lands inside the unit
/// sphere (expected ~2 draws).
pub fn random_in_unit_sphere(rng: &mut Rng) -> Vector3<f32> {
    repeat_with(|| random_vec(rng))
        .find(|vec| vec.magnitude_squared() < 1.0)
        .expect("infinite iterator")
}

pub fn random_unit_vector(rng: &mut Rng) -> Vector3<f32> {
    random_in_unit_sphere(rng).normalize()
}

fn reflect(v: &Vector3<f32>, n: &Vector3<f32>) -> Vector3<f32> {
    v - 2.0 * v.dot(n) * n
}

/// Background radiance, the model's only light source: a vertical blend from
/// the horizon color to the zenith color, a function of ray direction alone.
pub fn sky_color(direction: &Vector3<f32>) -> Color {
    let t = (direction.y + 1.0) * 0.5;
    (1.0 - t) * SKY_HORIZON + t * SKY_ZENITH
}

/// Resolves the radiance arriving along `ray` by recursive path tracing.
///
/// Returned channels are unclamped; callers clamp at storage time. The
/// generator handle is the only mutable state, so concurrent calls against
/// the same scene are safe as long as each worker owns its own `Rng`.
pub fn trace_ray(ray: &Ray, scene: &Scene, depth: u32, rng: &mut Rng) -> Color {
    if depth == 0 {
        return Color::BLACK;
    }

    let Some(hit) = scene.hit_any(ray, T_MIN, T_MAX) else {
        return sky_color(&ray.direction);
    };

    match scene.material(hit.material) {
        Some(Material::Diffuse { albedo }) => {
            let mut scatter_direction = hit.normal + random_unit_vector(rng);
            // Antiparallel draws cancel the normal out; fall back to the
            // normal itself rather than tracing a degenerate ray.
            if scatter_direction.magnitude() < 1e-3 {
                scatter_direction = hit.normal;
            }
            let scattered = Ray::new(hit.point, scatter_direction);
            let recursive = trace_ray(&scattered, scene, depth - 1, rng);
            *albedo * recursive * DIFFUSE_ATTENUATION
        }
        Some(Material::Metal { albedo, fuzz }) => {
            let mut reflected = reflect(&ray.direction, &hit.normal);
            if *fuzz > 0.0 {
                reflected += *fuzz * random_in_unit_sphere(rng);
            }
            let reflected = normalize_or_zero(reflected);
            if reflected.dot(&hit.normal) > 0.0 {
                let scattered = Ray::new(hit.point, reflected);
                *albedo * trace_ray(&scattered, scene, depth - 1, rng)
            } else {
                // Fuzz pushed the reflection back into the surface.
                Color::BLACK
            }
        }
        // No kernel support for this material (or a stale index): visualize
        // the surface normal instead.
        _ => Color::visualize_normal(&hit.normal),
    }
}

/// Produces the color of one pixel from n jittered samples, gamma corrected.
///
/// `x`/`y` are image coordinates with the origin at the top-left row.
pub fn render_pixel(
    x: u32,
    y: u32,
    viewport: &Viewport,
    scene: &Scene,
    samples: u32,
    rng: &mut Rng,
) -> Color {
    let sum: Color = (0..samples)
        .map(|_| {
            let u = (x as f32 + rng.f32()) / (viewport.image_width - 1.0);
            let v = 1.0 - (y as f32 + rng.f32()) / (viewport.image_height - 1.0);
            let ray = viewport.emit_ray(u, v);
            trace_ray(&ray, scene, MAX_DEPTH, rng)
        })
        .sum();

    let samples = samples as f32;
    Color::new(
        (sum.r / samples).sqrt(),
        (sum.g / samples).sqrt(),
        (sum.b / samples).sqrt(),
    )
}

/// Renders a whole frame into `picture`, one rayon work item per row.
///
/// The scene is shared read-only; every row worker derives its own seeded
/// generator from `seed`, so output is reproducible for a fixed seed and
/// sample count regardless of scheduling.
pub fn render_frame(
    picture: &mut Picture,
    camera: &Camera,
    scene: &Scene,
    samples: u32,
    seed: u64,
) {
    let width = picture.width();
    let viewport = camera.viewport(width, picture.height());

    picture
        .buffer_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let mut rng = Rng::with_seed(seed.wrapping_add(y as u64));
            trace!(target: "app", "Rendering row {y}");
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(x as u32, y, &viewport, scene, samples, &mut rng).into();
            }
        });
}

#[cfg(test)]
mod tests {
    use nalgebra::point;

    use crate::object::Sphere;
    use crate::picture::Rgb8;

    use super::*;

    fn forward_ray() -> Ray {
        Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, -1.0])
    }

    fn single_sphere_scene(material: Material) -> Scene {
        let mut scene = Scene::new();
        let mat = scene.add_material(material).unwrap();
        scene.add_object(Sphere::new(point![0.0, 0.0, -5.0], 1.0, mat));
        scene
    }

    #[test]
    fn depth_zero_is_black() {
        let scene = single_sphere_scene(Material::diffuse(Color::new(0.8, 0.1, 0.1)));
        let mut rng = Rng::with_seed(1);
        assert_eq!(
            trace_ray(&forward_ray(), &scene, 0, &mut rng),
            Color::BLACK
        );
    }

    #[test]
    fn miss_returns_the_sky_gradient_exactly() {
        let scene = Scene::new();
        let mut rng = Rng::with_seed(1);

        let up = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 1.0, 0.0]);
        assert_eq!(trace_ray(&up, &scene, MAX_DEPTH, &mut rng), SKY_ZENITH);

        let down = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, -1.0, 0.0]);
        assert_eq!(trace_ray(&down, &scene, MAX_DEPTH, &mut rng), SKY_HORIZON);
    }

    #[test]
    fn level_ray_hits_the_sky_midpoint() {
        let scene = Scene::new();
        let mut rng = Rng::with_seed(1);
        let color = trace_ray(&forward_ray(), &scene, MAX_DEPTH, &mut rng);
        assert_eq!(color, 0.5 * SKY_HORIZON + 0.5 * SKY_ZENITH);
        assert!((color.r - 0.75).abs() < 1e-6);
        assert!((color.g - 0.85).abs() < 1e-6);
        assert!((color.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_fuzz_metal_reflects_straight_back() {
        // Head-on hit: the mirror reflection retraces the ray, misses
        // everything, and picks up the level-sky color attenuated by albedo.
        let scene = single_sphere_scene(Material::metal(Color::WHITE, 0.0));
        let mut rng = Rng::with_seed(1);
        let color = trace_ray(&forward_ray(), &scene, MAX_DEPTH, &mut rng);

        let sky = sky_color(&vector![0.0, 0.0, 1.0]);
        assert!((color.r - sky.r).abs() < 1e-6);
        assert!((color.g - sky.g).abs() < 1e-6);
        assert!((color.b - sky.b).abs() < 1e-6);
    }

    #[test]
    fn diffuse_bounce_to_exhausted_depth_is_black() {
        let scene = single_sphere_scene(Material::diffuse(Color::new(0.8, 0.1, 0.1)));
        let mut rng = Rng::with_seed(1);
        // Depth 1 spends the only bounce on the scatter, which terminates at
        // depth 0 with no radiance to attenuate.
        assert_eq!(
            trace_ray(&forward_ray(), &scene, 1, &mut rng),
            Color::BLACK
        );
    }

    #[test]
    fn unsupported_material_shades_by_normal() {
        let scene = single_sphere_scene(Material::dielectric(1.5));
        let mut rng = Rng::with_seed(1);
        let color = trace_ray(&forward_ray(), &scene, MAX_DEPTH, &mut rng);
        // Hit normal is (0,0,1).
        assert_eq!(color, Color::new(0.5, 0.5, 1.0));
    }

    #[test]
    fn diffuse_tracing_is_deterministic_for_a_fixed_seed() {
        let scene = single_sphere_scene(Material::diffuse(Color::new(0.8, 0.1, 0.1)));
        let mut a = Rng::with_seed(42);
        let mut b = Rng::with_seed(42);
        let first = trace_ray(&forward_ray(), &scene, MAX_DEPTH, &mut a);
        let second = trace_ray(&forward_ray(), &scene, MAX_DEPTH, &mut b);
        assert_eq!(first, second);
    }

    #[test]
    fn unit_sphere_samples_stay_inside() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..100 {
            assert!(random_in_unit_sphere(&mut rng).magnitude() < 1.0);
        }
        let unit = random_unit_vector(&mut rng);
        assert!((unit.magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn render_frame_is_reproducible() {
        let scene = single_sphere_scene(Material::diffuse(Color::new(0.8, 0.1, 0.1)));
        let camera = Camera::new(point![0.0, 0.0, 0.0], 90.0);

        let mut first = Picture::new(8, 6);
        let mut second = Picture::new(8, 6);
        render_frame(&mut first, &camera, &scene, 4, 99);
        render_frame(&mut second, &camera, &scene, 4, 99);

        assert_eq!(first.buffer(), second.buffer());
        assert_ne!(first.buffer(), vec![Rgb8::default(); 48].as_slice());
    }
}

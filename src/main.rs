use std::io;
use std::time::Instant;

use log::info;
use nalgebra::point;

use pathtracer::camera::Camera;
use pathtracer::material::Material;
use pathtracer::object::{Scene, Sphere};
use pathtracer::output::write_ppm;
use pathtracer::picture::{Color, Picture};
use pathtracer::render::render_frame;

const IMAGE_WIDTH: u32 = 800;
const IMAGE_HEIGHT: u32 = 600;
const SAMPLES_PER_PIXEL: u32 = 100;
const SEED: u64 = 0xC0FFEE;

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let ground = scene
        .add_material(Material::diffuse(Color::new(0.5, 0.5, 0.5)))
        .expect("material table has room");
    let matte_red = scene
        .add_material(Material::diffuse(Color::new(0.8, 0.1, 0.1)))
        .expect("material table has room");
    let mirror = scene
        .add_material(Material::metal(Color::new(0.9, 0.9, 0.9), 0.0))
        .expect("material table has room");
    let brushed_gold = scene
        .add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.4))
        .expect("material table has room");

    scene.add_object(Sphere::new(point![0.0, -100.5, -1.0], 100.0, ground));
    scene.add_object(Sphere::new(point![0.0, 0.0, -1.0], 0.5, matte_red));
    scene.add_object(Sphere::new(point![-1.0, 0.0, -1.0], 0.5, mirror));
    scene.add_object(Sphere::new(point![1.0, 0.0, -1.0], 0.5, brushed_gold));

    scene
}

fn main() -> io::Result<()> {
    env_logger::builder().target(env_logger::Target::Stdout).init();

    let scene = build_scene();
    let camera = Camera::new(point![0.0, 0.0, 0.0], 90.0);
    let mut picture = Picture::new(IMAGE_WIDTH, IMAGE_HEIGHT);

    info!(target: "app", "Starting frame render...");
    let start = Instant::now();
    render_frame(&mut picture, &camera, &scene, SAMPLES_PER_PIXEL, SEED);
    let elapsed = start.elapsed();
    info!(target: "app", "Finished rendering. Took {:?}", elapsed);

    write_ppm(&picture, "render.ppm")
}

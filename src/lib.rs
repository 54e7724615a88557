//! Recursive Monte-Carlo path tracer over spherical primitives, following the
//! [Ray Tracing in One Weekend](https://raytracing.github.io/) family of
//! renderers.
//!
//! The kernel ([`render::trace_ray`]) is pure computation over an immutable
//! [`object::Scene`]: illumination comes from a sky gradient and recursive
//! diffuse/metal bounces, with no explicit lights and no acceleration
//! structures. [`render::render_frame`] drives it in parallel across rows and
//! [`output::write_ppm`] exports the result.

pub mod camera;
pub mod material;
pub mod object;
pub mod output;
pub mod picture;
pub mod ray;
pub mod render;

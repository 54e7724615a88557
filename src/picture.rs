use std::iter::Sum;
use std::ops::{Add, Mul};

use nalgebra::Vector3;

/// Linear RGB radiance. Channels are unbounded during accumulation and only
/// clamped on conversion to [`Rgb8`] for storage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Maps a unit vector into the RGB cube, one channel per axis. Used as the
    /// fallback shading for materials the kernel does not handle.
    pub fn visualize_normal(vector: &Vector3<f32>) -> Self {
        Color::new(
            (vector.x + 1.0) * 0.5,
            (vector.y + 1.0) * 0.5,
            (vector.z + 1.0) * 0.5,
        )
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

/// Component-wise product, used for albedo attenuation.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut acc = Color::BLACK;
        for color in iter {
            acc = acc + color;
        }
        acc
    }
}

fn normalize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Packed 8-bit pixel, the framebuffer's storage format.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }
}

impl From<Color> for Rgb8 {
    fn from(value: Color) -> Self {
        Rgb8::new(normalize(value.r), normalize(value.g), normalize(value.b))
    }
}

/// An owned framebuffer of packed pixels, row-major, top row first.
pub struct Picture {
    pixels: Vec<Rgb8>,
    size: (u32, u32),
}

impl Picture {
    pub fn new(width: u32, height: u32) -> Self {
        Picture {
            pixels: vec![Rgb8::default(); width as usize * height as usize],
            size: (width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    fn to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> &Rgb8 {
        &self.pixels[self.to_index(x, y)]
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Rgb8 {
        let index = self.to_index(x, y);
        &mut self.pixels[index]
    }

    pub fn buffer(&self) -> &[Rgb8] {
        &self.pixels
    }

    pub fn buffer_mut(&mut self) -> &mut [Rgb8] {
        &mut self.pixels
    }

    pub fn clear(&mut self, color: Rgb8) {
        self.pixels.fill(color);
    }
}

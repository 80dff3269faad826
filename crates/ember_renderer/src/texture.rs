//! Spatially varying colours looked up by (u, v) and hit point.

use crate::perlin::Perlin;
use ember_core::ImageData;
use ember_math::{Color, Interval, Point3};
use rand::RngCore;
use std::sync::Arc;

/// Colour returned by an image texture that failed to load.
const MISSING_IMAGE_COLOR: Color = Color::new(1.0, 0.0, 1.0);

/// Trait for textures. Shared between materials, so must be thread-safe.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A constant colour.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.albedo
    }
}

/// 3-D checkerboard alternating between two textures.
///
/// Cells are `scale` units wide along each world axis.
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let x = (self.inv_scale * p.x).floor() as i64;
        let y = (self.inv_scale * p.y).floor() as i64;
        let z = (self.inv_scale * p.z).floor() as i64;

        if (x + y + z).rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Texture backed by a loaded image, addressed by surface (u, v).
pub struct ImageTexture {
    image: Option<ImageData>,
}

impl ImageTexture {
    /// Look the image up by name. A missing file leaves the texture
    /// unloaded; it then renders as solid magenta.
    pub fn new(name: &str) -> Self {
        Self {
            image: ImageData::find(name).ok(),
        }
    }

    pub fn from_image(image: ImageData) -> Self {
        Self { image: Some(image) }
    }

    pub fn is_loaded(&self) -> bool {
        self.image.as_ref().is_some_and(|image| !image.is_empty())
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        let image = match &self.image {
            Some(image) if !image.is_empty() => image,
            _ => return MISSING_IMAGE_COLOR,
        };

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - unit.clamp(v);

        let i = (u * image.width as f64) as i64;
        let j = (v * image.height as f64) as i64;
        let [r, g, b] = image.pixel(i, j);

        Color::new(r as f64, g as f64, b as f64)
    }
}

/// Marble-like texture driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f64,
}

impl NoiseTexture {
    pub fn new(scale: f64, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Point3) -> Color {
        let phase = self.scale * p.z + 10.0 * self.noise.turbulence(p, 7);
        Color::splat(0.5) * (1.0 + phase.sin())
    }
}

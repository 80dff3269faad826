//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a fixed bounce limit
//! - Light importance sampling mixed 50/50 with the material's own PDF
//! - Stratified anti-aliasing
//! - Bucketed parallel rendering with per-pixel seeded generators

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::material::Scatter;
use crate::pdf::{HittablePdf, MixturePdf, Pdf};
use crate::{Camera, HitRecord, Hittable};
use ember_math::{Color, Interval, Ray};
use rand::RngCore;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Rays start this far along to avoid re-hitting the surface they left.
const RAY_T_MIN: f64 = 0.001;

/// Render settings that are not part of the camera.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Base seed; every pixel derives its own generator from it
    pub seed: u64,
    /// Edge length of the square tiles handed to worker threads
    pub bucket_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Compute the color seen by a ray.
///
/// `lights` is the importance-sampling target. With `None`, scattered
/// directions come from the material alone.
pub fn ray_color(
    ray: &Ray,
    depth: u32,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded the bounce limit, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(ray, Interval::new(RAY_T_MIN, f64::INFINITY), &mut rec, rng) {
        return background;
    }

    let emission = rec.material.emitted(ray, &rec, rec.u, rec.v, rec.p);

    let Some(scatter) = rec.material.scatter(ray, &rec, rng) else {
        return emission;
    };

    let material_pdf = match scatter.scatter {
        Scatter::Specular(specular) => {
            return scatter.attenuation * ray_color(&specular, depth - 1, world, lights, background, rng);
        }
        Scatter::Pdf(pdf) => pdf,
    };

    let (direction, pdf_value) = match lights {
        Some(lights) => {
            let light_pdf = HittablePdf::new(lights, rec.p);
            let mixture = MixturePdf::new(&light_pdf, material_pdf.as_ref());
            let direction = mixture.generate(rng);
            (direction, mixture.value(direction, rng))
        }
        None => {
            let direction = material_pdf.generate(rng);
            (direction, material_pdf.value(direction, rng))
        }
    };

    // Zero, negative or NaN density: the sample carries no usable weight
    if !(pdf_value > 0.0) {
        return emission;
    }

    let scattered = Ray::new(rec.p, direction, ray.time());
    let scattering_pdf = rec.material.scattering_pdf(ray, &rec, &scattered);
    if scattering_pdf <= 0.0 {
        return emission;
    }

    let sample_color = ray_color(&scattered, depth - 1, world, lights, background, rng);
    emission + (scatter.attenuation * scattering_pdf * sample_color) / pdf_value
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let channel = |c: f64| {
        // NaN marks a broken sample, not a bright one
        let c = if c.is_nan() { 0.0 } else { c };
        (256.0 * intensity.clamp(linear_to_gamma(c))) as u8
    };

    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel over all of its strata and return the mean radiance.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let strata = camera.sqrt_spp();

    for s_j in 0..strata {
        for s_i in 0..strata {
            let ray = camera.get_ray(x, y, s_i, s_j, rng);
            pixel_color += ray_color(&ray, camera.max_depth, world, lights, camera.background, rng);
        }
    }

    pixel_color * camera.samples_scale()
}

/// Generator for one pixel, independent of thread scheduling.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> Xoshiro256PlusPlus {
    let pixel = ((y as u64) << 32) | x as u64;
    Xoshiro256PlusPlus::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ pixel)
}

/// Finished 8-bit RGB raster, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        3 * (y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 3].copy_from_slice(&rgb);
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (index, rgb) in result.pixels.iter().enumerate() {
            let local_x = index as u32 % bucket.width;
            let local_y = index as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *rgb);
        }
    }
}

/// Render the scene with all available cores.
///
/// The camera is initialized on a copy, so the caller's builder is left as is.
/// Output for a given `settings.seed` is identical from run to run.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    settings: &RenderSettings,
) -> ImageBuffer {
    let mut camera = camera.clone();
    camera.initialize();

    let width = camera.image_width;
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, settings.bucket_size.max(1));
    let total = buckets.len();

    log::info!(
        "Rendering {}x{} at {} spp, depth {} ({} buckets, {} threads)",
        width,
        height,
        camera.sqrt_spp() * camera.sqrt_spp(),
        camera.max_depth,
        total,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let completed = AtomicUsize::new(0);
    let progress_step = (total / 10).max(1);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, &camera, world, lights, settings.seed);

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} done ({}/{})", bucket.index, done, total);
            if done % progress_step == 0 || done == total {
                log::info!("Progress: {:.0}%", 100.0 * done as f64 / total as f64);
            }

            result
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}

//! ember renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for spheres, quads, boxes and volumes, with
//! light importance sampling and bucketed parallel rendering.

pub mod random;
mod hittable;
mod material;
mod pdf;
mod perlin;
mod texture;
mod sphere;
mod quad;
mod medium;
mod transform;
mod bvh;
mod camera;
mod renderer;
mod bucket;

pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, Scatter, ScatterResult};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf, SpherePdf};
pub use perlin::Perlin;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
pub use sphere::Sphere;
pub use quad::{make_box, Quad};
pub use medium::ConstantMedium;
pub use transform::{RotateY, Translate};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use renderer::{
    color_to_rgb, linear_to_gamma, pixel_rng, ray_color, render, render_pixel, ImageBuffer,
    RenderSettings,
};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3};

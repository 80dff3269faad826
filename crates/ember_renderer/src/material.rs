//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::pdf::{CosinePdf, Pdf, SpherePdf};
use crate::random::{gen_f64, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use ember_math::{near_zero, reflect, refract, Color, Point3, Ray, Vec3};
use rand::RngCore;
use std::f64::consts::PI;
use std::sync::Arc;

/// How a scattered ray's direction is chosen.
pub enum Scatter {
    /// Sample from this distribution, weighted by the material's scattering PDF.
    Pdf(Box<dyn Pdf>),
    /// Follow this ray directly (mirror or glass), bypassing importance sampling.
    Specular(Ray),
}

/// Outcome of a successful scatter.
pub struct ScatterResult {
    pub attenuation: Color,
    pub scatter: Scatter,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are shared by many primitives and never mutate.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns None if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Radiance emitted at the hit. Black for everything except lights.
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }

    /// Density with which this material scatters `ray_in` into `scattered`.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        0.0
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scatter: Scatter::Pdf(Box::new(CosinePdf::new(rec.normal))),
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> f64 {
        let cos_theta = rec.normal.dot(scattered.direction().normalize());
        if cos_theta < 0.0 {
            0.0
        } else {
            cos_theta / PI
        }
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    /// Perturb a mirror direction by `offset` scaled with the fuzz radius.
    ///
    /// Returns `None` when the result is degenerate or points into the surface.
    fn fuzzed(&self, reflected: Vec3, offset: Vec3, normal: Vec3) -> Option<Vec3> {
        let direction = reflected + self.fuzz * offset;
        if near_zero(direction) || direction.dot(normal) <= 0.0 {
            return None;
        }
        Some(direction)
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal).normalize();
        // Absorbed when fuzzed below the surface
        let direction = self.fuzzed(reflected, random_unit_vector(rng), rec.normal)?;

        Some(ScatterResult {
            attenuation: self.albedo,
            scatter: Scatter::Specular(Ray::new(rec.p, direction, ray_in.time())),
        })
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f64, ior: f64) -> f64 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f64(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scatter: Scatter::Specular(Ray::new(rec.p, direction, ray_in.time())),
        })
    }
}

/// Diffuse light emitter. Emits from its front face only.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, _ray_in: &Ray, rec: &HitRecord, u: f64, v: f64, p: Point3) -> Color {
        if !rec.front_face {
            return Color::ZERO;
        }
        self.emit.value(u, v, p)
    }
}

/// Phase function of a participating medium: scatters uniformly in all directions.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scatter: Scatter::Pdf(Box::new(SpherePdf)),
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        1.0 / (4.0 * PI)
    }
}

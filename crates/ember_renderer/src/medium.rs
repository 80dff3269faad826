//! Homogeneous participating media (smoke, fog).

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Isotropic, Material};
use crate::random::gen_f64;
use crate::texture::Texture;
use ember_math::{Aabb, Color, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Constant-density volume filling a convex boundary.
pub struct ConstantMedium {
    boundary: Box<dyn Hittable>,
    neg_inv_density: f64,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Box<dyn Hittable>, density: f64, albedo: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::from_texture(albedo)),
        }
    }

    pub fn from_color(boundary: Box<dyn Hittable>, density: f64, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::new(albedo)),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut entry = HitRecord::default();
        let mut exit = HitRecord::default();

        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut entry, rng) {
            return false;
        }
        if !self
            .boundary
            .hit(ray, Interval::new(entry.t + 0.0001, f64::INFINITY), &mut exit, rng)
        {
            return false;
        }

        let mut t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f64(rng).ln();

        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);
        // Arbitrary: the phase function ignores the normal
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.material = self.phase_function.as_ref();

        log::trace!("medium scatter at t={:.4} p={:?}", rec.t, rec.p);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

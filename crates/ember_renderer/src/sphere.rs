//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::random::{gen_f64, random_unit_vector};
use crate::Material;
use ember_math::{Aabb, Interval, Onb, Point3, Ray, Vec3};
use rand::RngCore;
use std::f64::consts::PI;
use std::sync::Arc;

/// A sphere primitive, optionally moving linearly over the shutter interval.
pub struct Sphere {
    /// Center at time 0 and its displacement by time 1
    center: Ray,
    radius: f64,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a stationary sphere.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center: Ray::new(center, Vec3::ZERO, 0.0),
            radius,
            material,
            bbox,
        }
    }

    /// Create a sphere moving from `center0` at time 0 to `center1` at time 1.
    pub fn moving(center0: Point3, center1: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);

        Self {
            center: Ray::new(center0, center1 - center0, 0.0),
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    /// Get the UV coordinates for a point on the unit sphere.
    ///
    /// u: angle around the Y axis from X=-1, v: angle from Y=-1 to Y=+1.
    fn get_sphere_uv(p: Vec3) -> (f64, f64) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let current_center = self.center.at(ray.time());
        let oc = current_center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - current_center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Reciprocal of the solid angle the sphere subtends from `origin`.
    ///
    /// Only meaningful for stationary spheres; moving ones use their time-0 center.
    fn pdf_value(&self, origin: Point3, direction: Vec3, rng: &mut dyn RngCore) -> f64 {
        let mut rec = HitRecord::default();
        if !self.hit(&Ray::new(origin, direction, 0.0), Interval::new(0.001, f64::INFINITY), &mut rec, rng) {
            return 0.0;
        }

        let dist_squared = (self.center.origin() - origin).length_squared();
        let radius_squared = self.radius * self.radius;
        if dist_squared <= radius_squared {
            // Inside the sphere every direction hits
            return 1.0 / (4.0 * PI);
        }

        let cos_theta_max = (1.0 - radius_squared / dist_squared).sqrt();
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);

        1.0 / solid_angle
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        let direction = self.center.origin() - origin;
        let distance_squared = direction.length_squared();
        if distance_squared <= self.radius * self.radius {
            return random_unit_vector(rng);
        }

        let uvw = Onb::new(direction);
        uvw.transform(random_to_sphere(self.radius, distance_squared, rng))
    }
}

/// Direction uniformly distributed inside the cone subtended by a sphere,
/// expressed with the cone axis along +z.
fn random_to_sphere(radius: f64, distance_squared: f64, rng: &mut dyn RngCore) -> Vec3 {
    let r1 = gen_f64(rng);
    let r2 = gen_f64(rng);
    let z = 1.0 + r2 * ((1.0 - radius * radius / distance_squared).sqrt() - 1.0);

    let phi = 2.0 * PI * r1;
    let sin_theta = (1.0 - z * z).sqrt();

    Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec, &mut rng));
        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 0.0);
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!sphere.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec, &mut rng));
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec, &mut rng));
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_moving_sphere_follows_time() {
        let sphere = Sphere::moving(Vec3::new(0.0, 0.0, -5.0), Vec3::new(2.0, 0.0, -5.0), 0.5, grey());
        let mut rng = StdRng::seed_from_u64(0);
        let ray_t = Interval::new(0.001, f64::INFINITY);

        let early = Ray::new(Vec3::ZERO, -Vec3::Z, 0.0);
        let late = Ray::new(Vec3::ZERO, -Vec3::Z, 1.0);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&early, ray_t, &mut rec, &mut rng));
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
        assert!(!sphere.hit(&late, ray_t, &mut rec, &mut rng));

        let bbox = sphere.bounding_box();
        assert_eq!(bbox.x.min, -0.5);
        assert_eq!(bbox.x.max, 2.5);
    }

    #[test]
    fn test_sphere_uv() {
        let (u, v) = Sphere::get_sphere_uv(Vec3::X);
        assert!((u - 0.5).abs() < 1e-12 && (v - 0.5).abs() < 1e-12);

        let (u, v) = Sphere::get_sphere_uv(Vec3::Z);
        assert!((u - 0.25).abs() < 1e-12 && (v - 0.5).abs() < 1e-12);

        let (_, v) = Sphere::get_sphere_uv(-Vec3::Y);
        assert!(v.abs() < 1e-12);
    }

    #[test]
    fn test_sphere_sampling() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey());
        let mut rng = StdRng::seed_from_u64(41);

        let expected = 1.0 / (2.0 * PI * (1.0 - (1.0 - 1.0 / 100.0f64).sqrt()));
        for _ in 0..200 {
            let direction = sphere.random(Vec3::ZERO, &mut rng);
            let value = sphere.pdf_value(Vec3::ZERO, direction, &mut rng);
            assert!((value - expected).abs() / expected < 1e-9);
        }

        assert_eq!(sphere.pdf_value(Vec3::ZERO, Vec3::Z, &mut rng), 0.0);
    }

    #[test]
    fn test_sphere_sampling_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 5.0, grey());
        let mut rng = StdRng::seed_from_u64(42);

        let direction = sphere.random(Vec3::new(1.0, 0.0, 0.0), &mut rng);
        assert!((direction.length() - 1.0).abs() < 1e-12);
        let value = sphere.pdf_value(Vec3::new(1.0, 0.0, 0.0), direction, &mut rng);
        assert!((value - 1.0 / (4.0 * PI)).abs() < 1e-15);
    }
}

//! Planar quadrilaterals and boxes built from them.

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::random::gen_f64;
use crate::Material;
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Rays whose direction is this close to the plane count as parallel.
const PARALLEL_EPSILON: f64 = 1e-8;

/// A parallelogram spanned by edges `u` and `v` from corner `q`.
pub struct Quad {
    q: Point3,
    u: Vec3,
    v: Vec3,
    /// n / (n . n), projects plane points onto the (u, v) basis
    w: Vec3,
    material: Arc<dyn Material>,
    bbox: Aabb,
    normal: Vec3,
    d: f64,
    area: f64,
}

impl Quad {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();

        // Both diagonals, so the box is right for any edge orientation
        let bbox_diagonal1 = Aabb::from_points(q, q + u + v);
        let bbox_diagonal2 = Aabb::from_points(q + u, q + v);

        Self {
            q,
            u,
            v,
            w: n / n.dot(n),
            material,
            bbox: Aabb::surrounding(&bbox_diagonal1, &bbox_diagonal2).pad(),
            normal,
            d: normal.dot(q),
            area: n.length(),
        }
    }

    /// Planar coordinates inside the unit square are on the quad.
    fn is_interior(alpha: f64, beta: f64) -> bool {
        let unit = Interval::new(0.0, 1.0);
        unit.contains(alpha) && unit.contains(beta)
    }
}

impl Hittable for Quad {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        let intersection = ray.at(t);
        let planar = intersection - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        if !Self::is_interior(alpha, beta) {
            return false;
        }

        rec.t = t;
        rec.p = intersection;
        rec.u = alpha;
        rec.v = beta;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Area-light density: squared distance over foreshortened area.
    fn pdf_value(&self, origin: Point3, direction: Vec3, rng: &mut dyn RngCore) -> f64 {
        let mut rec = HitRecord::default();
        if !self.hit(&Ray::new(origin, direction, 0.0), Interval::new(0.001, f64::INFINITY), &mut rec, rng) {
            return 0.0;
        }

        let distance_squared = rec.t * rec.t * direction.length_squared();
        let cosine = (direction.dot(rec.normal) / direction.length()).abs();
        if cosine <= 0.0 {
            return 0.0;
        }

        distance_squared / (cosine * self.area)
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        let p = self.q + gen_f64(rng) * self.u + gen_f64(rng) * self.v;
        p - origin
    }
}

/// Closed axis-aligned box with opposite corners `a` and `b`, as six quads.
pub fn make_box(a: Point3, b: Point3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    // front, right, back, left, top, bottom
    let faces = [
        (Point3::new(min.x, min.y, max.z), dx, dy),
        (Point3::new(max.x, min.y, max.z), -dz, dy),
        (Point3::new(max.x, min.y, min.z), -dx, dy),
        (Point3::new(min.x, min.y, min.z), dz, dy),
        (Point3::new(min.x, max.y, max.z), dx, -dz),
        (Point3::new(min.x, min.y, min.z), dx, dz),
    ];

    for (q, u, v) in faces {
        sides.add(Box::new(Quad::new(q, u, v, material.clone())));
    }

    sides
}

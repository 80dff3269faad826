//! Instancing wrappers that move or rotate a child hittable.
//!
//! Rays are taken into object space, intersected with the child, and the
//! resulting hit is brought back to world space.

use crate::hittable::{HitRecord, Hittable};
use ember_math::{degrees_to_radians, Aabb, DMat3, Interval, Mat3Ext, Point3, Ray, Vec3};
use rand::RngCore;

/// Offsets a child by a fixed displacement.
pub struct Translate {
    object: Box<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Box<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self { object, offset, bbox }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.object.hit(&offset_ray, ray_t, rec, rng) {
            return false;
        }

        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3, rng: &mut dyn RngCore) -> f64 {
        self.object.pdf_value(origin - self.offset, direction, rng)
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        self.object.random(origin - self.offset, rng)
    }
}

/// Rotates a child about the world Y axis.
pub struct RotateY {
    object: Box<dyn Hittable>,
    /// Object to world
    rotation: DMat3,
    /// World to object
    inverse: DMat3,
    bbox: Aabb,
}

impl RotateY {
    /// Positive angles (degrees) turn +X towards -Z.
    pub fn new(object: Box<dyn Hittable>, angle: f64) -> Self {
        let rotation = DMat3::from_rotation_y(degrees_to_radians(angle));
        let bbox = rotation.transform_aabb(&object.bounding_box());

        Self {
            object,
            rotation,
            inverse: rotation.transpose(),
            bbox,
        }
    }
}

impl Hittable for RotateY {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let rotated = Ray::new(
            self.inverse * ray.origin(),
            self.inverse * ray.direction(),
            ray.time(),
        );

        if !self.object.hit(&rotated, ray_t, rec, rng) {
            return false;
        }

        rec.p = self.rotation * rec.p;
        rec.normal = self.rotation * rec.normal;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3, rng: &mut dyn RngCore) -> f64 {
        self.object
            .pdf_value(self.inverse * origin, self.inverse * direction, rng)
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        self.rotation * self.object.random(self.inverse * origin, rng)
    }
}

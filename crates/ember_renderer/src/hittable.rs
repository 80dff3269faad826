//! Hittable trait and HitRecord for ray-object intersection.

use crate::random::gen_int;
use crate::{Material, ScatterResult};
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use rand::RngCore;

/// A dummy material used for HitRecord::default().
/// Always absorbs light (returns None from scatter).
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }
}

/// Static dummy material instance for Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Point3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    /// `outward_normal` is assumed to have unit length.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Randomness is threaded through explicitly because some objects
/// (participating media) decide hits stochastically.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the hit record. On a miss the
    /// record is left untouched.
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Solid-angle density of sampling `direction` from `origin` towards
    /// this object. Objects that cannot be sampled report zero.
    fn pdf_value(&self, _origin: Point3, _direction: Vec3, _rng: &mut dyn RngCore) -> f64 {
        0.0
    }

    /// A direction from `origin` towards a random point on this object.
    fn random(&self, _origin: Point3, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::X
    }
}

/// A list of hittable objects.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Box<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Box<dyn Hittable>>) -> Self {
        let mut list = HittableList::new();
        for object in objects {
            list.add(object);
        }
        list
    }
}

impl Hittable for HittableList {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.hit(ray, interval, rec, rng) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Equal-weight average of the members' densities.
    fn pdf_value(&self, origin: Point3, direction: Vec3, rng: &mut dyn RngCore) -> f64 {
        if self.objects.is_empty() {
            return 0.0;
        }

        let weight = 1.0 / self.objects.len() as f64;
        let mut sum = 0.0;
        for object in &self.objects {
            sum += weight * object.pdf_value(origin, direction, rng);
        }
        sum
    }

    /// Sample a uniformly chosen member.
    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }

        let index = gen_int(rng, 0, self.objects.len() - 1);
        self.objects[index].random(origin, rng)
    }
}

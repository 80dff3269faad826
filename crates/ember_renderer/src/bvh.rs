//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over the scene's primitives. Each internal node splits its
//! primitives at the median along a randomly chosen axis.

use crate::hittable::{HitRecord, Hittable};
use crate::random::gen_int;
use ember_math::{Aabb, Interval, Ray};
use rand::RngCore;
use std::cmp::Ordering;

/// BVH node - either a branch with two children or a leaf holding one primitive.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a single primitive.
    Leaf { object: Box<dyn Hittable>, bbox: Aabb },
    /// Empty node (for edge cases).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects, choosing split axes
    /// with the thread-local generator.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Self {
        Self::with_rng(objects, &mut rand::thread_rng())
    }

    /// Create a BVH whose split axes come from `rng`, for reproducible builds.
    pub fn with_rng(objects: Vec<Box<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        log::debug!("Building BVH over {} objects", objects.len());
        Self::build(objects, rng)
    }

    /// Recursive BVH construction.
    fn build(mut objects: Vec<Box<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        let axis = gen_int(rng, 0, 2);

        if objects.len() == 1 {
            let object = objects.remove(0);
            let bbox = object.bounding_box();
            return BvhNode::Leaf { object, bbox };
        }

        // Also orders a pair, smaller minimum on the left
        objects.sort_unstable_by(|a, b| box_compare(a.as_ref(), b.as_ref(), axis));

        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);

        let left = Self::build(objects, rng);
        let right = Self::build(right_objects, rng);
        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    /// Number of primitives stored below this node.
    pub fn len(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => left.len() + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BvhNode::Empty)
    }

    /// Longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty | BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Order two primitives by the minimum of their bounds along `axis`.
fn box_compare(a: &dyn Hittable, b: &dyn Hittable, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { object, .. } => object.hit(ray, ray_t, rec, rng),

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec, rng);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec, rng);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

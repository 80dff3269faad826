// Transform utilities for DMat3
//
// Extends glam::DMat3 with the bounding box helper needed by the rotation
// wrappers. glam already provides mul_vec3() and transpose().

use crate::{Aabb, DMat3, Point3};

/// Extension trait for rotation matrices.
pub trait Mat3Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat3Ext for DMat3 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut result_min = Point3::splat(f64::INFINITY);
        let mut result_max = Point3::splat(f64::NEG_INFINITY);

        for corner in aabb.corners() {
            let transformed = self.mul_vec3(corner);
            result_min = result_min.min(transformed);
            result_max = result_max.max(transformed);
        }

        Aabb::from_points(result_min, result_max)
    }
}

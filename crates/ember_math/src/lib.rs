//! Double-precision math types for the ember path tracer.
//!
//! Vectors come from glam (`DVec3`) and are used interchangeably as points,
//! directions and colours.

pub use glam::{DMat3, DVec3};

mod aabb;
mod interval;
mod onb;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
pub use transform::Mat3Ext;

/// 3-D vector of `f64`.
pub type Vec3 = DVec3;
/// A position in world or object space.
pub type Point3 = DVec3;
/// Linear RGB radiance or reflectance.
pub type Color = DVec3;

/// Threshold below which a vector component counts as zero.
pub const NEAR_ZERO: f64 = 1e-8;

/// Returns true if the vector is close to zero in all dimensions.
///
/// Used to guard against normalizing degenerate scatter directions.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO && v.y.abs() < NEAR_ZERO && v.z.abs() < NEAR_ZERO
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `etai_over_etat`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-3, 0.0)));
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        // Normal incidence with matched indices passes straight through
        let uv = Vec3::new(0.0, -1.0, 0.0);
        let out = refract(uv, Vec3::Y, 1.0);
        assert!((out - uv).length() < 1e-12);
    }

    #[test]
    fn test_degrees_to_radians() {
        assert!((degrees_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
    }
}

use crate::{Point3, Vec3};

/// A ray in 3D space with origin, direction, and time.
///
/// Rays represent a half-line starting at `origin` and traveling in
/// `direction`. The `time` field is the emission time used for motion blur.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec3,
    pub time: f64,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Point3, direction: Vec3, time: f64) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Point3::ZERO,
            direction: Vec3::Z,
            time: 0.0,
        }
    }
}

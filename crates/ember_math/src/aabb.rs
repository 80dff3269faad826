use crate::{Interval, Point3, Ray, Vec3};

/// Minimum thickness of a bounding box along any axis.
const MIN_EXTENT: f64 = 0.0001;

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals, padding flat axes.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points given in any order.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        Self::new(x, y, z)
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    #[inline]
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method using the reciprocal direction; an axis-parallel ray
    /// produces signed infinities which the comparisons handle without a
    /// special case.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let ray_orig = r.origin;
        let ray_dir = r.direction;

        for axis in 0..3 {
            let ax = self.axis_interval(axis);
            let adinv = 1.0 / ray_dir[axis];

            let mut t0 = (ax.min - ray_orig[axis]) * adinv;
            let mut t1 = (ax.max - ray_orig[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > ray_t.min {
                ray_t.min = t0;
            }
            if t1 < ray_t.max {
                ray_t.max = t1;
            }
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Return a copy with no side narrower than the minimum extent.
    pub fn pad(&self) -> Aabb {
        let mut padded = *self;
        padded.pad_to_minimums();
        padded
    }

    fn pad_to_minimums(&mut self) {
        if self.x.size() < MIN_EXTENT {
            self.x = self.x.expand(MIN_EXTENT);
        }
        if self.y.size() < MIN_EXTENT {
            self.y = self.y.expand(MIN_EXTENT);
        }
        if self.z.size() < MIN_EXTENT {
            self.z = self.z.expand(MIN_EXTENT);
        }
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(
            self.x.add_scalar(offset.x),
            self.y.add_scalar(offset.y),
            self.z.add_scalar(offset.z),
        )
    }

    /// The 8 corner points, used when re-bounding a transformed box.
    pub fn corners(&self) -> [Point3; 8] {
        let mut corners = [Point3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Point3::new(
                if i & 1 == 0 { self.x.min } else { self.x.max },
                if i & 2 == 0 { self.y.min } else { self.y.max },
                if i & 4 == 0 { self.z.min } else { self.z.max },
            );
        }
        corners
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Independent reference: intersect the per-axis parameter ranges
    /// directly, treating axis-parallel rays as "inside or never".
    /// Returns None for grazing cases too close to call.
    fn brute_force_hit(aabb: &Aabb, ray: &Ray, ray_t: Interval) -> Option<bool> {
        let mut lo = ray_t.min;
        let mut hi = ray_t.max;
        for axis in 0..3 {
            let ax = aabb.axis_interval(axis);
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            if d == 0.0 {
                if o < ax.min || o > ax.max {
                    return Some(false);
                }
                continue;
            }
            let a = (ax.min - o) / d;
            let b = (ax.max - o) / d;
            lo = lo.max(a.min(b));
            hi = hi.min(a.max(b));
        }
        if (hi - lo).abs() < 1e-9 {
            return None;
        }
        Some(lo < hi)
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.x, Interval::new(0.0, 10.0));
        assert_eq!(aabb.y, Interval::new(0.0, 10.0));
        assert_eq!(aabb.z, Interval::new(0.0, 10.0));
    }

    #[test]
    fn test_aabb_pads_flat_axes() {
        let flat = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.y.size() >= MIN_EXTENT);
        assert_eq!(flat.x.size(), 1.0);

        let unpadded = Aabb {
            x: Interval::new(0.0, 0.0),
            y: Interval::new(0.0, 1.0),
            z: Interval::new(0.0, 1.0),
        };
        assert!(unpadded.pad().x.size() >= MIN_EXTENT);
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x.min, 0.0);
        assert_eq!(surrounding.x.max, 10.0);
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Interval ends before the box
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_hit_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        let aabb = Aabb::from_points(Vec3::new(-1.0, -2.0, -0.5), Vec3::new(2.0, 1.0, 3.0));

        for _ in 0..5000 {
            let origin = Vec3::new(
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-6.0..6.0),
            );
            let mut direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            // Exercise the axis-parallel branch regularly
            if rng.gen_bool(0.2) {
                direction.x = 0.0;
            }
            let ray = Ray::new(origin, direction, 0.0);
            let ray_t = Interval::new(0.001, 50.0);

            if let Some(expected) = brute_force_hit(&aabb, &ray, ray_t) {
                assert_eq!(aabb.hit(&ray, ray_t), expected, "disagreement for {:?}", ray);
            }
        }
    }

    #[test]
    fn test_aabb_corners() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let corners = aabb.corners();

        assert!(corners.contains(&Vec3::ZERO));
        assert!(corners.contains(&Vec3::new(1.0, 2.0, 3.0)));
        assert!(corners.contains(&Vec3::new(1.0, 0.0, 3.0)));
    }

    #[test]
    fn test_aabb_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let translated = aabb.translate(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(translated.x.min, 5.0);
        assert_eq!(translated.x.max, 6.0);
        assert_eq!(translated.y, aabb.y);
        assert_eq!(translated.z, aabb.z);
    }
}

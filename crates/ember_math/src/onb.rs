use crate::Vec3;

/// Orthonormal basis built around a single direction `w`.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    axis: [Vec3; 3],
}

impl Onb {
    /// Build a right-handed frame whose `w` axis is `n` normalized.
    pub fn new(n: Vec3) -> Self {
        let w = n.normalize();
        // Pick a helper axis that is not (nearly) parallel to w
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self { axis: [u, v, w] }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.axis[0]
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.axis[1]
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.axis[2]
    }

    /// Map basis coordinates to world coordinates.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        v.x * self.axis[0] + v.y * self.axis[1] + v.z * self.axis[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(onb: &Onb) {
        assert!((onb.u().length() - 1.0).abs() < 1e-12);
        assert!((onb.v().length() - 1.0).abs() < 1e-12);
        assert!((onb.w().length() - 1.0).abs() < 1e-12);
        assert!(onb.u().dot(onb.v()).abs() < 1e-12);
        assert!(onb.u().dot(onb.w()).abs() < 1e-12);
        assert!(onb.v().dot(onb.w()).abs() < 1e-12);
    }

    #[test]
    fn test_onb_orthonormal() {
        assert_orthonormal(&Onb::new(Vec3::new(0.0, 0.0, 3.0)));
        // Near the X axis the helper axis switches to Y
        assert_orthonormal(&Onb::new(Vec3::new(5.0, 0.1, 0.0)));
        assert_orthonormal(&Onb::new(Vec3::new(-1.0, 2.0, -3.0)));
    }

    #[test]
    fn test_onb_transform_w() {
        let n = Vec3::new(1.0, 1.0, 0.0);
        let onb = Onb::new(n);
        let mapped = onb.transform(Vec3::Z);
        assert!((mapped - n.normalize()).length() < 1e-12);
    }
}

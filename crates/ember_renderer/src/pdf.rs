//! Probability density functions over directions, used for importance sampling.

use crate::random::{gen_f64, random_cosine_direction, random_unit_vector};
use crate::Hittable;
use ember_math::{Onb, Point3, Vec3};
use rand::RngCore;
use std::f64::consts::PI;

/// A distribution of directions that can be both sampled and evaluated.
pub trait Pdf {
    /// Density (per steradian) of generating `direction`.
    fn value(&self, direction: Vec3, rng: &mut dyn RngCore) -> f64;

    /// Draw a direction from the distribution.
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Uniform over the whole sphere of directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpherePdf;

impl Pdf for SpherePdf {
    fn value(&self, _direction: Vec3, _rng: &mut dyn RngCore) -> f64 {
        1.0 / (4.0 * PI)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        random_unit_vector(rng)
    }
}

/// Cosine-weighted hemisphere around a normal.
#[derive(Debug, Clone, Copy)]
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(w: Vec3) -> Self {
        Self { uvw: Onb::new(w) }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3, _rng: &mut dyn RngCore) -> f64 {
        let cosine_theta = direction.normalize().dot(self.uvw.w());
        (cosine_theta / PI).max(0.0)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.transform(random_cosine_direction(rng))
    }
}

/// Directions from `origin` towards a hittable, typically the lights.
pub struct HittablePdf<'a> {
    objects: &'a dyn Hittable,
    origin: Point3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(objects: &'a dyn Hittable, origin: Point3) -> Self {
        Self { objects, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3, rng: &mut dyn RngCore) -> f64 {
        self.objects.pdf_value(self.origin, direction, rng)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.objects.random(self.origin, rng)
    }
}

/// Equal-weight blend of two distributions.
pub struct MixturePdf<'a> {
    p: [&'a dyn Pdf; 2],
}

impl<'a> MixturePdf<'a> {
    pub fn new(p0: &'a dyn Pdf, p1: &'a dyn Pdf) -> Self {
        Self { p: [p0, p1] }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3, rng: &mut dyn RngCore) -> f64 {
        0.5 * self.p[0].value(direction, rng) + 0.5 * self.p[1].value(direction, rng)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if gen_f64(rng) < 0.5 {
            self.p[0].generate(rng)
        } else {
            self.p[1].generate(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Quad};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn test_cosine_pdf_integrates_to_one() {
        // Monte Carlo integral over the sphere with uniform directions
        let mut rng = StdRng::seed_from_u64(21);
        let pdf = CosinePdf::new(Vec3::new(0.3, 1.0, -0.2));

        let n = 10_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let direction = random_unit_vector(&mut rng);
            sum += pdf.value(direction, &mut rng);
        }
        let integral = 4.0 * PI * sum / n as f64;

        assert!((integral - 1.0).abs() < 0.06, "integral = {}", integral);
    }

    #[test]
    fn test_cosine_pdf_samples_follow_cosine() {
        // Mean cosine under a cosine-weighted distribution is 2/3
        let mut rng = StdRng::seed_from_u64(25);
        let normal = Vec3::new(-1.0, 0.5, 2.0).normalize();
        let pdf = CosinePdf::new(normal);

        let n = 10_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let direction = pdf.generate(&mut rng);
            let cosine = direction.normalize().dot(normal);
            assert!(cosine >= -1e-12);
            sum += cosine;
        }

        assert!((sum / n as f64 - 2.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn test_cosine_pdf_below_surface_is_zero() {
        let pdf = CosinePdf::new(Vec3::Y);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(pdf.value(-Vec3::Y, &mut rng), 0.0);
        assert!((pdf.value(Vec3::Y, &mut rng) - 1.0 / PI).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_pdf_uniform() {
        let mut rng = StdRng::seed_from_u64(22);
        let pdf = SpherePdf;

        let d = pdf.generate(&mut rng);
        assert!((d.length() - 1.0).abs() < 1e-12);
        assert_eq!(pdf.value(d, &mut rng), pdf.value(-d, &mut rng));
    }

    #[test]
    fn test_mixture_averages_values() {
        let mut rng = StdRng::seed_from_u64(23);
        let cosine = CosinePdf::new(Vec3::Z);
        let sphere = SpherePdf;
        let mixture = MixturePdf::new(&cosine, &sphere);

        let expected = 0.5 / PI + 0.5 / (4.0 * PI);
        assert!((mixture.value(Vec3::Z, &mut rng) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_hittable_pdf_targets_object() {
        let mut rng = StdRng::seed_from_u64(24);
        let light = Quad::new(
            Point3::new(-1.0, 5.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Arc::new(Lambertian::new(Vec3::ONE)),
        );
        let pdf = HittablePdf::new(&light, Point3::ZERO);

        for _ in 0..100 {
            let direction = pdf.generate(&mut rng);
            assert!(direction.y > 0.0);
            assert!(pdf.value(direction, &mut rng) > 0.0);
        }
        assert_eq!(pdf.value(-Vec3::Y, &mut rng), 0.0);
    }

    #[test]
    fn test_mixture_samples_both_components() {
        let mut rng = StdRng::seed_from_u64(25);
        // Light above, cosine lobe pointing down: the two never overlap
        let light = Quad::new(
            Point3::new(-1.0, 5.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Arc::new(Lambertian::new(Vec3::ONE)),
        );
        let toward_light = HittablePdf::new(&light, Point3::ZERO);
        let downward = CosinePdf::new(-Vec3::Y);
        let mixture = MixturePdf::new(&toward_light, &downward);

        let n = 4000;
        let upward = (0..n)
            .filter(|_| mixture.generate(&mut rng).y > 0.0)
            .count();

        let fraction = upward as f64 / n as f64;
        assert!((0.45..=0.55).contains(&fraction), "fraction toward light {}", fraction);
    }
}

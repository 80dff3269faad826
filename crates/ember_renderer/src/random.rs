//! Random sampling helpers shared by materials, PDFs and the camera.
//!
//! Everything takes `&mut dyn RngCore` so each render task can own an
//! independent, seedable generator.

use ember_math::Vec3;
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Uniform real in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform real in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Uniform integer in [min, max] (inclusive).
#[inline]
pub fn gen_int(rng: &mut dyn RngCore, min: usize, max: usize) -> usize {
    rng.gen_range(min..=max)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling; the lower bound avoids normalizing a tiny vector
    loop {
        let v = random_vec3(rng, -1.0, 1.0);
        let len_sq = v.length_squared();
        if 1e-160 < len_sq && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Random point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Cosine-weighted direction on the +z hemisphere.
pub fn random_cosine_direction(rng: &mut dyn RngCore) -> Vec3 {
    let r1 = gen_f64(rng);
    let r2 = gen_f64(rng);

    let phi = 2.0 * PI * r1;
    let x = phi.cos() * r2.sqrt();
    let y = phi.sin() * r2.sqrt();
    let z = (1.0 - r2).sqrt();

    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unit_disk_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_cosine_direction_upper_hemisphere() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let d = random_cosine_direction(&mut rng);
            assert!(d.z >= 0.0);
            assert!((d.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gen_int_inclusive() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[gen_int(&mut rng, 0, 2)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}

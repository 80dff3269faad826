//! Perlin gradient noise.

use crate::random::{gen_int, random_vec3};
use ember_math::{Point3, Vec3};
use rand::RngCore;

const POINT_COUNT: usize = 256;

/// Gradient noise over a 256-entry lattice of random unit vectors.
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT)
            .map(|_| random_vec3(rng, -1.0, 1.0).normalize_or_zero())
            .collect();

        Self {
            gradients,
            perm_x: generate_permutation(rng),
            perm_y: generate_permutation(rng),
            perm_z: generate_permutation(rng),
        }
    }

    /// Smoothed noise value in roughly [-1, 1].
    pub fn noise(&self, p: Point3) -> f64 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let index = self.perm_x[((i + di as i64) & 255) as usize]
                        ^ self.perm_y[((j + dj as i64) & 255) as usize]
                        ^ self.perm_z[((k + dk as i64) & 255) as usize];
                    *cell = self.gradients[index];
                }
            }
        }

        perlin_interp(&c, u, v, w)
    }

    /// Sum of `depth` octaves, each at double frequency and half weight.
    pub fn turbulence(&self, p: Point3, depth: u32) -> f64 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// Fisher-Yates shuffle of 0..POINT_COUNT.
fn generate_permutation(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();
    for i in (1..POINT_COUNT).rev() {
        let target = gen_int(rng, 0, i);
        p.swap(i, target);
    }
    p
}

/// Trilinear interpolation of gradient dot products with Hermite smoothing.
fn perlin_interp(c: &[[[Vec3; 2]; 2]; 2], u: f64, v: f64, w: f64) -> f64 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, gradient) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                let weight = Vec3::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * gradient.dot(weight);
            }
        }
    }
    accum
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_permutation_is_complete() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut perm = generate_permutation(&mut rng);
        perm.sort_unstable();
        assert_eq!(perm, (0..POINT_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_noise_is_zero_on_lattice() {
        // At integer coordinates only the origin corner has weight, and its offset is zero
        let mut rng = StdRng::seed_from_u64(12);
        let perlin = Perlin::new(&mut rng);
        assert!(perlin.noise(Point3::new(3.0, -2.0, 7.0)).abs() < 1e-12);
    }

    #[test]
    fn test_noise_bounded_and_deterministic() {
        let perlin_a = Perlin::new(&mut StdRng::seed_from_u64(13));
        let perlin_b = Perlin::new(&mut StdRng::seed_from_u64(13));

        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..500 {
            let p = random_vec3(&mut rng, -50.0, 50.0);
            let n = perlin_a.noise(p);
            assert!(n.abs() <= 1.5, "noise out of range: {}", n);
            assert_eq!(n, perlin_b.noise(p));
            assert!(perlin_a.turbulence(p, 7) >= 0.0);
        }
    }
}

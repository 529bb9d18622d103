//! Random draws used by initialization and transport
//!
//! All functions take the generator explicitly so a run is reproducible from
//! its seed and tests can pass a scripted `Rng`.

use rand::Rng;

use crate::simulation::states::{NVec3, Tag};

/// Isotropic unit direction in 3D: cosine of the polar angle uniform in
/// [-1, 1), azimuth uniform in [0, 2pi).
pub fn isotropic_direction<R: Rng + ?Sized>(rng: &mut R) -> NVec3 {
    let mu = 2.0 * rng.gen::<f64>() - 1.0;
    let phi = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
    let sin_theta = (1.0 - mu * mu).max(0.0).sqrt();
    NVec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), mu)
}

/// Free-flight distance from an exponential with rate `sig_t`.
/// `1 - xi` lies in (0, 1], so the result is finite and >= 0.
pub fn distance_to_collision<R: Rng + ?Sized>(sig_t: f64, rng: &mut R) -> f64 {
    let xi: f64 = rng.gen();
    -(1.0 - xi).ln() / sig_t
}

/// Number of neutrons leaving a fission: `floor(nu)`, plus one with
/// probability equal to the fractional part. The parent counts as one of them.
pub fn fission_yield<R: Rng + ?Sized>(nu: f64, rng: &mut R) -> usize {
    let base = nu.floor();
    let mut n = base as usize;
    if rng.gen::<f64>() < nu - base {
        n += 1;
    }
    n
}

pub fn random_tag<R: Rng + ?Sized>(rng: &mut R) -> Tag {
    Tag(rng.gen())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn directions_are_unit_vectors() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let u = isotropic_direction(&mut rng);
            assert!((u.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn directions_average_to_zero() {
        let mut rng = StdRng::seed_from_u64(123);
        let n = 20_000;
        let mut sum = NVec3::zeros();
        for _ in 0..n {
            sum += isotropic_direction(&mut rng);
        }
        let mean = sum / n as f64;
        assert!(mean.norm() < 0.03, "mean direction {:?}", mean);
    }

    #[test]
    fn distances_are_exponential() {
        let mut rng = StdRng::seed_from_u64(7);
        let sig_t = 0.5;
        let n = 20_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let d = distance_to_collision(sig_t, &mut rng);
            assert!(d >= 0.0 && d.is_finite());
            sum += d;
        }
        let mean = sum / n as f64;
        // mean free path 1 / sig_t = 2
        assert!((mean - 2.0).abs() < 0.08, "mean free path {mean}");
    }

    #[test]
    fn distance_is_finite_at_the_top_of_the_unit_interval() {
        let mut rng = rand::rngs::mock::StepRng::new(u64::MAX, 0);
        let d = distance_to_collision(1.0, &mut rng);
        assert!(d.is_finite() && d > 0.0);

        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        assert_eq!(distance_to_collision(1.0, &mut rng), 0.0);
    }

    #[test]
    fn fission_yield_averages_nu() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = 20_000;
        let mut total = 0usize;
        for _ in 0..n {
            let k = fission_yield(2.5, &mut rng);
            assert!(k == 2 || k == 3);
            total += k;
        }
        let mean = total as f64 / n as f64;
        assert!((mean - 2.5).abs() < 0.02, "mean yield {mean}");
    }

    #[test]
    fn integral_nu_is_exact() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert_eq!(fission_yield(2.0, &mut rng), 2);
        }
    }
}

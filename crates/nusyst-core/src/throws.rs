//! Gaussian throw generation for randomly-thrown dials.
//!
//! The random source is injected and seeded once per configuration load, so
//! a configuration is reproducible for a fixed seed.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::ParameterHeader;

/// Append `n_throws` Gaussian throws to `header.variations`.
///
/// Draws `t ~ N(0,1)` and shifts the central value by `|t|` times the lower
/// or upper one-sigma width depending on the sign of `t`. No-op unless the
/// header is randomly thrown.
pub fn generate<R: Rng + ?Sized>(header: &mut ParameterHeader, n_throws: usize, rng: &mut R) {
    if !header.is_randomly_thrown {
        return;
    }

    let (lo, hi) = header.one_sigma_shifts;
    let cv = header.central_or_zero();
    header.variations.reserve(n_throws);
    for _ in 0..n_throws {
        let t: f64 = rng.sample(StandardNormal);
        let shift = t.abs() * if t < 0.0 { lo } else { hi };
        header.variations.push(cv + shift);
    }
}

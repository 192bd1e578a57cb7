//! Stand-in detector used when text recognition is unavailable.
//!
//! Draws a resin code from a fixed distribution that mirrors how common each
//! plastic is in household waste, including a realistic miss rate. It never
//! looks at the photo.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::confidence::thresholds;
use crate::models::ResinCode;

/// Outcome weights, in parts per thousand. `None` is a simulated miss.
///
/// Misses and code 1 keep their 30% and 35% shares; the remaining 35% is split
/// across the other codes in proportion to their prevalence (2 > 5 > 4 > 6 > 3 = 7).
pub const DETECTION_WEIGHTS: [(Option<ResinCode>, u32); 8] = [
    (Some(ResinCode::Pet), 350),
    (Some(ResinCode::Hdpe), 135),
    (Some(ResinCode::Pp), 108),
    (Some(ResinCode::Ldpe), 43),
    (Some(ResinCode::Ps), 32),
    (Some(ResinCode::Pvc), 16),
    (Some(ResinCode::Other), 16),
    (None, 300),
];

/// Simulate a detection with the thread-local RNG.
pub fn simulate() -> (Option<ResinCode>, u8) {
    simulate_with(&mut rand::thread_rng())
}

/// Simulate a detection: `(code, confidence)`, where a hit always reports
/// [`thresholds::FALLBACK`] and a miss reports 0.
pub fn simulate_with<R: Rng + ?Sized>(rng: &mut R) -> (Option<ResinCode>, u8) {
    let code = match WeightedIndex::new(DETECTION_WEIGHTS.iter().map(|(_, w)| *w)) {
        Ok(dist) => DETECTION_WEIGHTS[dist.sample(rng)].0,
        // Only reachable if the table is edited to all-zero weights
        Err(e) => {
            tracing::warn!(error = %e, "Invalid fallback weight table, reporting no detection");
            None
        }
    };

    match code {
        Some(code) => {
            tracing::debug!(code = %code, "Fallback simulation picked a code");
            (Some(code), thresholds::FALLBACK)
        }
        None => {
            tracing::debug!("Fallback simulation: no detection");
            (None, 0)
        }
    }
}

//! Score computation
//!
//! `floor((removed * 15 + activations * 100) * (1 + cascades * 0.8) * speed)`.
//! The cascade multiplier grows linearly per match wave; `speed` is a
//! caller-supplied reward factor, default 1.

use nebula_match_types::{CASCADE_FACTOR, POINTS_PER_TILE, POWER_ACTIVATION_BONUS};

pub fn compute_score(removed: usize, activations: usize, cascades: usize, speed: f64) -> u64 {
    let base = removed as u64 * POINTS_PER_TILE as u64
        + activations as u64 * POWER_ACTIVATION_BONUS as u64;
    let multiplier = 1.0 + cascades as f64 * CASCADE_FACTOR;
    (base as f64 * multiplier * speed).floor() as u64
}

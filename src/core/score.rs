//! Recovery score: piecewise-linear 0..100 mapping of recovery percentage
//!
//! | recovery %  | score        |
//! |-------------|--------------|
//! | ≥ 100       | 100          |
//! | [66, 100)   | 90 → 100     |
//! | [33, 66)    | 50 → 90      |
//! | [0, 33)     | 0 → 50       |
//! | < 0         | 0            |

use crate::{
    RECOVERY_FULL_PCT, RECOVERY_HIGH_PCT, RECOVERY_MID_PCT,
    SCORE_AT_HIGH, SCORE_AT_MID, SCORE_MAX,
};

/// Unrounded score, continuous across the band edges
pub fn recovery_score_raw(percentage: f64) -> f64 {
    if percentage >= RECOVERY_FULL_PCT {
        SCORE_MAX
    } else if percentage >= RECOVERY_HIGH_PCT {
        SCORE_AT_HIGH
            + (percentage - RECOVERY_HIGH_PCT) / (RECOVERY_FULL_PCT - RECOVERY_HIGH_PCT)
                * (SCORE_MAX - SCORE_AT_HIGH)
    } else if percentage >= RECOVERY_MID_PCT {
        SCORE_AT_MID
            + (percentage - RECOVERY_MID_PCT) / (RECOVERY_HIGH_PCT - RECOVERY_MID_PCT)
                * (SCORE_AT_HIGH - SCORE_AT_MID)
    } else if percentage >= 0.0 {
        (percentage / RECOVERY_MID_PCT) * SCORE_AT_MID
    } else {
        // negative or NaN
        0.0
    }
}

/// Score rounded half-up to an integer in 0..=100
pub fn compute_recovery_score(percentage: f64) -> u8 {
    // raw is never negative, so floor(x + 0.5) is round-half-up
    (recovery_score_raw(percentage) + 0.5).floor() as u8
}

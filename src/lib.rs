//! Midpoint: debt negotiation calculator
//!
//! Tracks offer/counter-offer rounds, derives the negotiation midpoint and
//! suggested counter-offers, and summarizes the final settlement.
//!
//! Flow: form → NegotiationSession → engine → render

pub mod core;
pub mod types;

// =============================================================================
// SUGGESTION POLICY [C] - fixed, not user-configurable
// =============================================================================

/// Lower edge of the suggestion range (Aggressive Lump Sum)
pub const RANGE_LOW_FACTOR: f64 = 0.9;

/// Upper edge of the suggestion range (Strategic Monthly)
pub const RANGE_HIGH_FACTOR: f64 = 1.10;

/// Balanced Combo total relative to the midpoint
pub const COMBO_TOTAL_FACTOR: f64 = 1.02;

/// Share of the combo total paid up front
pub const COMBO_DOWN_PAYMENT_SHARE: f64 = 0.25;

/// Term of the Balanced Combo offer (months)
pub const COMBO_TERM_MONTHS: u32 = 18;

/// Term of the Strategic Monthly offer (months)
pub const MONTHLY_TERM_MONTHS: u32 = 24;

// =============================================================================
// RECOVERY SCORE BREAKPOINTS [C]
// =============================================================================

/// Recovery percentage at which the score saturates
pub const RECOVERY_FULL_PCT: f64 = 100.0;

/// Start of the top band
pub const RECOVERY_HIGH_PCT: f64 = 66.0;

/// Start of the middle band (steepest)
pub const RECOVERY_MID_PCT: f64 = 33.0;

/// Score at the start of the top band
pub const SCORE_AT_HIGH: f64 = 90.0;

/// Score at the start of the middle band
pub const SCORE_AT_MID: f64 = 50.0;

/// Maximum score
pub const SCORE_MAX: f64 = 100.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

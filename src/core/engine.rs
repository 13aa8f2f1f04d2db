//! Negotiation engine: pure round and settlement arithmetic
//!
//! Round:
//! - total = lump_sum + monthly × months (per side)
//! - midpoint = mean of both totals
//! - winner from the sign of the midpoint change (rising → Us)
//! - three counter-offers from the midpoint alone
//!
//! Settlement:
//! - recovery % against principal, discount against total balance
//!
//! Callers check input validity first, these functions never fail.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::{
    RANGE_LOW_FACTOR, RANGE_HIGH_FACTOR, COMBO_TOTAL_FACTOR,
    COMBO_DOWN_PAYMENT_SHARE, COMBO_TERM_MONTHS, MONTHLY_TERM_MONTHS,
};
use crate::core::score::compute_recovery_score;
use crate::types::{
    OfferStructure, RoundRecord, RoundTally, SettlementSummary,
    SuggestedOffer, SuggestedOfferSet, Winner,
};

/// Everything computed for one round, before it gets an index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub debtor: OfferStructure,
    pub debtor_total: f64,
    pub ours: OfferStructure,
    pub our_total: f64,
    pub midpoint: f64,
    pub midpoint_change: Option<f64>,
    pub winner: Winner,
    pub suggestions: SuggestedOfferSet,
}

impl RoundOutcome {
    /// Attach the round index and drop the suggestions
    pub fn to_record(&self, round: u32) -> RoundRecord {
        RoundRecord {
            round,
            debtor: self.debtor,
            debtor_total: self.debtor_total,
            ours: self.ours,
            our_total: self.our_total,
            midpoint: self.midpoint,
            winner: self.winner,
            midpoint_change: self.midpoint_change,
        }
    }
}

/// Compute a round from both offers and the previous round's midpoint
pub fn compute_round(
    debtor: &OfferStructure,
    ours: &OfferStructure,
    prior_midpoint: Option<f64>,
) -> RoundOutcome {
    let debtor_total = debtor.total();
    let our_total = ours.total();
    let midpoint = (debtor_total + our_total) / 2.0;

    let midpoint_change = prior_midpoint.map(|prior| midpoint - prior);
    let winner = Winner::from_change(midpoint_change);

    RoundOutcome {
        debtor: *debtor,
        debtor_total,
        ours: *ours,
        our_total,
        midpoint,
        midpoint_change,
        winner,
        suggestions: suggest_offers(midpoint),
    }
}

/// Suggestion range around the midpoint: (low, high)
pub fn suggestion_range(midpoint: f64) -> (f64, f64) {
    (midpoint * RANGE_LOW_FACTOR, midpoint * RANGE_HIGH_FACTOR)
}

/// Derive the three counter-offers from a midpoint
pub fn suggest_offers(midpoint: f64) -> SuggestedOfferSet {
    let (low, high) = suggestion_range(midpoint);

    let combo_total = midpoint * COMBO_TOTAL_FACTOR;
    let combo_lump_sum = combo_total * COMBO_DOWN_PAYMENT_SHARE;
    let combo_monthly = (combo_total - combo_lump_sum) / COMBO_TERM_MONTHS as f64;

    let monthly_payment = high / MONTHLY_TERM_MONTHS as f64;

    SuggestedOfferSet {
        lump_sum: SuggestedOffer {
            lump_sum: Some(low),
            monthly: None,
            months: None,
            total: low,
        },
        combo: SuggestedOffer {
            lump_sum: Some(combo_lump_sum),
            monthly: Some(combo_monthly),
            months: Some(COMBO_TERM_MONTHS),
            total: combo_total,
        },
        monthly: SuggestedOffer {
            lump_sum: None,
            monthly: Some(monthly_payment),
            months: Some(MONTHLY_TERM_MONTHS),
            total: high,
        },
    }
}

/// Build the settlement summary from the agreed terms and the round history
///
/// A non-positive principal yields 0 %, a non-positive total balance
/// yields a discount of 0.
pub fn finalize_settlement(
    settled: &OfferStructure,
    principal_balance: f64,
    total_balance: f64,
    history: &[RoundRecord],
    loan_number: &str,
    settlement_date: &str,
) -> SettlementSummary {
    let total_recovered = settled.total();

    let recovery_percentage = if principal_balance > 0.0 {
        (total_recovered / principal_balance) * 100.0
    } else {
        0.0
    };

    let discount_from_total = if total_balance > 0.0 {
        total_balance - total_recovered
    } else {
        0.0
    };

    SettlementSummary {
        tally: RoundTally::from_history(history),
        total_recovered,
        recovery_percentage,
        discount_from_total,
        recovery_score: compute_recovery_score(recovery_percentage),
        final_lump_sum: settled.lump_sum,
        final_monthly: settled.monthly,
        final_months: settled.months,
        loan_number: loan_number.to_string(),
        settlement_date: settlement_date.to_string(),
        finalized_at: Utc::now(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

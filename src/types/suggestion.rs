//! Suggested counter-offers derived from the latest midpoint

use serde::{Deserialize, Serialize};

/// A single suggested counter-offer
///
/// Only the fields relevant to the offer's structure are set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestedOffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lump_sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,
    pub total: f64,
}

/// The three counter-offer variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestedOfferSet {
    /// Aggressive Lump Sum: bottom of the range, paid at once
    pub lump_sum: SuggestedOffer,
    /// Balanced Combo: down payment plus an 18-month plan
    pub combo: SuggestedOffer,
    /// Strategic Monthly: top of the range over 24 months
    pub monthly: SuggestedOffer,
}

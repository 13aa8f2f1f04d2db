//! Offer structures: resolved (engine side) and draft (form side)

use serde::{Deserialize, Serialize};

/// A fully resolved offer: lump sum plus a monthly payment plan
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OfferStructure {
    /// Up-front payment
    pub lump_sum: f64,
    /// Monthly payment amount
    pub monthly: f64,
    /// Number of monthly payments
    pub months: u32,
}

impl OfferStructure {
    pub fn new(lump_sum: f64, monthly: f64, months: u32) -> Self {
        Self { lump_sum, monthly, months }
    }

    /// Offer consisting of a single payment
    pub fn lump_sum(amount: f64) -> Self {
        Self::new(amount, 0.0, 0)
    }

    /// lump_sum + monthly × months
    pub fn total(&self) -> f64 {
        self.lump_sum + self.monthly * self.months as f64
    }
}

/// An offer as entered so far. Absent fields are `None`, never a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OfferDraft {
    pub lump_sum: Option<f64>,
    pub monthly: Option<f64>,
    pub months: Option<u32>,
}

impl OfferDraft {
    pub fn new(lump_sum: Option<f64>, monthly: Option<f64>, months: Option<u32>) -> Self {
        Self { lump_sum, monthly, months }
    }

    /// A lump sum, or a monthly amount together with its term.
    pub fn is_complete(&self) -> bool {
        self.lump_sum.is_some() || (self.monthly.is_some() && self.months.is_some())
    }

    /// Nothing entered at all
    pub fn is_empty(&self) -> bool {
        self.lump_sum.is_none() && self.monthly.is_none() && self.months.is_none()
    }

    /// Resolve to an offer, absent fields count as zero
    pub fn resolve(&self) -> OfferStructure {
        OfferStructure {
            lump_sum: self.lump_sum.unwrap_or(0.0),
            monthly: self.monthly.unwrap_or(0.0),
            months: self.months.unwrap_or(0),
        }
    }

    /// Running total, used for the live preview while typing
    pub fn total(&self) -> f64 {
        self.resolve().total()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_combines_lump_and_plan() {
        let offer = OfferStructure::new(500.0, 100.0, 12);
        assert_eq!(offer.total(), 1700.0);
    }

    #[test]
    fn test_lump_sum_alone_is_complete() {
        let draft = OfferDraft::new(Some(1000.0), None, None);
        assert!(draft.is_complete());
    }

    #[test]
    fn test_monthly_needs_months() {
        assert!(!OfferDraft::new(None, Some(100.0), None).is_complete());
        assert!(!OfferDraft::new(None, None, Some(12)).is_complete());
        assert!(OfferDraft::new(None, Some(100.0), Some(12)).is_complete());
    }

    #[test]
    fn test_resolve_defaults_to_zero() {
        let draft = OfferDraft::new(None, Some(250.0), Some(4));
        let offer = draft.resolve();
        assert_eq!(offer, OfferStructure::new(0.0, 250.0, 4));
        assert_eq!(draft.total(), 1000.0);
    }

    #[test]
    fn test_partial_plan_still_previews() {
        // Monthly without a term contributes nothing yet
        let draft = OfferDraft::new(Some(300.0), Some(50.0), None);
        assert_eq!(draft.total(), 300.0);
    }

    #[test]
    fn test_clear() {
        let mut draft = OfferDraft::new(Some(1.0), Some(2.0), Some(3));
        draft.clear();
        assert!(draft.is_empty());
    }
}

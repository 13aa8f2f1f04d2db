//! Round records and the per-round chart series

use serde::{Deserialize, Serialize};
use crate::types::OfferStructure;

/// Who "won" a round, judged by how the midpoint moved
///
/// A rising midpoint counts for us, a falling one for the debtor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Us,
    Debtor,
    Tie,
}

impl Winner {
    /// Classify a midpoint change. No prior round, or no movement, is a tie.
    pub fn from_change(change: Option<f64>) -> Self {
        match change {
            Some(delta) if delta > 0.0 => Winner::Us,
            Some(delta) if delta < 0.0 => Winner::Debtor,
            _ => Winner::Tie,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Winner::Us => "Us",
            Winner::Debtor => "Debtor",
            Winner::Tie => "Tie",
        };
        write!(f, "{}", name)
    }
}

/// One recorded round. Immutable once appended to the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based, contiguous
    pub round: u32,
    pub debtor: OfferStructure,
    pub debtor_total: f64,
    pub ours: OfferStructure,
    pub our_total: f64,
    pub midpoint: f64,
    pub winner: Winner,
    /// None only for the first round
    pub midpoint_change: Option<f64>,
}

impl RoundRecord {
    /// Chart label, e.g. "Round 3"
    pub fn label(&self) -> String {
        format!("Round {}", self.round)
    }

    pub fn chart_point(&self) -> ChartPoint {
        ChartPoint {
            label: self.label(),
            debtor_total: self.debtor_total,
            our_total: self.our_total,
            midpoint: self.midpoint,
        }
    }
}

/// One point of the negotiation progress chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub debtor_total: f64,
    pub our_total: f64,
    pub midpoint: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_sign_convention() {
        assert_eq!(Winner::from_change(None), Winner::Tie);
        assert_eq!(Winner::from_change(Some(0.0)), Winner::Tie);
        assert_eq!(Winner::from_change(Some(-0.0)), Winner::Tie);
        assert_eq!(Winner::from_change(Some(0.01)), Winner::Us);
        assert_eq!(Winner::from_change(Some(-250.0)), Winner::Debtor);
    }

    #[test]
    fn test_winner_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Winner::Debtor).unwrap(), "\"Debtor\"");
    }
}

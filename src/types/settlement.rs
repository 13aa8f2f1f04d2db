//! Settlement summary, produced once when the negotiation is finalized

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{RoundRecord, Winner};

/// Win/loss/tie counts over the round history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundTally {
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
}

impl RoundTally {
    pub fn from_history(history: &[RoundRecord]) -> Self {
        history.iter().fold(Self::default(), |mut tally, round| {
            match round.winner {
                Winner::Us => tally.wins += 1,
                Winner::Debtor => tally.losses += 1,
                Winner::Tie => tally.ties += 1,
            }
            tally
        })
    }

    /// "W-L-T"
    pub fn record_string(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// Final settlement terms and recovery figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub tally: RoundTally,
    pub total_recovered: f64,
    /// total_recovered / principal × 100, or 0 without a principal
    pub recovery_percentage: f64,
    /// total balance − total_recovered, or 0 without a total balance
    pub discount_from_total: f64,
    /// 0..=100, see `compute_recovery_score`
    pub recovery_score: u8,
    pub final_lump_sum: f64,
    pub final_monthly: f64,
    pub final_months: u32,
    pub loan_number: String,
    pub settlement_date: String,
    pub finalized_at: DateTime<Utc>,
}

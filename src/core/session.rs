//! Negotiation session: the single aggregate holding all negotiation state
//!
//! Lifecycle:
//! - OPEN: balances editable, rounds may be recorded
//! - OPEN (rounds > 0): balances locked
//! - SETTLED: summary available, no more rounds
//! - reset() → back to a fresh OPEN session

use tracing::{debug, info, warn};
use crate::core::engine::{self, RoundOutcome};
use crate::types::{
    ChartPoint, NegotiationError, OfferDraft, RoundRecord, SettlementSummary,
    Side, SuggestedOfferSet,
};

/// All state of one negotiation
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationSession {
    /// Total balance owed, write-once until the first round
    total_balance: Option<f64>,
    /// Principal balance, write-once until the first round
    principal_balance: Option<f64>,
    /// Recorded rounds, contiguous from 1
    history: Vec<RoundRecord>,
    /// Index the next round will get
    round_number: u32,
    /// Midpoint of the latest round
    current_midpoint: Option<f64>,
    /// Counter-offers for the latest midpoint
    suggestions: Option<SuggestedOfferSet>,
    settled: bool,
    summary: Option<SettlementSummary>,
}

impl Default for NegotiationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl NegotiationSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            total_balance: None,
            principal_balance: None,
            history: Vec::new(),
            round_number: 1,
            current_midpoint: None,
            suggestions: None,
            settled: false,
            summary: None,
        }
    }

    // =========================================================================
    // Account balances
    // =========================================================================

    pub fn set_total_balance(&mut self, value: Option<f64>) -> Result<(), NegotiationError> {
        self.ensure_balances_editable()?;
        self.total_balance = value;
        Ok(())
    }

    pub fn set_principal_balance(&mut self, value: Option<f64>) -> Result<(), NegotiationError> {
        self.ensure_balances_editable()?;
        self.principal_balance = value;
        Ok(())
    }

    fn ensure_balances_editable(&self) -> Result<(), NegotiationError> {
        if !self.balances_editable() {
            warn!(rounds = self.history.len(), settled = self.settled, "balance edit refused");
            return Err(NegotiationError::BalancesLocked);
        }
        Ok(())
    }

    /// Balances can change until the first round or settlement
    pub fn balances_editable(&self) -> bool {
        self.history.is_empty() && !self.settled
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Compute and record a round from both drafts
    ///
    /// Refused when either draft is incomplete or the session is settled.
    pub fn record_round(
        &mut self,
        debtor: &OfferDraft,
        ours: &OfferDraft,
    ) -> Result<&RoundRecord, NegotiationError> {
        if self.settled {
            warn!("round refused: session already settled");
            return Err(NegotiationError::SessionAlreadySettled);
        }
        if !debtor.is_complete() {
            warn!("round refused: debtor offer incomplete");
            return Err(NegotiationError::InvalidRoundInput { side: Side::Debtor });
        }
        if !ours.is_complete() {
            warn!("round refused: our offer incomplete");
            return Err(NegotiationError::InvalidRoundInput { side: Side::Ours });
        }

        let prior_midpoint = self.history.last().map(|r| r.midpoint);
        let outcome = engine::compute_round(&debtor.resolve(), &ours.resolve(), prior_midpoint);
        debug!(
            debtor_total = outcome.debtor_total,
            our_total = outcome.our_total,
            midpoint = outcome.midpoint,
            change = ?outcome.midpoint_change,
            "round computed"
        );

        Ok(self.apply(outcome))
    }

    fn apply(&mut self, outcome: RoundOutcome) -> &RoundRecord {
        let record = outcome.to_record(self.round_number);
        info!(round = record.round, midpoint = record.midpoint, winner = %record.winner, "round recorded");

        self.current_midpoint = Some(outcome.midpoint);
        self.suggestions = Some(outcome.suggestions);
        self.round_number += 1;
        self.history.push(record);

        // just pushed
        &self.history[self.history.len() - 1]
    }

    /// Finalize the settlement with the agreed terms
    ///
    /// Requires a principal balance and a complete settled offer.
    pub fn finalize_settlement(
        &mut self,
        settled: &OfferDraft,
        loan_number: &str,
        settlement_date: &str,
    ) -> Result<&SettlementSummary, NegotiationError> {
        if self.settled {
            warn!("settlement refused: already settled");
            return Err(NegotiationError::SessionAlreadySettled);
        }
        let principal = match self.principal_balance {
            Some(p) if settled.is_complete() => p,
            _ => {
                warn!(principal = ?self.principal_balance, "settlement refused: incomplete input");
                return Err(NegotiationError::InvalidSettlementInput);
            }
        };

        let summary = engine::finalize_settlement(
            &settled.resolve(),
            principal,
            self.total_balance.unwrap_or(0.0),
            &self.history,
            loan_number,
            settlement_date,
        );
        info!(
            recovered = summary.total_recovered,
            recovery_pct = summary.recovery_percentage,
            score = summary.recovery_score,
            record = %summary.tally.record_string(),
            "settlement finalized"
        );

        self.settled = true;
        Ok(&*self.summary.insert(summary))
    }

    /// Drop everything and start over
    pub fn reset(&mut self) {
        info!(rounds = self.history.len(), settled = self.settled, "session reset");
        *self = Self::new();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn total_balance(&self) -> Option<f64> {
        self.total_balance
    }

    pub fn principal_balance(&self) -> Option<f64> {
        self.principal_balance
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Index the next round will be recorded under
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn current_midpoint(&self) -> Option<f64> {
        self.current_midpoint
    }

    pub fn suggestions(&self) -> Option<&SuggestedOfferSet> {
        self.suggestions.as_ref()
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn summary(&self) -> Option<&SettlementSummary> {
        self.summary.as_ref()
    }

    /// Per-round series for the progress chart, in round order
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.history.iter().map(RoundRecord::chart_point).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

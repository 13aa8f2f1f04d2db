//! Input form: turns typed text into optional numeric fields and drives the session
//!
//! Numeric fields behave like a browser number box fed through parseFloat:
//! - empty → absent
//! - leading number taken, trailing junk ignored ("12a" → 12, "12." → 12)
//! - no leading number → rejected, field keeps its previous value

use lazy_static::lazy_static;
use regex::Regex;
use crate::core::session::NegotiationSession;
use crate::types::{
    FormError, InputError, NegotiationError, OfferDraft, RoundRecord, SettlementSummary,
};

lazy_static! {
    /// Longest leading decimal literal, optional sign and exponent
    static ref RE_LEADING_NUMBER: Regex = Regex::new(
        r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?"
    ).unwrap();
}

/// Parse a numeric field. `Ok(None)` means the field was cleared.
pub fn parse_number(text: &str) -> Result<Option<f64>, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let literal = RE_LEADING_NUMBER
        .find(text)
        .map(|m| m.as_str())
        .ok_or_else(|| InputError::NotANumber(text.to_string()))?;
    // "1e999" overflows to infinity, which is not a usable amount
    match literal.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(InputError::NotANumber(text.to_string())),
    }
}

/// Parse a money field, negatives rejected
pub fn parse_amount(text: &str) -> Result<Option<f64>, InputError> {
    match parse_number(text)? {
        Some(v) if v < 0.0 => Err(InputError::Negative(text.trim().to_string())),
        other => Ok(other),
    }
}

/// Parse a month count, must be a whole non-negative number
pub fn parse_months(text: &str) -> Result<Option<u32>, InputError> {
    match parse_amount(text)? {
        None => Ok(None),
        Some(v) if v.fract() != 0.0 => Err(InputError::FractionalMonths(text.trim().to_string())),
        Some(v) if v > u32::MAX as f64 => Err(InputError::MonthsOutOfRange(text.trim().to_string())),
        Some(v) => Ok(Some(v as u32)),
    }
}

/// One of the three fields of an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferField {
    LumpSum,
    Monthly,
    Months,
}

impl std::str::FromStr for OfferField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lump" | "lump_sum" | "lumpsum" => Ok(OfferField::LumpSum),
            "monthly" => Ok(OfferField::Monthly),
            "months" => Ok(OfferField::Months),
            _ => Err(InputError::UnknownField(s.to_string())),
        }
    }
}

/// Set one field from text. "-" clears the field.
pub fn set_offer_field(draft: &mut OfferDraft, field: OfferField, text: &str) -> Result<(), InputError> {
    let text = if text.trim() == "-" { "" } else { text };
    match field {
        OfferField::LumpSum => draft.lump_sum = parse_amount(text)?,
        OfferField::Monthly => draft.monthly = parse_amount(text)?,
        OfferField::Months => draft.months = parse_months(text)?,
    }
    Ok(())
}

/// Apply "key=value" assignments, all or nothing
///
/// `lump=1000 monthly=100 months=12`
pub fn apply_assignments(draft: &mut OfferDraft, assignments: &str) -> Result<(), InputError> {
    let mut updated = *draft;
    for pair in assignments.split_whitespace() {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| InputError::Malformed(pair.to_string()))?;
        let field: OfferField = key.parse()?;
        set_offer_field(&mut updated, field, value)?;
    }
    *draft = updated;
    Ok(())
}

/// Parse a compact "lump,monthly,months" offer; empty slots are absent
///
/// `"1000,,"`, `",150,12"`, `"500"`
pub fn parse_offer_triplet(text: &str) -> Result<OfferDraft, InputError> {
    let mut parts = text.split(',');
    let mut draft = OfferDraft::default();
    draft.lump_sum = parse_amount(parts.next().unwrap_or(""))?;
    draft.monthly = parse_amount(parts.next().unwrap_or(""))?;
    draft.months = parse_months(parts.next().unwrap_or(""))?;
    match parts.next() {
        Some(extra) => Err(InputError::Malformed(extra.to_string())),
        None => Ok(draft),
    }
}

/// The editable fields around a negotiation session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NegotiationForm {
    pub debtor: OfferDraft,
    pub ours: OfferDraft,
    pub settled: OfferDraft,
    pub loan_number: String,
    pub settlement_date: String,
}

impl NegotiationForm {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Both round offers are complete
    pub fn can_calculate(&self) -> bool {
        self.debtor.is_complete() && self.ours.is_complete()
    }

    /// Principal entered and the settled offer is complete
    pub fn can_settle(&self, session: &NegotiationSession) -> bool {
        session.principal_balance().is_some() && self.settled.is_complete()
    }

    /// Settlement terms can be entered once a round exists, until settled
    pub fn settlement_open(&self, session: &NegotiationSession) -> bool {
        !session.history().is_empty() && !session.is_settled()
    }

    /// Anything worth resetting
    pub fn show_reset(&self, session: &NegotiationSession) -> bool {
        session.total_balance().is_some()
            || session.principal_balance().is_some()
            || !session.history().is_empty()
    }

    /// Live total of our offer being typed
    pub fn our_total_preview(&self) -> f64 {
        self.ours.total()
    }

    // =========================================================================
    // Field entry
    // =========================================================================

    pub fn enter_total_balance(&self, session: &mut NegotiationSession, text: &str) -> Result<(), FormError> {
        let value = parse_amount(text)?;
        session.set_total_balance(value)?;
        Ok(())
    }

    pub fn enter_principal_balance(&self, session: &mut NegotiationSession, text: &str) -> Result<(), FormError> {
        let value = parse_amount(text)?;
        session.set_principal_balance(value)?;
        Ok(())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Record the round and clear the six round fields
    pub fn calculate(&mut self, session: &mut NegotiationSession) -> Result<RoundRecord, NegotiationError> {
        let record = session.record_round(&self.debtor, &self.ours)?.clone();
        self.debtor.clear();
        self.ours.clear();
        Ok(record)
    }

    /// Finalize the settlement with the entered terms
    pub fn finalize(&mut self, session: &mut NegotiationSession) -> Result<SettlementSummary, NegotiationError> {
        if session.is_settled() {
            return Err(NegotiationError::SessionAlreadySettled);
        }
        if !self.settlement_open(session) {
            return Err(NegotiationError::SettlementNotOpen);
        }
        let summary = session
            .finalize_settlement(&self.settled, &self.loan_number, &self.settlement_date)?
            .clone();
        Ok(summary)
    }

    /// Clear every field and the session
    pub fn reset(&mut self, session: &mut NegotiationSession) {
        *self = Self::new();
        session.reset();
    }
}

//! Refusals surfaced by the session and the input form
//!
//! None of these are fatal. A refused operation leaves all state unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the table an offer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Debtor,
    Ours,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Debtor => write!(f, "debtor"),
            Side::Ours => write!(f, "our"),
        }
    }
}

/// Session-level refusals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    #[error("Cannot calculate yet: {side} offer needs a lump sum or a monthly amount with a number of months")]
    InvalidRoundInput { side: Side },

    #[error("Cannot settle yet: principal balance and a lump sum or monthly amount with a number of months are required")]
    InvalidSettlementInput,

    #[error("Negotiation already settled, reset to start over")]
    SessionAlreadySettled,

    #[error("Account balances are locked once the first round is recorded")]
    BalancesLocked,

    #[error("Record at least one round before settling")]
    SettlementNotOpen,
}

/// Rejected field text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("Amount cannot be negative: {0}")]
    Negative(String),

    #[error("Number of months must be a whole number: {0}")]
    FractionalMonths(String),

    #[error("Number of months is too large: {0}")]
    MonthsOutOfRange(String),

    #[error("Unknown field '{0}' (expected lump, monthly or months)")]
    UnknownField(String),

    #[error("Expected key=value, got '{0}'")]
    Malformed(String),
}

/// Anything the input form can refuse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
}

//! Core modules for Midpoint

pub mod engine;
pub mod score;
pub mod session;
pub mod form;
pub mod render;

pub use engine::{compute_round, suggest_offers, suggestion_range, finalize_settlement, RoundOutcome};
pub use score::{compute_recovery_score, recovery_score_raw};
pub use session::NegotiationSession;
pub use form::{NegotiationForm, OfferField, parse_number, parse_amount, parse_months, parse_offer_triplet, apply_assignments};

//! Core types for Midpoint

mod offer;
mod round;
mod suggestion;
mod settlement;
mod error;

pub use offer::{OfferStructure, OfferDraft};
pub use round::{Winner, RoundRecord, ChartPoint};
pub use suggestion::{SuggestedOffer, SuggestedOfferSet};
pub use settlement::{SettlementSummary, RoundTally};
pub use error::{NegotiationError, InputError, FormError, Side};

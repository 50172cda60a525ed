//! Route resolution engine.
//!
//! Answers "how do I get from landmark A to landmark B" over a loaded
//! [`Snapshot`](crate::snapshot::Snapshot):
//!
//! 1. find base routes both landmarks list at acceptable proximity,
//! 2. keep route variants that pass the boarding stop before the alighting
//!    stop,
//! 3. if none, fall back to two-route combinations sharing a stop.
//!
//! Resolution is synchronous and never fails; every outcome is a
//! [`ResolutionResult`] status.

mod config;
mod format;
mod proximity;
mod resolve;
mod result;
mod sequence;
mod transfer;

#[cfg(test)]
mod resolve_tests;

pub use config::ResolverConfig;
pub use format::render_text;
pub use proximity::{CandidateBase, find_common_routes};
pub use resolve::Resolver;
pub use result::{Reason, ResolutionResult, RouteSuggestion, Status, Suggestion, TransferSuggestion};
pub use sequence::{ValidatedRoute, forward_pair, validate};
pub use transfer::{TransferOption, find_transfers, stops_connect};

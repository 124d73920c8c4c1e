//! Best-match search over the gallery and the accept/reject decision.
//!
//! `resolve` scores every template against a region and keeps the lowest
//! normalized squared difference; `DecisionPolicy` turns that best match
//! into an [`Outcome`].

mod decision;
mod resolve;

pub use decision::{DecisionPolicy, Outcome, DEFAULT_MATCH_THRESHOLD};
pub use resolve::{resolve, resolve_region, BestMatch};

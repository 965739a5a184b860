//! Service layer for job analysis.
//!
//! Provides the backend client and the session that drives one
//! extract-and-submit round trip.

mod backend;
mod session;

pub use backend::{AnalysisBackend, HttpBackend};
pub use session::{AnalysisOutcome, AnalysisSession, sponsorship_query};

//! Surgical line editing engine.
//!
//! Synchronous and filesystem-backed. The tool layer wraps it for agents.

pub mod diff;
pub mod error;
pub mod fuzzy;
pub mod lines;
pub mod locate;
pub mod ops;
pub mod report;
pub mod storage;

pub use diff::{DiffStats, diff_stats, inline_diff, unified_diff};
pub use error::{Diagnostics, EditErrorKind, EditFailure, Suggestion};
pub use fuzzy::{FuzzyConfig, find_similar, similarity};
pub use lines::FileLines;
pub use locate::{MatchCandidate, find_literal};
pub use report::FailureReport;
pub use ops::{EditSuccess, FindMatch, FindReport, LineEditor, LineView, Operation};

//! Scan pipeline
//!
//! Fetch -> parse -> rank for the daily snapshot, then fetch -> compute for
//! each symbol's chart. The selection produced by the first stage is handed
//! to the second explicitly.

pub mod chart;
pub mod engine;

pub use chart::*;
pub use engine::*;

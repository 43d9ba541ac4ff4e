//! Market data module
//!
//! Daily bars, history ranges and scan-date helpers.

pub mod bar;
pub mod calendar;
pub mod range;

pub use bar::*;
pub use calendar::*;
pub use range::*;

//! Ranking and filtering of snapshot rows

pub mod sector;
pub mod selection;

pub use sector::*;
pub use selection::*;

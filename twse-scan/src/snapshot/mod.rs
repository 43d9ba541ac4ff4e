//! Daily market snapshot
//!
//! Parses the exchange-wide `MI_INDEX` report into [`SnapshotRow`]s and
//! derives each row's percent change.

pub mod change;
pub mod parser;
pub mod row;

pub use change::*;
pub use parser::*;
pub use row::*;

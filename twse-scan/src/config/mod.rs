//! Configuration module

pub mod http;
pub mod indicator;
pub mod scan;

pub use http::*;
pub use indicator::*;
pub use scan::*;

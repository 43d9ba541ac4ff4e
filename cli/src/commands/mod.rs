pub mod chart;
pub mod scan;
pub mod version;

pub mod chart;
pub mod footer;
pub mod header;

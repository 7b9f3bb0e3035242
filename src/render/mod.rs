//! Rendering: plotly figures and JSON dumps of the aggregates.

pub mod figure;
pub mod json;

pub use figure::Figure;
pub use json::write_summary;

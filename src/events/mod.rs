//! CSV ingestion for simulation event logs.

pub mod parse;
pub mod row;

pub use parse::read_events;
pub use row::{Column, EventRecord};

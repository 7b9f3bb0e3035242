//! Aggregation model: filter event rows and bucket them by minute.

pub mod density;
pub mod scatter;

pub use density::{axis_max, dual_condition, single_condition_minutes};
pub use scatter::{ScatterPoint, scatter_points};

use crate::events::EventRecord;
use serde::Serialize;

pub const TARGET_STATION: &str = "target_station";
pub const STATION: &str = "station";

/// A target station reached with the marker payload.
pub fn is_target_hit(event: &EventRecord) -> bool {
    event.kind == TARGET_STATION && event.data.contains('0')
}

/// A regular station holding the second marker payload.
pub fn is_station_hit(event: &EventRecord) -> bool {
    event.kind == STATION && event.data.contains('2')
}

/// Per-file aggregate, as written by `--dump`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesData {
    /// Minute values fed to the density estimate.
    Minutes {
        minutes: Vec<u64>,
        /// Set only for dual-condition runs.
        #[serde(skip_serializing_if = "Option::is_none")]
        valid_iterations: Option<Vec<u64>>,
    },
    Points { points: Vec<ScatterPoint> },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileSeries {
    pub path: String,
    pub label: String,
    pub rows: usize,
    #[serde(flatten)]
    pub data: SeriesData,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub command: String,
    /// Upper x bound shared by all density curves; absent for scatter plots.
    pub axis_max: Option<u64>,
    pub files: Vec<FileSeries>,
}

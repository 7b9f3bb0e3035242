use serde::Deserialize;
use std::fmt;

/// Ticks per minute bucket.
pub const TICKS_PER_MINUTE: u64 = 3600;

/// A single row from a simulation CSV log.
///
/// Columns are matched by header name; anything not listed here is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    pub tick: u64,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub data: String,

    /// Only present in logs written by multi-run experiments.
    #[serde(default)]
    pub iteration: Option<u64>,
}

impl EventRecord {
    /// Minute bucket of this row: floor(tick / 3600).
    pub fn minute(&self) -> u64 {
        self.tick / TICKS_PER_MINUTE
    }

    /// Number of comma-separated items in `data`. An empty field still counts as one.
    pub fn item_count(&self) -> usize {
        self.data.split(',').count()
    }
}

/// Header names a command can require before reading rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Tick,
    Type,
    Data,
    Iteration,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Self::Tick => "tick",
            Self::Type => "type",
            Self::Data => "data",
            Self::Iteration => "iteration",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

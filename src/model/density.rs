//! Minute selections feeding the density plots.

use crate::events::EventRecord;
use crate::model::{is_station_hit, is_target_hit};
use std::collections::BTreeSet;

/// Minutes of every target hit, in row order. Duplicates are kept.
pub fn single_condition_minutes(events: &[EventRecord]) -> Vec<u64> {
    events
        .iter()
        .filter(|e| is_target_hit(e))
        .map(EventRecord::minute)
        .collect()
}

/// Iterations that produced both a target hit and a station hit.
pub fn valid_iterations(events: &[EventRecord]) -> BTreeSet<u64> {
    let iterations_of = |pred: fn(&EventRecord) -> bool| -> BTreeSet<u64> {
        events
            .iter()
            .filter(|e| pred(e))
            .filter_map(|e| e.iteration)
            .collect()
    };

    let targets = iterations_of(is_target_hit);
    let stations = iterations_of(is_station_hit);
    targets.intersection(&stations).copied().collect()
}

/// Result of the dual-condition filter for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualSelection {
    pub valid_iterations: BTreeSet<u64>,
    /// Target-hit minutes restricted to valid iterations (not deduplicated).
    pub curve_minutes: Vec<u64>,
    /// Unique minutes of any row in a valid iteration; only drives the x-axis range.
    pub axis_minutes: Vec<u64>,
}

pub fn dual_condition(events: &[EventRecord]) -> DualSelection {
    let valid = valid_iterations(events);
    let in_valid = |e: &EventRecord| e.iteration.is_some_and(|it| valid.contains(&it));

    let curve_minutes = events
        .iter()
        .filter(|e| is_target_hit(e) && in_valid(e))
        .map(EventRecord::minute)
        .collect();

    let axis_minutes: BTreeSet<u64> = events
        .iter()
        .filter(|e| in_valid(e))
        .map(EventRecord::minute)
        .collect();

    DualSelection {
        curve_minutes,
        axis_minutes: axis_minutes.into_iter().collect(),
        valid_iterations: valid,
    }
}

/// Upper bound of the shared x-axis: largest minute over all files plus one.
pub fn axis_max<'a, I>(lists: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a [u64]>,
{
    lists
        .into_iter()
        .flat_map(|l| l.iter().copied())
        .max()
        .map(|m| m + 1)
}

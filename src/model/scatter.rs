//! Mean data-item count per minute bucket.

use crate::events::EventRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub minute: u64,
    pub mean_items: f64,
}

/// One point per populated minute, ascending. Every row counts, regardless of type.
pub fn scatter_points(events: &[EventRecord]) -> Vec<ScatterPoint> {
    let mut per_minute: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
    for event in events {
        let items = event.item_count();
        log::trace!("tick {}: {} data items", event.tick, items);
        per_minute.entry(event.minute()).or_default().push(items);
    }

    per_minute
        .into_iter()
        .map(|(minute, counts)| ScatterPoint {
            minute,
            mean_items: counts.iter().sum::<usize>() as f64 / counts.len() as f64,
        })
        .collect()
}

use crate::Result;
use crate::events::row::{Column, EventRecord};
use anyhow::{Context, bail};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, Read};

/// Read a simulation CSV log into event records, in file order.
///
/// Expected layout: a header row followed by one event per line, e.g.
///
/// tick,type,data,iteration
/// 3600,target_station,"0,1",4
///
/// Every column in `required` must appear in the header. The file handle is
/// dropped as soon as the rows are read.
pub fn read_events(path: &str, required: &[Column]) -> Result<Vec<EventRecord>> {
    let file = File::open(path).with_context(|| format!("open event log {}", path))?;
    read_events_from(BufReader::new(file), path, required)
}

/// Same as [`read_events`] over any reader; `source` is only used in error messages.
pub fn read_events_from<R: Read>(
    reader: R,
    source: &str,
    required: &[Column],
) -> Result<Vec<EventRecord>> {
    // Header names are matched trimmed, so "tick, type" still maps onto the fields.
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .with_context(|| format!("read header row of {}", source))?
        .clone();
    for column in required {
        if !headers.iter().any(|h| h == column.header()) {
            bail!("{}: missing required column `{}`", source, column);
        }
    }

    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<EventRecord>().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let record = result.with_context(|| format!("{}:{}: malformed row", source, idx + 2))?;
        out.push(record);
    }

    Ok(out)
}

use crate::Result;
use crate::model::Summary;
use anyhow::Context;
use std::path::Path;

/// Write the per-file aggregates as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).with_context(|| format!("write summary {}", path.display()))?;
    log::info!("aggregates written to {}", path.display());
    Ok(())
}

//! Display options shared by every plot command.

use crate::kde::Bandwidth;
use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_Y_MAX: f64 = 0.4;
pub const DEFAULT_POINTS: usize = 1000;

#[derive(Args, Debug, Clone)]
pub struct PlotConfig {
    /// Upper bound of the density axis. Curves above it are clipped.
    #[arg(long, global = true, default_value_t = DEFAULT_Y_MAX)]
    pub y_max: f64,

    /// Number of positions each density curve is evaluated at.
    #[arg(long, global = true, default_value_t = DEFAULT_POINTS)]
    pub points: usize,

    /// Bandwidth rule for the kernel density estimate.
    #[arg(long, global = true, value_enum, default_value = "scott")]
    pub bandwidth: Bandwidth,

    /// Write the figure to this HTML file instead of opening a viewer.
    #[arg(short = 'o', long, global = true)]
    pub out: Option<PathBuf>,

    /// Also write the per-file aggregates as JSON.
    #[arg(long, global = true)]
    pub dump: Option<PathBuf>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            y_max: DEFAULT_Y_MAX,
            points: DEFAULT_POINTS,
            bandwidth: Bandwidth::Scott,
            out: None,
            dump: None,
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.y_max > 0.0) {
            anyhow::bail!("--y-max must be positive, got {}", self.y_max);
        }
        if self.points < 2 {
            anyhow::bail!("--points must be at least 2, got {}", self.points);
        }
        Ok(())
    }
}

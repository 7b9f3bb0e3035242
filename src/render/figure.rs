use crate::Result;
use crate::model::ScatterPoint;
use anyhow::Context;
use plotly::common::{Fill, Font, Line, Marker, Mode};
use plotly::layout::{Axis, Legend};
use plotly::{Layout, Plot, Scatter};
use std::fmt;
use std::path::Path;

/// Density curve colours, cycled by input position: (name, r, g, b).
const DENSITY_COLORS: [(&str, u8, u8, u8); 3] =
    [("red", 255, 0, 0), ("blue", 0, 0, 255), ("lime", 0, 255, 0)];

const FILL_ALPHA: f64 = 0.3;

const DENSITY_X_TITLE: &str = "Tijd (minuten)";
const DENSITY_Y_TITLE: &str = "Distributie simulaties";
const SCATTER_TITLE: &str = "Cumulatieve data groei per minuut";
const SCATTER_X_TITLE: &str = "Tijd (minutes)";
const SCATTER_Y_TITLE: &str = "Gemiddeld aantal data items bij doel";

/// Shared canvas that every per-file step adds its series to.
pub struct Figure {
    plot: Plot,
    labels: Vec<String>,
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure").field("labels", &self.labels).finish()
    }
}

impl Figure {
    /// Density canvas with x fixed to `[0, x_max]` and y to `[0, y_max]`.
    pub fn density(x_max: f64, y_max: f64) -> Self {
        let layout = Layout::new()
            .x_axis(
                Axis::new()
                    .title(DENSITY_X_TITLE)
                    .range(vec![0.0, x_max])
                    .show_grid(true),
            )
            .y_axis(
                Axis::new()
                    .title(DENSITY_Y_TITLE)
                    .range(vec![0.0, y_max])
                    .show_grid(true),
            )
            .legend(Legend::new().font(Font::new().size(20)));

        Self::with_layout(layout)
    }

    /// Scatter canvas; both axes auto-scale.
    pub fn scatter() -> Self {
        let layout = Layout::new()
            .title(SCATTER_TITLE)
            .x_axis(Axis::new().title(SCATTER_X_TITLE).show_grid(true))
            .y_axis(Axis::new().title(SCATTER_Y_TITLE).show_grid(true));

        Self::with_layout(layout)
    }

    fn with_layout(layout: Layout) -> Self {
        let mut plot = Plot::new();
        plot.set_layout(layout);
        Self {
            plot,
            labels: Vec::new(),
        }
    }

    /// Line plus translucent fill down to zero, coloured by input position.
    pub fn density_curve(&mut self, index: usize, label: &str, xs: Vec<f64>, ys: Vec<f64>) {
        let (name, r, g, b) = DENSITY_COLORS[index % DENSITY_COLORS.len()];
        let trace = Scatter::new(xs, ys)
            .name(label)
            .mode(Mode::Lines)
            .line(Line::new().color(name).width(2.0))
            .fill(Fill::ToZeroY)
            .fill_color(format!("rgba({}, {}, {}, {})", r, g, b, FILL_ALPHA));

        self.plot.add_trace(trace);
        self.labels.push(label.to_string());
    }

    /// Empty series that only occupies a legend slot.
    pub fn legend_only(&mut self, index: usize, label: &str) {
        let (name, ..) = DENSITY_COLORS[index % DENSITY_COLORS.len()];
        let trace = Scatter::new(Vec::<f64>::new(), Vec::<f64>::new())
            .name(label)
            .mode(Mode::Lines)
            .line(Line::new().color(name))
            .show_legend(true);

        self.plot.add_trace(trace);
        self.labels.push(label.to_string());
    }

    pub fn scatter_points(&mut self, label: &str, points: &[ScatterPoint]) {
        let xs: Vec<u64> = points.iter().map(|p| p.minute).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.mean_items).collect();
        let trace = Scatter::new(xs, ys)
            .name(label)
            .mode(Mode::Markers)
            .marker(Marker::new().size(8));

        self.plot.add_trace(trace);
        self.labels.push(label.to_string());
    }

    /// Labels of the series added so far, in legend order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[cfg(test)]
    pub fn to_json(&self) -> String {
        self.plot.to_json()
    }

    /// Write a self-contained HTML file when `out` is set, otherwise open the
    /// figure in the default browser.
    pub fn finish(self, out: Option<&Path>) -> Result<()> {
        match out {
            Some(path) => {
                std::fs::write(path, self.plot.to_html())
                    .with_context(|| format!("write figure {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
            None => self.plot.show(),
        }
        Ok(())
    }
}

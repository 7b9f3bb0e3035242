//! Per-command pipelines: read each file, aggregate, add its series to one figure.

use crate::Result;
use crate::config::PlotConfig;
use crate::events::{self, Column};
use crate::input::InputPair;
use crate::kde::GaussianKde;
use crate::model::{self, FileSeries, SeriesData, Summary};
use crate::render::Figure;
use std::collections::BTreeSet;

const DENSITY_COLUMNS: &[Column] = &[Column::Tick, Column::Type, Column::Data];
const DUAL_COLUMNS: &[Column] = &[Column::Tick, Column::Type, Column::Data, Column::Iteration];
const SCATTER_COLUMNS: &[Column] = &[Column::Tick, Column::Data];

/// x-axis bound used when no file has a qualifying minute.
const EMPTY_AXIS_MAX: u64 = 1;

struct DensityInput<'a> {
    pair: &'a InputPair,
    rows: usize,
    curve_minutes: Vec<u64>,
    axis_minutes: Vec<u64>,
    valid_iterations: Option<BTreeSet<u64>>,
}

/// Density of target-hit minutes per file.
pub fn density(pairs: &[InputPair], config: &PlotConfig) -> Result<(Figure, Summary)> {
    let mut inputs = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let events = events::read_events(&pair.path, DENSITY_COLUMNS)?;
        let minutes = model::single_condition_minutes(&events);
        log::info!(
            "{} ({}): {} rows, {} target hits",
            pair.path,
            pair.label,
            events.len(),
            minutes.len()
        );

        inputs.push(DensityInput {
            pair,
            rows: events.len(),
            axis_minutes: minutes.clone(),
            curve_minutes: minutes,
            valid_iterations: None,
        });
    }

    Ok(plot_density("density", inputs, config, false))
}

/// Density of target-hit minutes restricted to iterations that also hit a station.
pub fn density_dual(pairs: &[InputPair], config: &PlotConfig) -> Result<(Figure, Summary)> {
    let mut inputs = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let events = events::read_events(&pair.path, DUAL_COLUMNS)?;
        let selection = model::dual_condition(&events);
        log::debug!(
            "{}: valid iterations {:?}",
            pair.path,
            selection.valid_iterations
        );
        log::info!(
            "{} ({}): {} rows, {} valid iterations, {} target hits",
            pair.path,
            pair.label,
            events.len(),
            selection.valid_iterations.len(),
            selection.curve_minutes.len()
        );

        inputs.push(DensityInput {
            pair,
            rows: events.len(),
            curve_minutes: selection.curve_minutes,
            axis_minutes: selection.axis_minutes,
            valid_iterations: Some(selection.valid_iterations),
        });
    }

    let unique: BTreeSet<u64> = inputs
        .iter()
        .flat_map(|i| i.axis_minutes.iter().copied())
        .collect();
    log::debug!("total unique minutes across all files: {}", unique.len());

    Ok(plot_density("density-dual", inputs, config, true))
}

fn plot_density(
    command: &str,
    inputs: Vec<DensityInput<'_>>,
    config: &PlotConfig,
    keep_legend_slot: bool,
) -> (Figure, Summary) {
    let axis_max = model::axis_max(inputs.iter().map(|i| i.axis_minutes.as_slice()));
    if axis_max.is_none() {
        log::warn!("no qualifying minutes in any input, x-axis falls back to [0, {}]", EMPTY_AXIS_MAX);
    }

    let mut figure = Figure::density(axis_max.unwrap_or(EMPTY_AXIS_MAX) as f64, config.y_max);
    let mut files = Vec::with_capacity(inputs.len());

    for (idx, input) in inputs.into_iter().enumerate() {
        let label = input.pair.label.as_str();
        match GaussianKde::fit(&input.curve_minutes, config.bandwidth) {
            Some(kde) => {
                log::debug!("{}: kernel width {:.3} minutes", input.pair.path, kde.width());
                let (xs, ys) = kde.curve(config.points);
                figure.density_curve(idx, label, xs, ys);
            }
            None if keep_legend_slot => {
                log::info!(
                    "{}: {} qualifying minutes, legend entry without a curve",
                    input.pair.path,
                    input.curve_minutes.len()
                );
                figure.legend_only(idx, label);
            }
            None => {
                log::debug!(
                    "{}: {} qualifying minutes, no curve",
                    input.pair.path,
                    input.curve_minutes.len()
                );
            }
        }

        files.push(FileSeries {
            path: input.pair.path.clone(),
            label: label.to_string(),
            rows: input.rows,
            data: SeriesData::Minutes {
                minutes: input.curve_minutes,
                valid_iterations: input.valid_iterations.map(|v| v.into_iter().collect()),
            },
        });
    }

    let summary = Summary {
        command: command.to_string(),
        axis_max,
        files,
    };
    (figure, summary)
}

/// Mean number of data items per minute, one marker series per file.
pub fn scatter(pairs: &[InputPair]) -> Result<(Figure, Summary)> {
    let mut figure = Figure::scatter();
    let mut files = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let events = events::read_events(&pair.path, SCATTER_COLUMNS)?;
        let points = model::scatter_points(&events);
        log::info!(
            "{} ({}): {} rows, {} minute buckets",
            pair.path,
            pair.label,
            events.len(),
            points.len()
        );

        figure.scatter_points(&pair.label, &points);
        files.push(FileSeries {
            path: pair.path.clone(),
            label: pair.label.clone(),
            rows: events.len(),
            data: SeriesData::Points { points },
        });
    }

    let summary = Summary {
        command: "scatter".to_string(),
        axis_max: None,
        files,
    };
    Ok((figure, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// CSV file under the temp dir, removed on drop.
    struct TempCsv(PathBuf);

    impl TempCsv {
        fn new(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "tickplot-{}-{}.csv",
                std::process::id(),
                name
            ));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }

        fn pair(&self, label: &str) -> InputPair {
            InputPair {
                path: self.0.to_string_lossy().into_owned(),
                label: label.to_string(),
            }
        }
    }

    impl Drop for TempCsv {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn minutes_of(series: &FileSeries) -> Vec<u64> {
        match &series.data {
            SeriesData::Minutes { minutes, .. } => minutes.clone(),
            SeriesData::Points { .. } => panic!("expected minutes"),
        }
    }

    #[test]
    fn density_skips_files_without_hits() {
        let hits = TempCsv::new(
            "density-hits",
            "tick,type,data\n3600,target_station,\"0,1\"\n7200,target_station,0\n",
        );
        let none = TempCsv::new("density-none", "tick,type,data\n3600,station,2\n");
        let pairs = vec![none.pair("empty"), hits.pair("full")];

        let (figure, summary) = density(&pairs, &PlotConfig::default()).unwrap();

        assert_eq!(figure.labels(), ["full"]);
        assert_eq!(summary.axis_max, Some(3));
        assert_eq!(minutes_of(&summary.files[0]), Vec::<u64>::new());
        assert_eq!(minutes_of(&summary.files[1]), vec![1, 2]);
    }

    #[test]
    fn density_is_idempotent() {
        let csv = TempCsv::new(
            "density-idem",
            "tick,type,data\n3600,target_station,0\n9000,target_station,10\n",
        );
        let pairs = vec![csv.pair("run")];
        let (first, _) = density(&pairs, &PlotConfig::default()).unwrap();
        let (second, _) = density(&pairs, &PlotConfig::default()).unwrap();

        assert_eq!(first.to_json(), second.to_json());
    }

    #[test]
    fn density_dual_keeps_legend_slot_for_empty_files() {
        let valid = TempCsv::new(
            "dual-valid",
            "tick,type,data,iteration\n\
             3600,station,2,1\n\
             7200,target_station,0,1\n\
             10800,station,2,2\n\
             14400,target_station,0,2\n\
             18000,bot,x,2\n",
        );
        let invalid = TempCsv::new(
            "dual-invalid",
            "tick,type,data,iteration\n3600,target_station,0,5\n",
        );
        let pairs = vec![valid.pair("a"), invalid.pair("b")];

        let (figure, summary) = density_dual(&pairs, &PlotConfig::default()).unwrap();

        assert_eq!(figure.labels(), ["a", "b"]);
        assert_eq!(summary.axis_max, Some(6));
        assert_eq!(minutes_of(&summary.files[0]), vec![2, 4]);
        assert_eq!(minutes_of(&summary.files[1]), Vec::<u64>::new());
    }

    #[test]
    fn density_dual_keeps_legend_slot_for_degenerate_samples() {
        let single = TempCsv::new(
            "dual-single",
            "tick,type,data,iteration\n3600,station,2,1\n7200,target_station,0,1\n",
        );
        let flat = TempCsv::new(
            "dual-flat",
            "tick,type,data,iteration\n\
             3600,station,2,1\n\
             10800,target_station,0,1\n\
             3600,station,2,2\n\
             11000,target_station,0,2\n",
        );
        let pairs = vec![single.pair("one"), flat.pair("same")];

        let (figure, summary) = density_dual(&pairs, &PlotConfig::default()).unwrap();

        assert_eq!(figure.labels(), ["one", "same"]);
        assert_eq!(minutes_of(&summary.files[0]), vec![2]);
        assert_eq!(minutes_of(&summary.files[1]), vec![3, 3]);
        assert_eq!(summary.axis_max, Some(4));
    }

    #[test]
    fn density_skips_degenerate_samples_without_legend() {
        let flat = TempCsv::new(
            "density-flat",
            "tick,type,data\n3600,target_station,0\n3700,target_station,0\n",
        );
        let (figure, summary) = density(&[flat.pair("same")], &PlotConfig::default()).unwrap();

        assert!(figure.labels().is_empty());
        assert_eq!(minutes_of(&summary.files[0]), vec![1, 1]);
    }

    #[test]
    fn density_dual_is_idempotent() {
        let csv = TempCsv::new(
            "dual-idem",
            "tick,type,data,iteration\n\
             3600,station,2,1\n\
             7200,target_station,0,1\n\
             3600,station,2,2\n\
             14400,target_station,0,2\n",
        );
        let pairs = vec![csv.pair("run")];
        let (first, first_summary) = density_dual(&pairs, &PlotConfig::default()).unwrap();
        let (second, second_summary) = density_dual(&pairs, &PlotConfig::default()).unwrap();

        assert_eq!(first.to_json(), second.to_json());
        assert_eq!(
            serde_json::to_string(&first_summary).unwrap(),
            serde_json::to_string(&second_summary).unwrap()
        );
    }

    #[test]
    fn scatter_is_idempotent() {
        let csv = TempCsv::new(
            "scatter-idem",
            "tick,data\n0,\"a,b\"\n100,a\n7200,\"a,b,c\"\n",
        );
        let pairs = vec![csv.pair("run")];
        let (first, first_summary) = scatter(&pairs).unwrap();
        let (second, second_summary) = scatter(&pairs).unwrap();

        assert_eq!(first.to_json(), second.to_json());
        assert_eq!(
            serde_json::to_string(&first_summary).unwrap(),
            serde_json::to_string(&second_summary).unwrap()
        );
    }

    #[test]
    fn density_dual_requires_iteration_column() {
        let csv = TempCsv::new("dual-noiter", "tick,type,data\n0,station,2\n");
        let err = density_dual(&[csv.pair("x")], &PlotConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("`iteration`"));
    }

    #[test]
    fn missing_file_aborts() {
        let pair = InputPair {
            path: "/nonexistent/tickplot.csv".to_string(),
            label: "x".to_string(),
        };
        assert!(density(&[pair.clone()], &PlotConfig::default()).is_err());
        assert!(scatter(&[pair]).is_err());
    }

    #[test]
    fn scatter_emits_one_series_per_file() {
        let a = TempCsv::new(
            "scatter-a",
            "tick,type,data\n0,x,\"a,b,c\"\n1800,y,\"a,b,c\"\n3600,z,\"a,b,c\"\n",
        );
        let b = TempCsv::new("scatter-b", "tick,data\n7200,a\n");
        let pairs = vec![a.pair("A"), b.pair("B")];

        let (figure, summary) = scatter(&pairs).unwrap();

        assert_eq!(figure.labels(), ["A", "B"]);
        match &summary.files[0].data {
            SeriesData::Points { points } => {
                let flat: Vec<(u64, f64)> = points.iter().map(|p| (p.minute, p.mean_items)).collect();
                assert_eq!(flat, vec![(0, 3.0), (1, 3.0)]);
            }
            SeriesData::Minutes { .. } => panic!("expected points"),
        }
    }
}

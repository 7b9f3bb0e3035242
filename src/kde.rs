//! Gaussian kernel density estimate over minute values.
//!
//! The kernel width is the sample standard deviation (n - 1) scaled by the
//! chosen rule-of-thumb factor, matching the usual one-dimensional
//! `gaussian_kde` behaviour.

use itertools_num::linspace;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bandwidth {
    /// n^(-1/5)
    Scott,
    /// (3n/4)^(-1/5)
    Silverman,
}

impl Bandwidth {
    pub fn factor(self, n: usize) -> f64 {
        let n = n as f64;
        match self {
            Self::Scott => n.powf(-0.2),
            Self::Silverman => (n * 3.0 / 4.0).powf(-0.2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    width: f64,
    kernel: Normal,
}

impl GaussianKde {
    /// Fit to `values`. Returns `None` for fewer than two values or zero spread.
    pub fn fit(values: &[u64], bandwidth: Bandwidth) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let samples: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        let std_dev = samples.iter().std_dev();
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return None;
        }

        Some(Self {
            width: std_dev * bandwidth.factor(samples.len()),
            kernel: Normal::new(0.0, 1.0).ok()?,
            samples,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let sum: f64 = self
            .samples
            .iter()
            .map(|&xi| self.kernel.pdf((x - xi) / self.width))
            .sum();
        sum / (self.samples.len() as f64 * self.width)
    }

    /// Evaluate on `points` evenly spaced positions spanning the sample range.
    pub fn curve(&self, points: usize) -> (Vec<f64>, Vec<f64>) {
        let (lo, hi) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });

        let xs: Vec<f64> = linspace(lo, hi, points).collect();
        let ys = xs.iter().map(|&x| self.evaluate(x)).collect();
        (xs, ys)
    }
}

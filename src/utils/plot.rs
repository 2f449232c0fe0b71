use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::data::summary::{quantile_sorted, sample_std};
use crate::error::{DashboardError, Result};

const KDE_GRID_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub bin_width: f64,
    /// `(x, expected count)` pairs over the data range; empty when the
    /// sample has fewer than two distinct values.
    pub density: Vec<(f64, f64)>,
}

impl Histogram {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Histogram {
                edges: vec![0.0, 1.0],
                counts: vec![0],
                bin_width: 1.0,
                density: Vec::new(),
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (mut lo, mut hi) = (sorted[0], sorted[sorted.len() - 1]);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let n_bins = auto_bin_count(&sorted);
        let bin_width = (hi - lo) / n_bins as f64;
        let edges: Vec<f64> = (0..=n_bins).map(|i| lo + i as f64 * bin_width).collect();

        let mut counts = vec![0usize; n_bins];
        for &v in &sorted {
            let idx = (((v - lo) / bin_width) as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        let scale = sorted.len() as f64 * bin_width;
        let density = gaussian_kde(&sorted, sorted[0], sorted[sorted.len() - 1])
            .into_iter()
            .map(|(x, d)| (x, d * scale))
            .collect();

        Histogram {
            edges,
            counts,
            bin_width,
            density,
        }
    }

    pub fn max_height(&self) -> f64 {
        let bars = self.counts.iter().copied().max().unwrap_or(0) as f64;
        self.density.iter().map(|&(_, y)| y).fold(bars, f64::max)
    }
}

/// Bin count by the smaller of the Sturges and Freedman–Diaconis widths.
/// Sturges alone applies when the interquartile range is zero. `sorted`
/// must be ascending and non-empty.
pub fn auto_bin_count(sorted: &[f64]) -> usize {
    let n = sorted.len() as f64;
    let range = sorted[sorted.len() - 1] - sorted[0];
    if range <= 0.0 {
        return 1;
    }

    let sturges = range / (n.log2() + 1.0);
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

    ((range / width).ceil() as usize).max(1)
}

/// Gaussian kernel density on an even grid over `[lo, hi]`, with Scott's
/// bandwidth `n^(-1/5) * std`.
pub fn gaussian_kde(values: &[f64], lo: f64, hi: f64) -> Vec<(f64, f64)> {
    let n = values.len();
    let std = sample_std(values);
    if n < 2 || !(std > 0.0) || hi <= lo {
        return Vec::new();
    }

    let bandwidth = (n as f64).powf(-0.2) * std;
    let norm = (2.0 * std::f64::consts::PI).sqrt() * bandwidth * n as f64;
    let step = (hi - lo) / (KDE_GRID_POINTS - 1) as f64;

    (0..KDE_GRID_POINTS)
        .map(|i| {
            let x = lo + i as f64 * step;
            let sum: f64 = values
                .iter()
                .map(|&xi| {
                    let z = (x - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, sum / norm)
        })
        .collect()
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

fn plot_err(e: impl std::fmt::Display) -> DashboardError {
    DashboardError::Plot(e.to_string())
}

pub fn draw_histogram(
    histogram: &Histogram,
    path: &Path,
    title: &str,
    x_desc: &str,
) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_range = histogram.edges[0]..histogram.edges[histogram.edges.len() - 1];
    let y_max = histogram.max_height().max(1.0) * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, 0f64..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Count")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(histogram.counts.iter().enumerate().map(|(i, &count)| {
            Rectangle::new(
                [
                    (histogram.edges[i], 0.0),
                    (histogram.edges[i + 1], count as f64),
                ],
                BLUE.mix(0.5).filled(),
            )
        }))
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(histogram.density.iter().copied(), &BLUE))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

pub fn draw_scatter(
    points: &[(f64, f64)],
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_range = padded_range(points.iter().map(|&(x, _)| x));
    let y_range = padded_range(points.iter().map(|&(_, y)| y));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.6).filled())),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_cover_every_value() {
        let values: Vec<f64> = (0..100).map(|i| f64::from(i % 37) * 3.5).collect();
        let hist = Histogram::from_values(&values);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        assert_eq!(hist.edges.len(), hist.counts.len() + 1);
        assert!((hist.edges[hist.edges.len() - 1] - 36.0 * 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_auto_bins_use_sturges_when_iqr_is_zero() {
        // 8 values -> log2(8) + 1 = 4 Sturges bins
        let sorted = [0.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 10.0];
        assert_eq!(auto_bin_count(&sorted), 4);
    }

    #[test]
    fn test_auto_bins_take_the_narrower_rule() {
        let sorted: Vec<f64> = (0..1000).map(f64::from).collect();
        // Sturges width 999 / 10.97 = 91.1 is narrower than FD's 99.9
        assert_eq!(auto_bin_count(&sorted), 11);
    }

    #[test]
    fn test_constant_sample_has_one_bin_and_no_density() {
        let hist = Histogram::from_values(&[3.0, 3.0, 3.0]);
        assert_eq!(hist.counts, vec![3]);
        assert!(hist.density.is_empty());
    }

    #[test]
    fn test_kde_integrates_to_about_one() {
        let values: Vec<f64> = (0..200).map(|i| f64::from(i) / 10.0).collect();
        let grid = gaussian_kde(&values, -10.0, 30.0);
        let step = grid[1].0 - grid[0].0;
        let area: f64 = grid.iter().map(|&(_, d)| d * step).sum();
        assert!((area - 1.0).abs() < 0.02, "area {area}");
    }

    #[test]
    fn test_padded_range_handles_degenerate_input() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([2.0, 2.0].into_iter()), 1.0..3.0);
    }
}

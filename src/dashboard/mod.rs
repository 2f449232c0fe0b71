pub mod report;
pub mod session;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::data::dataset::ReferenceDataset;
use crate::data::features::FeatureVector;
use crate::data::summary::describe;
use crate::error::{DashboardError, Result};
use crate::model::ModelArtifact;
use crate::predictor::Predictor;
use crate::utils::io::load_model;
use crate::utils::plot::{draw_histogram, draw_scatter, Histogram};

pub use report::{Chart, Report};
pub use session::Session;

pub const HEAD_ROWS: usize = 5;
pub const RAINFALL_CHART: &str = "rainfall_distribution.png";
pub const SCATTER_CHART: &str = "temperature_vs_humidity.png";

pub struct Dashboard {
    model: ModelArtifact,
    dataset: ReferenceDataset,
    chart_dir: Option<PathBuf>,
}

impl Dashboard {
    pub fn new(model: ModelArtifact, dataset: ReferenceDataset) -> Self {
        Dashboard {
            model,
            dataset,
            chart_dir: None,
        }
    }

    pub fn with_charts(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chart_dir = Some(dir.into());
        self
    }

    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let model = load_model(&config.model_path)?;
        let dataset = ReferenceDataset::load(&config.data_path)?;
        let dashboard = Dashboard::new(model, dataset);
        Ok(match &config.chart_dir {
            Some(dir) => dashboard.with_charts(dir),
            None => dashboard,
        })
    }

    /// Runs the full pipeline for `features`. Only an inference failure
    /// aborts it; a chart that cannot be drawn is noted in the report.
    pub fn render(&self, features: &FeatureVector) -> Result<Report> {
        let prediction = Predictor::new(&self.model).predict(features)?;
        info!(
            label = %prediction.label,
            confidence = ?prediction.confidence.map(|c| c.percent()),
            "rendered prediction"
        );

        let mut report = Report {
            features: *features,
            prediction,
            model_name: self.model.name.clone(),
            task: self.model.task.clone(),
            headers: self.dataset.headers().to_vec(),
            head: self.dataset.head(HEAD_ROWS).to_vec(),
            summary: describe(&self.dataset),
            charts: Vec::new(),
        };
        if let Some(dir) = &self.chart_dir {
            report.charts = self.draw_charts(dir);
        }
        Ok(report)
    }

    fn required_column(&self, name: &str) -> Result<&[Option<f64>]> {
        self.dataset
            .column(name)
            .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
    }

    fn draw_charts(&self, dir: &Path) -> Vec<Chart> {
        let mut rainfall = Chart::new("Rainfall Distribution", dir.join(RAINFALL_CHART));
        let mut scatter = Chart::new("Temperature vs Humidity", dir.join(SCATTER_CHART));

        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let drawn = self.draw_rainfall(&rainfall);
                rainfall.record(drawn);
                let drawn = self.draw_climate(&scatter);
                scatter.record(drawn);
            }
            Err(e) => {
                let message = DashboardError::io(dir, e).to_string();
                rainfall.error = Some(message.clone());
                scatter.error = Some(message);
            }
        }

        for chart in [&rainfall, &scatter] {
            match &chart.error {
                Some(error) => warn!(chart = %chart.title, %error, "chart not drawn"),
                None => debug!(chart = %chart.title, path = %chart.path.display(), "chart written"),
            }
        }
        vec![rainfall, scatter]
    }

    fn draw_rainfall(&self, chart: &Chart) -> Result<()> {
        let values: Vec<f64> = self
            .required_column("rainfall")?
            .iter()
            .flatten()
            .copied()
            .collect();
        let histogram = Histogram::from_values(&values);
        draw_histogram(&histogram, &chart.path, &chart.title, "rainfall")
    }

    fn draw_climate(&self, chart: &Chart) -> Result<()> {
        let temperature = self.required_column("temperature")?;
        let humidity = self.required_column("humidity")?;
        // rows missing either value are left out
        let points: Vec<(f64, f64)> = temperature
            .iter()
            .zip(humidity)
            .filter_map(|(t, h)| Some(((*t)?, (*h)?)))
            .collect();
        draw_scatter(&points, &chart.path, &chart.title, "temperature", "humidity")
    }
}

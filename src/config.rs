use std::path::PathBuf;

use clap::Parser;

use crate::data::features::{FeatureVector, Field};

#[derive(Parser, Debug)]
#[command(name = "crop-dashboard")]
#[command(about = "Predict the most suitable crop based on soil and weather conditions")]
#[command(version)]
pub struct Cli {
    /// Model artifact (`.json`, or bincode for any other extension)
    #[arg(long, default_value = "crop_model.bin")]
    pub model: PathBuf,

    /// Reference dataset CSV
    #[arg(long, default_value = "Crop_recommendation.csv")]
    pub data: PathBuf,

    /// Directory the charts are written to
    #[arg(long, default_value = "dashboard_output")]
    pub out_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Render once and exit instead of reading commands
    #[arg(long)]
    pub once: bool,

    /// Nitrogen (N), 0-200
    #[arg(long, allow_negative_numbers = true)]
    pub nitrogen: Option<i64>,

    /// Phosphorus (P), 0-200
    #[arg(long, allow_negative_numbers = true)]
    pub phosphorus: Option<i64>,

    /// Potassium (K), 0-200
    #[arg(long, allow_negative_numbers = true)]
    pub potassium: Option<i64>,

    /// Temperature in °C, 0-50
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Relative humidity in %, 0-100
    #[arg(long, allow_negative_numbers = true)]
    pub humidity: Option<f64>,

    /// Soil pH, 0-14
    #[arg(long, allow_negative_numbers = true)]
    pub ph: Option<f64>,

    /// Rainfall in mm, 0-500
    #[arg(long, allow_negative_numbers = true)]
    pub rainfall: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub model_path: PathBuf,
    pub data_path: PathBuf,
    pub chart_dir: Option<PathBuf>,
    pub interactive: bool,
    pub initial: FeatureVector,
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        let mut initial = FeatureVector::default();
        let overrides = [
            (Field::Nitrogen, cli.nitrogen.map(|v| v as f64)),
            (Field::Phosphorus, cli.phosphorus.map(|v| v as f64)),
            (Field::Potassium, cli.potassium.map(|v| v as f64)),
            (Field::Temperature, cli.temperature),
            (Field::Humidity, cli.humidity),
            (Field::Ph, cli.ph),
            (Field::Rainfall, cli.rainfall),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                initial.set(field, value);
            }
        }

        DashboardConfig {
            model_path: cli.model,
            data_path: cli.data,
            chart_dir: (!cli.no_charts).then_some(cli.out_dir),
            interactive: !cli.once,
            initial,
        }
    }
}

use std::fmt;
use std::path::PathBuf;

use crate::data::features::{FeatureVector, Field, FieldKind};
use crate::data::summary::ColumnSummary;
use crate::error::Result;
use crate::predictor::Prediction;
use crate::utils::table::{render_head, render_summary};

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub path: PathBuf,
    /// Why the chart could not be written, if it was not.
    pub error: Option<String>,
}

impl Chart {
    pub fn new(title: impl Into<String>, path: PathBuf) -> Self {
        Chart {
            title: title.into(),
            path,
            error: None,
        }
    }

    pub(crate) fn record(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.error = Some(e.to_string());
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub features: FeatureVector,
    pub prediction: Prediction,
    pub model_name: String,
    pub task: String,
    pub headers: Vec<String>,
    pub head: Vec<Vec<String>>,
    pub summary: Vec<ColumnSummary>,
    pub charts: Vec<Chart>,
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Crop Recommendation Dashboard")?;
        writeln!(
            f,
            "Predict the most suitable crop based on soil and weather conditions."
        )?;

        section(f, "Input Features")?;
        for field in Field::ALL {
            let spec = field.spec();
            let value = self.features.get(field);
            match spec.kind {
                FieldKind::Integer => writeln!(f, "  {:<18} {value:.0}", spec.label)?,
                FieldKind::Slider => writeln!(f, "  {:<18} {value:.2}", spec.label)?,
            }
        }

        section(f, "Recommended Crop")?;
        writeln!(f, "  ✔ {}", self.prediction.label)?;
        if let Some(confidence) = self.prediction.confidence {
            writeln!(f, "  ℹ Model Confidence: {confidence}%")?;
        }

        section(f, "Dataset Overview")?;
        writeln!(f, "First {} Rows", self.head.len())?;
        write!(f, "{}", render_head(&self.headers, &self.head))?;
        writeln!(f)?;
        writeln!(f, "Summary Statistics")?;
        write!(f, "{}", render_summary(&self.summary))?;

        if !self.charts.is_empty() {
            section(f, "Data Visualizations")?;
            for chart in &self.charts {
                match &chart.error {
                    None => writeln!(f, "  {}: {}", chart.title, chart.path.display())?,
                    Some(e) => writeln!(f, "  {}: not drawn ({e})", chart.title)?,
                }
            }
        }

        section(f, "Model Information")?;
        writeln!(f, "  Model Used:      {}", self.model_name)?;
        writeln!(f, "  Prediction Type: {}", self.task)
    }
}

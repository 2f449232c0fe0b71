use std::fmt;

use tracing::debug;

use crate::data::features::FeatureVector;
use crate::error::{DashboardError, Result};
use crate::model::{Classifier, ModelArtifact};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence(f64);

impl Confidence {
    pub fn from_probabilities(probabilities: &[f64]) -> Option<Self> {
        probabilities
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .reduce(f64::max)
            .map(|max| Confidence((max * 100.0).clamp(0.0, 100.0)))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub class_index: usize,
    /// Present only when the estimator reports probabilities.
    pub confidence: Option<Confidence>,
}

pub struct Predictor<'a> {
    model: &'a ModelArtifact,
}

impl<'a> Predictor<'a> {
    pub fn new(model: &'a ModelArtifact) -> Self {
        Predictor { model }
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        // Check schema
        let record = features.to_record();
        let names = record.names();
        if names != self.model.feature_names {
            return Err(DashboardError::SchemaMismatch {
                expected: self.model.feature_names.clone(),
                actual: names,
            });
        }

        // Predict
        let x = record.values();
        let class_index = self.model.estimator.predict(&x);
        let label = self
            .model
            .classes
            .get(class_index)
            .cloned()
            .ok_or_else(|| {
                DashboardError::InvalidModel(format!(
                    "estimator returned class {class_index} of {}",
                    self.model.n_classes()
                ))
            })?;

        // Confidence, when the estimator has probabilities
        let confidence = self
            .model
            .estimator
            .predict_proba(&x)
            .and_then(|proba| Confidence::from_probabilities(&proba));

        debug!(?x, %label, confidence = ?confidence.map(Confidence::percent), "prediction");

        Ok(Prediction {
            label,
            class_index,
            confidence,
        })
    }
}

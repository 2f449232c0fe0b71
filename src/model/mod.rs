pub mod centroid;
pub mod forest;
pub mod layers;
pub mod network;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

pub use centroid::NearestCentroid;
pub use forest::{DecisionTree, Leaf, RandomForest, Split, TreeNode};
pub use network::{DenseLayer, InputStats, NeuralNetwork};

/// Inference interface every persisted estimator provides.
///
/// Inputs are raw feature values in schema order. `predict` returns a class
/// index; `predict_proba`, when supported, returns one probability per class.
pub trait Classifier {
    fn kind(&self) -> &'static str;

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()>;

    fn predict(&self, x: &[f64]) -> usize;

    fn predict_proba(&self, _x: &[f64]) -> Option<Vec<f64>> {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Estimator {
    RandomForest(RandomForest),
    NeuralNetwork(NeuralNetwork),
    NearestCentroid(NearestCentroid),
}

impl Estimator {
    fn as_classifier(&self) -> &dyn Classifier {
        match self {
            Estimator::RandomForest(m) => m,
            Estimator::NeuralNetwork(m) => m,
            Estimator::NearestCentroid(m) => m,
        }
    }
}

impl Classifier for Estimator {
    fn kind(&self) -> &'static str {
        self.as_classifier().kind()
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        self.as_classifier().validate(n_features, n_classes)
    }

    fn predict(&self, x: &[f64]) -> usize {
        self.as_classifier().predict(x)
    }

    fn predict_proba(&self, x: &[f64]) -> Option<Vec<f64>> {
        self.as_classifier().predict_proba(x)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub task: String,
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub estimator: Estimator,
}

impl ModelArtifact {
    pub fn new(
        task: impl Into<String>,
        feature_names: Vec<String>,
        classes: Vec<String>,
        estimator: Estimator,
    ) -> Self {
        ModelArtifact {
            name: estimator.kind().to_string(),
            task: task.into(),
            feature_names,
            classes,
            estimator,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(DashboardError::InvalidModel(
                "artifact declares no features".into(),
            ));
        }
        if self.classes.is_empty() {
            return Err(DashboardError::InvalidModel(
                "artifact declares no classes".into(),
            ));
        }
        self.estimator
            .validate(self.feature_names.len(), self.classes.len())
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::model::layers::{argmax, relu, softmax};
use crate::model::Classifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputStats {
    pub mean: Array1<f64>,
    pub std: Array1<f64>,
}

impl InputStats {
    pub fn normalize(&self, x: &Array2<f64>) -> Array2<f64> {
        let mean = self.mean.view().insert_axis(Axis(0));
        let std = self
            .std
            .mapv(|s| if s == 0.0 { 1.0 } else { s })
            .insert_axis(Axis(0));
        (x - &mean) / &std
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Array2<f64>,
    pub bias: Array2<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralNetwork {
    pub layers: Vec<DenseLayer>,
    pub stats: InputStats,
}

impl NeuralNetwork {
    pub fn new(layers: Vec<DenseLayer>, stats: InputStats) -> Self {
        NeuralNetwork { layers, stats }
    }

    pub fn forward(&self, x: &Array2<f64>) -> Array2<f64> {
        let last = self.layers.len().saturating_sub(1);
        // Normalize input
        let mut activation = self.stats.normalize(x);
        for (idx, layer) in self.layers.iter().enumerate() {
            let z = activation.dot(&layer.weights) + &layer.bias;
            activation = if idx == last { softmax(&z) } else { relu(&z) };
        }
        activation
    }

    fn probabilities(&self, x: &[f64]) -> Vec<f64> {
        let input = Array1::from(x.to_vec()).insert_axis(Axis(0));
        self.forward(&input).row(0).to_vec()
    }
}

impl Classifier for NeuralNetwork {
    fn kind(&self) -> &'static str {
        "Neural Network Classifier"
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        if self.layers.is_empty() {
            return Err(DashboardError::InvalidModel(
                "neural network has no layers".into(),
            ));
        }
        if self.stats.mean.len() != n_features || self.stats.std.len() != n_features {
            return Err(DashboardError::InvalidModel(format!(
                "input statistics cover {} features, schema has {n_features}",
                self.stats.mean.len()
            )));
        }

        let mut width = n_features;
        for (idx, layer) in self.layers.iter().enumerate() {
            let (rows, cols) = layer.weights.dim();
            if rows != width {
                return Err(DashboardError::InvalidModel(format!(
                    "layer {idx} expects {rows} inputs, previous layer yields {width}"
                )));
            }
            if layer.bias.dim() != (1, cols) {
                return Err(DashboardError::InvalidModel(format!(
                    "layer {idx} bias has shape {:?}, expected (1, {cols})",
                    layer.bias.dim()
                )));
            }
            width = cols;
        }

        if width != n_classes {
            return Err(DashboardError::InvalidModel(format!(
                "network yields {width} outputs for {n_classes} classes"
            )));
        }
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> usize {
        argmax(&self.probabilities(x))
    }

    fn predict_proba(&self, x: &[f64]) -> Option<Vec<f64>> {
        Some(self.probabilities(x))
    }
}

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::model::Classifier;

/// Assigns the class whose centroid is closest in Euclidean distance.
///
/// Distances are not calibrated probabilities, so this estimator reports
/// a label only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroid {
    pub centroids: Array2<f64>,
}

impl Classifier for NearestCentroid {
    fn kind(&self) -> &'static str {
        "Nearest Centroid Classifier"
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        let (rows, cols) = self.centroids.dim();
        if rows != n_classes || cols != n_features {
            return Err(DashboardError::InvalidModel(format!(
                "centroid matrix is {rows}x{cols}, expected {n_classes}x{n_features}"
            )));
        }
        Ok(())
    }

    fn predict(&self, x: &[f64]) -> usize {
        self.centroids
            .rows()
            .into_iter()
            .map(|c| c.iter().zip(x).map(|(a, b)| (a - b).powi(2)).sum::<f64>())
            .enumerate()
            .fold((0, f64::INFINITY), |best, (idx, d)| {
                if d < best.1 {
                    (idx, d)
                } else {
                    best
                }
            })
            .0
    }
}

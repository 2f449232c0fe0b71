pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod logging;
pub mod model;
pub mod predictor;
pub mod utils;

pub use config::{Cli, DashboardConfig};
pub use dashboard::{Dashboard, Report, Session};
pub use data::dataset::ReferenceDataset;
pub use data::features::{FeatureVector, Field, FEATURE_NAMES};
pub use error::{DashboardError, Result};
pub use model::{Classifier, Estimator, ModelArtifact};
pub use predictor::{Confidence, Prediction, Predictor};

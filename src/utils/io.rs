use std::path::Path;

use tracing::info;

use crate::error::{DashboardError, Result};
use crate::model::ModelArtifact;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Writes `model` as JSON for `.json` paths and as bincode otherwise.
pub fn save_model(path: impl AsRef<Path>, model: &ModelArtifact) -> Result<()> {
    let path = path.as_ref();
    let model_data = if is_json(path) {
        serde_json::to_vec_pretty(model)?
    } else {
        bincode::serialize(model)?
    };
    std::fs::write(path, model_data).map_err(|e| DashboardError::io(path, e))?;
    Ok(())
}

pub fn load_model(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let model_data = std::fs::read(path).map_err(|e| DashboardError::io(path, e))?;
    let model: ModelArtifact = if is_json(path) {
        serde_json::from_slice(&model_data)?
    } else {
        bincode::deserialize(&model_data)?
    };
    model.validate()?;

    info!(
        path = %path.display(),
        model = %model.name,
        classes = model.n_classes(),
        "model loaded"
    );
    Ok(model)
}

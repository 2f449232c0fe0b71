use std::path::PathBuf;

use crop_dashboard::dashboard::{RAINFALL_CHART, SCATTER_CHART};
use crop_dashboard::model::{DenseLayer, InputStats, NeuralNetwork};
use crop_dashboard::utils::io::{load_model, save_model};
use crop_dashboard::{
    Dashboard, DashboardError, Estimator, FeatureVector, ModelArtifact, Predictor,
    ReferenceDataset, FEATURE_NAMES,
};
use ndarray::{Array1, Array2};
use plotters::prelude::*;
use tempfile::TempDir;

fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name)
}

fn shipped_model() -> ModelArtifact {
    load_model(asset("assets/crop_model.json")).expect("shipped model loads")
}

fn fixture_dataset() -> ReferenceDataset {
    ReferenceDataset::load(asset("tests/fixtures/crop_sample.csv")).expect("fixture loads")
}

#[test]
fn shipped_model_matches_feature_schema() {
    let model = shipped_model();
    assert_eq!(model.feature_names, FEATURE_NAMES.map(String::from).to_vec());
    assert_eq!(model.name, "Random Forest Classifier");
    assert_eq!(model.task, "Crop Recommendation");
    assert_eq!(model.n_classes(), 22);
}

#[test]
fn default_inputs_match_snapshot() {
    let model = shipped_model();
    let prediction = Predictor::new(&model)
        .predict(&FeatureVector::default())
        .unwrap();
    assert_eq!(prediction.label, "maize");
    let confidence = prediction.confidence.expect("forest reports probabilities");
    assert_eq!(confidence.to_string(), "36.00");
}

#[test]
fn minimum_inputs_do_not_crash() {
    let model = shipped_model();
    let features = FeatureVector::new(0, 0, 0, 0.0, 0.0, 0.0, 0.0);
    let prediction = Predictor::new(&model).predict(&features).unwrap();
    assert!(model.classes.contains(&prediction.label));
    assert_eq!(prediction.label, "chickpea");
    assert_eq!(prediction.confidence.unwrap().to_string(), "20.00");
}

#[test]
fn maximum_inputs_do_not_crash() {
    let model = shipped_model();
    let features = FeatureVector::new(200, 200, 200, 50.0, 100.0, 14.0, 500.0);
    let prediction = Predictor::new(&model).predict(&features).unwrap();
    assert!(model.classes.contains(&prediction.label));
    // apple and grapes tie; the lower class index wins
    assert_eq!(prediction.label, "apple");
}

#[test]
fn repeated_renders_are_identical() {
    let dashboard = Dashboard::new(shipped_model(), fixture_dataset());
    let features = FeatureVector::new(90, 42, 43, 20.9, 82.0, 6.5, 202.9);
    let first = dashboard.render(&features).unwrap();
    let second = dashboard.render(&features).unwrap();
    assert_eq!(first.prediction, second.prediction);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn report_tables_follow_dataset_shape() {
    let dashboard = Dashboard::new(shipped_model(), fixture_dataset());
    let report = dashboard.render(&FeatureVector::default()).unwrap();

    assert_eq!(report.head.len(), 5);
    assert_eq!(report.head[0][7], "rice");
    // every column but `label` is numeric
    assert_eq!(report.summary.len(), report.headers.len() - 1);

    let rainfall = report.summary.iter().find(|s| s.name == "rainfall").unwrap();
    assert_eq!(rainfall.count, 8);
    assert_eq!(rainfall.min, 79.93);
    assert_eq!(rainfall.max, 263.96);
    assert!(report.charts.is_empty());

    let text = report.to_string();
    assert!(text.contains("Model Confidence: 36.00%"));
    assert!(text.contains("Prediction Type: Crop Recommendation"));
}

#[test]
fn bincode_copy_predicts_like_json_original() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crop_model.bin");
    let original = shipped_model();
    save_model(&path, &original).unwrap();
    let copy = load_model(&path).unwrap();

    let features = FeatureVector::new(20, 130, 195, 22.0, 92.0, 5.9, 112.0);
    assert_eq!(
        Predictor::new(&original).predict(&features).unwrap(),
        Predictor::new(&copy).predict(&features).unwrap()
    );
}

#[test]
fn neural_network_artifact_reports_confidence() {
    // A single softmax layer that only looks at rainfall.
    let mut weights = Array2::zeros((7, 2));
    weights[[6, 0]] = -1.0;
    weights[[6, 1]] = 1.0;
    let network = NeuralNetwork::new(
        vec![DenseLayer {
            weights,
            bias: Array2::zeros((1, 2)),
        }],
        InputStats {
            mean: Array1::from_elem(7, 0.0),
            std: Array1::from_elem(7, 100.0),
        },
    );
    let model = ModelArtifact::new(
        "Crop Recommendation",
        FEATURE_NAMES.map(String::from).to_vec(),
        vec!["chickpea".into(), "rice".into()],
        Estimator::NeuralNetwork(network),
    );
    model.validate().unwrap();

    let wet = FeatureVector::new(50, 50, 50, 25.0, 60.0, 6.5, 300.0);
    let prediction = Predictor::new(&model).predict(&wet).unwrap();
    assert_eq!(prediction.label, "rice");
    // softmax([-3, 3])[1] = 1 / (1 + e^-6)
    let expected = 100.0 / (1.0 + (-6.0f64).exp());
    assert!((prediction.confidence.unwrap().percent() - expected).abs() < 1e-9);
}

#[test]
fn missing_artifacts_abort_startup() {
    let config = crop_dashboard::DashboardConfig {
        model_path: asset("assets/does_not_exist.bin"),
        data_path: asset("tests/fixtures/crop_sample.csv"),
        chart_dir: None,
        interactive: false,
        initial: FeatureVector::default(),
    };
    assert!(matches!(
        Dashboard::load(&config),
        Err(DashboardError::Io { .. })
    ));

    let config = crop_dashboard::DashboardConfig {
        model_path: asset("assets/crop_model.json"),
        data_path: asset("tests/fixtures/missing.csv"),
        ..config
    };
    assert!(matches!(
        Dashboard::load(&config),
        Err(DashboardError::Io { .. })
    ));
}

fn caption_font_available() -> bool {
    let mut buffer = vec![0u8; 64 * 64 * 3];
    let root = BitMapBackend::with_buffer(&mut buffer, (64, 64)).into_drawing_area();
    root.titled("Aa", ("sans-serif", 12)).is_ok()
}

#[test]
fn charts_are_written_to_output_dir() {
    if !caption_font_available() {
        eprintln!("skipping: no sans-serif font for chart captions");
        return;
    }
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("charts");
    let dashboard = Dashboard::new(shipped_model(), fixture_dataset()).with_charts(&out);
    let report = dashboard.render(&FeatureVector::default()).unwrap();

    assert_eq!(report.charts.len(), 2);
    assert!(report.charts.iter().all(|c| c.error.is_none()));
    assert!(out.join(RAINFALL_CHART).is_file());
    assert!(out.join(SCATTER_CHART).is_file());
}

#[test]
fn chart_failure_does_not_hide_prediction() {
    let dir = TempDir::new().unwrap();
    let blocked = dir.path().join("out");
    std::fs::write(&blocked, b"").unwrap();
    let dashboard = Dashboard::new(shipped_model(), fixture_dataset()).with_charts(&blocked);
    let report = dashboard.render(&FeatureVector::default()).unwrap();

    assert_eq!(report.prediction.label, "maize");
    assert_eq!(report.prediction.confidence.unwrap().to_string(), "36.00");
    assert!(report.charts.iter().all(|c| c.error.is_some()));
    assert!(report.to_string().contains("Model Confidence: 36.00%"));
}

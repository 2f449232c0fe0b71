//! Property-based tests over the full input domain of the controls.

use std::path::PathBuf;

use crop_dashboard::data::summary::describe;
use crop_dashboard::utils::io::load_model;
use crop_dashboard::{FeatureVector, Field, ModelArtifact, Predictor, ReferenceDataset};
use proptest::prelude::*;

fn shipped_model() -> ModelArtifact {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/crop_model.json");
    load_model(path).unwrap()
}

/// Any sample the controls can produce.
fn bounded_features() -> impl Strategy<Value = FeatureVector> {
    (
        0u32..=200,
        0u32..=200,
        0u32..=200,
        0.0..=50.0f64,
        0.0..=100.0f64,
        0.0..=14.0f64,
        0.0..=500.0f64,
    )
        .prop_map(|(n, p, k, t, h, ph, r)| FeatureVector::new(n, p, k, t, h, ph, r))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_prediction_is_a_known_label(features in bounded_features()) {
        let model = shipped_model();
        let prediction = Predictor::new(&model).predict(&features).unwrap();
        prop_assert!(model.classes.contains(&prediction.label));
        prop_assert_eq!(&model.classes[prediction.class_index], &prediction.label);
    }

    #[test]
    fn prop_confidence_is_a_percentage(features in bounded_features()) {
        let model = shipped_model();
        let prediction = Predictor::new(&model).predict(&features).unwrap();
        let confidence = prediction.confidence.unwrap().percent();
        prop_assert!((0.0..=100.0).contains(&confidence));

        let proba = model.estimator_proba(&features);
        let max = proba.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!((confidence - max * 100.0).abs() < 1e-9);
        prop_assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_prediction_is_deterministic(features in bounded_features()) {
        let model = shipped_model();
        let predictor = Predictor::new(&model);
        prop_assert_eq!(
            predictor.predict(&features).unwrap(),
            predictor.predict(&features).unwrap()
        );
    }

    #[test]
    fn prop_out_of_range_input_is_clamped(raw in -1000.0..1000.0f64) {
        let mut features = FeatureVector::default();
        for field in Field::ALL {
            features.set(field, raw);
            let spec = field.spec();
            let value = features.get(field);
            prop_assert!(value >= spec.min && value <= spec.max);
        }
    }

    #[test]
    fn prop_head_and_summary_shapes(rows in prop::collection::vec(
        (0u32..200, 0.0..50.0f64, 0.0..500.0f64), 0..12)
    ) {
        let mut csv = String::from("N,P,K,temperature,humidity,ph,rainfall,label\n");
        for (n, t, r) in &rows {
            csv.push_str(&format!("{n},1,2,{t},50,6.5,{r},rice\n"));
        }
        let dataset = ReferenceDataset::from_reader(csv.as_bytes()).unwrap();
        prop_assert_eq!(dataset.head(5).len(), rows.len().min(5));
        let summary = describe(&dataset);
        prop_assert_eq!(summary.len(), 7);
        prop_assert!(summary.iter().all(|s| s.count == rows.len()));
    }
}

/// Probabilities straight from the estimator, for cross-checking the
/// adapter's confidence.
trait EstimatorProba {
    fn estimator_proba(&self, features: &FeatureVector) -> Vec<f64>;
}

impl EstimatorProba for ModelArtifact {
    fn estimator_proba(&self, features: &FeatureVector) -> Vec<f64> {
        use crop_dashboard::Classifier;
        self.estimator.predict_proba(&features.values()).unwrap()
    }
}

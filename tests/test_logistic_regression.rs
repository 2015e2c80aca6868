//! Logistic regression on the study-time/exam-result dataset.

use rust_ml_toolkit::dataset::{LabeledPoint, SupervisedDataPoint};
use rust_ml_toolkit::metrics::accuracy;
use rust_ml_toolkit::models::{LogisticRegression, SupervisedModel};
use rust_ml_toolkit::utils::activations::sigmoid;
use rust_ml_toolkit::ModelError;

fn study_dataset() -> Vec<LabeledPoint> {
    let hours = [
        0.50, 0.75, 1.00, 1.25, 1.50, 1.75, 1.75, 2.00, 2.25, 2.50, 2.75, 3.00, 3.25, 3.50, 4.00,
        4.25, 4.50, 4.75, 5.00, 5.50,
    ];
    let passed = [
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0,
        1.0, 1.0,
    ];
    hours
        .iter()
        .zip(passed.iter())
        .map(|(&h, &p)| LabeledPoint::new(vec![h], vec![p]))
        .collect()
}

fn trained_model() -> (LogisticRegression, Vec<LabeledPoint>) {
    let data = study_dataset();
    let mut model = LogisticRegression::new();
    model.train(&data).unwrap();
    (model, data)
}

#[test]
fn test_fits_the_study_dataset_reasonably() {
    let (model, data) = trained_model();

    let predictions: Vec<f64> = data
        .iter()
        .map(|point| {
            let score = model.predict(&point.features()).unwrap()[0];
            if sigmoid(score) > 0.5 {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    let targets: Vec<f64> = data.iter().map(|point| point.target()[0]).collect();

    // The overlap region caps what any single-feature model can do; the
    // classical fit gets 16 of 20 right.
    assert!(accuracy(&predictions, &targets) >= 70.0);
}

#[test]
fn test_scores_increase_with_study_time() {
    let (model, _) = trained_model();

    let mut previous = f64::NEG_INFINITY;
    for hours in [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
        let score = model.predict(&[hours]).unwrap()[0];
        assert!(score > previous, "score not increasing at {} hours", hours);
        previous = score;
    }
}

#[test]
fn test_extremes_are_classified_correctly() {
    let (model, _) = trained_model();

    let lazy = sigmoid(model.predict(&[0.25]).unwrap()[0]);
    let diligent = sigmoid(model.predict(&[6.0]).unwrap()[0]);
    assert!(lazy < 0.5);
    assert!(diligent > 0.5);
}

#[test]
fn test_predict_before_train_is_rejected() {
    let model = LogisticRegression::new();
    assert!(matches!(
        model.predict(&[1.0]),
        Err(ModelError::IncompatibleDataAndModel(_))
    ));
}

#[test]
fn test_feature_count_mismatch_on_predict() {
    let (model, _) = trained_model();

    assert!(matches!(
        model.predict(&[1.0, 2.0]),
        Err(ModelError::IncompatibleDataAndModel(_))
    ));
}

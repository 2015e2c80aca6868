use rust_ml_toolkit::dataset::SupervisedDataPoint;
use rust_ml_toolkit::models::{LogisticRegression, SupervisedModel};
use rust_ml_toolkit::utils::activations::sigmoid;

// Demo: predict exam results from study time with logistic regression.
const PASS_THRESHOLD: f64 = 0.3;

struct Student {
    study_time: f64,
    passed: bool,
}

impl SupervisedDataPoint for Student {
    fn features(&self) -> Vec<f64> {
        vec![self.study_time]
    }

    fn target(&self) -> Vec<f64> {
        vec![if self.passed { 1.0 } else { 0.0 }]
    }
}

fn study_results() -> Vec<Student> {
    let study_times = [
        0.50, 0.75, 1.00, 1.25, 1.50, 1.75, 1.75, 2.00, 2.25, 2.50, 2.75, 3.00, 3.25, 3.50, 4.00,
        4.25, 4.50, 4.75, 5.00, 5.50,
    ];
    let results = [
        false, false, false, false, false, false, true, false, true, false, true, false, true,
        false, true, true, true, true, true, true,
    ];
    study_times
        .iter()
        .zip(results.iter())
        .map(|(&study_time, &passed)| Student {
            study_time,
            passed,
        })
        .collect()
}

fn main() {
    let students = study_results();

    let mut model = LogisticRegression::new();
    model.train(&students).expect("training failed");

    println!("pass probability by hours studied:");
    for hours in 1..=5 {
        let score = model
            .predict(&[hours as f64])
            .expect("prediction failed");
        let probability = sigmoid(score[0]);
        let verdict = if probability > PASS_THRESHOLD {
            "pass"
        } else {
            "fail"
        };
        println!("  {} h -> {:.3} ({})", hours, probability, verdict);
    }
}

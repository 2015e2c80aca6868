use std::sync::mpsc;
use std::thread;

use rust_ml_toolkit::optim::{
    BatchProvider, GradientDescent, MomentumUpdate, NagUpdate, Objective, PlainUpdate, UpdateRule,
};

// Demo: minimize f(a) = a^2 + 10*sin(a) with each update rule.
const LEARNING_RATE: f64 = 0.1;
const MAX_STEPS: usize = 100;
const GAMMA: f64 = 0.9;
const START_POINT: f64 = 5.0;

fn wavy_bowl() -> Objective {
    Objective::new(
        1,
        |x| {
            let a = x[0];
            vec![a * a + 10.0 * a.sin()]
        },
        |x| {
            let a = x[0];
            vec![2.0 * a + 10.0 * a.cos()]
        },
    )
}

fn run<U: UpdateRule>(rule: U) -> Vec<f64> {
    let mut descent = GradientDescent::new(
        BatchProvider::new(wavy_bowl()),
        rule,
        LEARNING_RATE,
        MAX_STEPS,
    );
    descent.optimize(&[START_POINT])
}

fn main() {
    // One independent optimizer per thread; results rendezvous on a channel.
    let (sender, receiver) = mpsc::channel();

    let plain_sender = sender.clone();
    thread::spawn(move || {
        let result = run(PlainUpdate::new());
        plain_sender
            .send(format!("without momentum = {:?}", result))
            .unwrap();
    });

    let momentum_sender = sender.clone();
    thread::spawn(move || {
        let result = run(MomentumUpdate::new(GAMMA, vec![0.0]));
        momentum_sender
            .send(format!("with momentum = {:?}", result))
            .unwrap();
    });

    thread::spawn(move || {
        let result = run(NagUpdate::new(GAMMA, vec![0.0]));
        sender.send(format!("with nag = {:?}", result)).unwrap();
    });

    for _ in 0..3 {
        println!("{}", receiver.recv().unwrap());
    }
}

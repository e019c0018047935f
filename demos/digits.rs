//! Trains a classifier on noisy synthetic "glyphs" (stand-ins for the
//! handwritten-digit images the engine was built for) while streaming
//! per-iteration progress as JSON lines from a consumer thread.

use std::sync::mpsc;
use std::thread;

use rand::prelude::*;

use gradnet::{Example, ExampleAccumulator, GradientDescent, Matrix, Network, TrainOptions};

const GLYPH_SIDE: usize = 5;
const CLASSES: usize = 3;
const EXAMPLES_PER_CLASS: usize = 20;
const NOISE: f64 = 0.15;

/// 5×5 prototypes: a vertical bar, a horizontal bar, and a cross.
fn prototype(class: usize) -> Vec<f64> {
    let mut pixels = vec![0.0; GLYPH_SIDE * GLYPH_SIDE];
    for i in 0..GLYPH_SIDE {
        match class {
            0 => pixels[i * GLYPH_SIDE + GLYPH_SIDE / 2] = 1.0,
            1 => pixels[(GLYPH_SIDE / 2) * GLYPH_SIDE + i] = 1.0,
            _ => {
                pixels[i * GLYPH_SIDE + GLYPH_SIDE / 2] = 1.0;
                pixels[(GLYPH_SIDE / 2) * GLYPH_SIDE + i] = 1.0;
            }
        }
    }
    pixels
}

fn noisy(prototype: &[f64], rng: &mut ThreadRng) -> Vec<f64> {
    prototype
        .iter()
        .map(|&p| (p + rng.gen::<f64>() * NOISE).min(1.0))
        .collect()
}

fn one_hot(class: usize) -> Vec<f64> {
    let mut y = vec![0.0; CLASSES];
    y[class] = 1.0;
    y
}

fn main() {
    let mut rng = rand::thread_rng();
    let mut accumulator = ExampleAccumulator::new();

    for class in 0..CLASSES {
        let proto = prototype(class);
        for _ in 0..EXAMPLES_PER_CLASS {
            accumulator
                .add_example(Example::new(noisy(&proto, &mut rng), one_hot(class)))
                .expect("consistent example dimensions");
        }
    }

    let (tx, rx) = mpsc::channel::<gradnet::IterationStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            // Full parameter vectors are noisy to read; log the scalars.
            let line = serde_json::json!({
                "iteration": stats.iteration,
                "cost": stats.cost,
            });
            println!("{line}");
        }
    });

    let options = TrainOptions {
        max_iterations: 100,
        live_update: true,
        progress_tx: Some(tx),
    };

    let network = accumulator
        .build_network(&[10], 0.5, &GradientDescent::new(1.0), &options)
        .expect("training succeeds");
    drop(options);
    printer.join().expect("printer thread exits cleanly");

    // Resubstitution accuracy on fresh noisy samples.
    let mut correct = 0;
    let total = CLASSES * 10;
    for class in 0..CLASSES {
        let proto = prototype(class);
        for _ in 0..10 {
            let x = Matrix::from_data(vec![noisy(&proto, &mut rng)]);
            let output = network.feed_forward(&x);
            if Network::predict(output.output())[0] == Some(class) {
                correct += 1;
            }
        }
    }

    println!("accuracy on fresh noisy glyphs: {correct}/{total}");
}

use gradnet::{Example, ExampleAccumulator, GradientDescent, Matrix, Network, TrainOptions};

fn main() {
    let mut accumulator = ExampleAccumulator::new();

    // One-hot targets: class 1 = "false", class 2 = "true".
    let cases = [
        (vec![0.0, 0.0], vec![1.0, 0.0]),
        (vec![0.0, 1.0], vec![0.0, 1.0]),
        (vec![1.0, 0.0], vec![0.0, 1.0]),
        (vec![1.0, 1.0], vec![1.0, 0.0]),
    ];

    for (x, y) in &cases {
        accumulator
            .add_example(Example::new(x.clone(), y.clone()))
            .expect("consistent example dimensions");
    }

    let network = accumulator
        .build_network(
            &[4],
            0.0,
            &GradientDescent::new(3.0),
            &TrainOptions::new(500),
        )
        .expect("training succeeds");

    for (x, _) in &cases {
        let output = network.feed_forward(&Matrix::from_data(vec![x.clone()]));
        let prediction = Network::predict(output.output());
        println!(
            "{:?} -> class {:?} (activations {:?})",
            x,
            prediction[0].map(|c| c + 1),
            output.output().data.iter().map(|row| row[0]).collect::<Vec<_>>()
        );
    }
}

use crate::data::example::Example;
use crate::error::{Error, Result};
use crate::math::Matrix;
use crate::network::network::Network;
use crate::optim::Minimizer;
use crate::train::train_config::TrainOptions;

/// Collects labeled examples arriving over time and assembles them into
/// training matrices.
///
/// Training data may not arrive all at once; this type supports real-time
/// collection while staying flexible about topology. The input and output
/// layer sizes are inferred from the first example unless fixed at
/// construction; hidden layer sizes are only chosen once a network is about
/// to be built.
pub struct ExampleAccumulator {
    examples: Vec<Example>,
    input_size: Option<usize>,
    output_size: Option<usize>,
}

impl ExampleAccumulator {
    /// An accumulator that infers its dimensions from the first example.
    pub fn new() -> ExampleAccumulator {
        ExampleAccumulator {
            examples: Vec::new(),
            input_size: None,
            output_size: None,
        }
    }

    /// An accumulator with fixed input/output dimensions; every example
    /// must match them exactly.
    pub fn with_dimensions(input_size: usize, output_size: usize) -> ExampleAccumulator {
        ExampleAccumulator {
            examples: Vec::new(),
            input_size: Some(input_size),
            output_size: Some(output_size),
        }
    }

    /// Appends an example, establishing dimensions on the first call.
    ///
    /// A mismatching example is rejected with `DimensionMismatch`; examples
    /// accepted earlier stay valid.
    pub fn add_example(&mut self, example: Example) -> Result<()> {
        match self.input_size {
            None => self.input_size = Some(example.x.len()),
            Some(size) if size != example.x.len() => {
                return Err(Error::DimensionMismatch(format!(
                    "example input has {} units but the accumulator expects {}",
                    example.x.len(),
                    size
                )));
            }
            Some(_) => {}
        }

        match self.output_size {
            None => self.output_size = Some(example.y.len()),
            Some(size) if size != example.y.len() => {
                return Err(Error::DimensionMismatch(format!(
                    "example output has {} units but the accumulator expects {}",
                    example.y.len(),
                    size
                )));
            }
            Some(_) => {}
        }

        self.examples.push(example);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn has_sufficient_data(&self) -> bool {
        !self.examples.is_empty()
    }

    /// Assembles the accumulated examples, in collection order, into an
    /// input matrix X (examples × input units) and a target matrix Y
    /// (output units × examples).
    pub fn build_matrices(&self) -> Result<(Matrix, Matrix)> {
        if self.examples.is_empty() {
            return Err(Error::InsufficientData);
        }

        // add_example guarantees both sizes are set once an example exists.
        let input_size = self.input_size.unwrap_or(0);
        let output_size = self.output_size.unwrap_or(0);

        let mut x = Matrix::zeros(self.examples.len(), input_size);
        let mut y = Matrix::zeros(output_size, self.examples.len());

        for (i, example) in self.examples.iter().enumerate() {
            x.data[i].copy_from_slice(&example.x);
            for (j, &value) in example.y.iter().enumerate() {
                y.data[j][i] = value;
            }
        }

        Ok((x, y))
    }

    /// Builds and trains a fresh network on the present data.
    ///
    /// The topology is `[input, hidden_layer_sizes…, output]`. Fails with
    /// `InsufficientData` when no examples have been accumulated.
    pub fn build_network(
        &self,
        hidden_layer_sizes: &[usize],
        lambda: f64,
        minimizer: &dyn Minimizer,
        options: &TrainOptions,
    ) -> Result<Network> {
        let (x, y) = self.build_matrices()?;

        let mut layer_sizes = Vec::with_capacity(hidden_layer_sizes.len() + 2);
        layer_sizes.push(x.cols);
        layer_sizes.extend_from_slice(hidden_layer_sizes);
        layer_sizes.push(y.rows);

        let mut network = Network::new(&layer_sizes)?;
        network.train(&x, &y, lambda, minimizer, options)?;
        Ok(network)
    }
}

impl Default for ExampleAccumulator {
    fn default() -> Self {
        ExampleAccumulator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::gradient_descent::GradientDescent;

    #[test]
    fn infers_dimensions_from_first_example() {
        let mut acc = ExampleAccumulator::new();
        acc.add_example(Example::new(vec![1.0, 2.0, 3.0], vec![1.0, 0.0]))
            .unwrap();

        // A second example with different lengths is rejected...
        let err = acc
            .add_example(Example::new(vec![1.0, 2.0], vec![1.0, 0.0]))
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(_)));

        let err = acc
            .add_example(Example::new(vec![1.0, 2.0, 3.0], vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(_)));

        // ...and the earlier example is untouched.
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn fixed_dimensions_reject_first_example_too() {
        let mut acc = ExampleAccumulator::with_dimensions(4, 2);
        let err = acc
            .add_example(Example::new(vec![0.0; 3], vec![0.0; 2]))
            .unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch(_)));
        assert!(acc.is_empty());
    }

    #[test]
    fn build_network_without_examples_is_insufficient_data() {
        let acc = ExampleAccumulator::new();
        let err = acc
            .build_network(&[3], 0.0, &GradientDescent::new(0.5), &TrainOptions::new(1))
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData));
    }

    #[test]
    fn matrices_preserve_collection_order() {
        let mut acc = ExampleAccumulator::new();
        acc.add_example(Example::new(vec![1.0, 2.0], vec![1.0, 0.0]))
            .unwrap();
        acc.add_example(Example::new(vec![3.0, 4.0], vec![0.0, 1.0]))
            .unwrap();

        let (x, y) = acc.build_matrices().unwrap();
        assert_eq!(x.data, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(y.data, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn builds_and_trains_a_network_end_to_end() {
        let mut acc = ExampleAccumulator::new();
        acc.add_example(Example::new(vec![0.0, 0.0], vec![1.0, 0.0]))
            .unwrap();
        acc.add_example(Example::new(vec![1.0, 1.0], vec![0.0, 1.0]))
            .unwrap();

        let network = acc
            .build_network(&[3], 0.0, &GradientDescent::new(0.5), &TrainOptions::new(5))
            .unwrap();

        let thetas = network.weights();
        assert_eq!(thetas.len(), 2);
        assert_eq!((thetas[0].rows, thetas[0].cols), (3, 3));
        assert_eq!((thetas[1].rows, thetas[1].cols), (2, 4));
    }
}

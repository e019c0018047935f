use crate::activation::{matrix_sigmoid, matrix_sigmoid_gradient};
use crate::error::{Error, Result};
use crate::math::matrix::{hadamard, Matrix};
use crate::network::forward::ForwardPass;
use crate::optim::cost::NetworkCostFunction;
use crate::optim::point;
use crate::optim::Minimizer;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainOptions;

const RANDOM_WEIGHT_MIN: f64 = 0.0;
const RANDOM_WEIGHT_MAX: f64 = 0.12;

/// A multilayer feedforward network with logistic sigmoid activations.
///
/// The network owns one weight matrix per layer transition. `thetas[l]` maps
/// layer `l` (with an added bias input) to layer `l + 1`, so a network with
/// `L` layers holds `L - 1` matrices shaped
/// `(size of layer l+1, size of layer l + 1)`.
///
/// Inference never mutates the weights; only a `train` call replaces them,
/// and always as a whole set.
#[derive(Debug)]
pub struct Network {
    thetas: Vec<Matrix>,
}

impl Network {
    /// Builds a network with the given layer sizes (input first, output
    /// last), each weight drawn uniformly from `[0, 0.12)`.
    pub fn new(layer_sizes: &[usize]) -> Result<Network> {
        if layer_sizes.len() < 2 {
            return Err(Error::ShapeMismatch(format!(
                "a network needs at least an input and an output layer, got {} sizes",
                layer_sizes.len()
            )));
        }

        let thetas = layer_sizes
            .windows(2)
            .map(|pair| {
                Matrix::random_uniform(pair[1], pair[0] + 1, RANDOM_WEIGHT_MIN, RANDOM_WEIGHT_MAX)
            })
            .collect();

        Ok(Network { thetas })
    }

    /// Builds a network from existing weight matrices; the topology is
    /// inferred from their shapes.
    pub fn from_weights(thetas: Vec<Matrix>) -> Result<Network> {
        validate_weight_chain(&thetas)?;
        Ok(Network { thetas })
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.thetas
    }

    /// Replaces the live weight set wholesale. Intended for the owner of a
    /// training progress channel that installs per-iteration candidate
    /// weights (see `TrainOptions::progress_tx`).
    pub fn set_weights(&mut self, thetas: Vec<Matrix>) -> Result<()> {
        validate_weight_chain(&thetas)?;
        self.thetas = thetas;
        Ok(())
    }

    /// Feeds a batch of examples forward through the live weights.
    ///
    /// `x` holds one example per row and one input unit per column.
    pub fn feed_forward(&self, x: &Matrix) -> ForwardPass {
        Self::feed_forward_with(x, &self.thetas)
    }

    /// Feeds a batch of examples forward through an arbitrary candidate
    /// weight set (used by the cost function during minimization).
    ///
    /// Hidden activations are bias-augmented before the sigmoid is applied,
    /// so their leading row carries `σ(1)`, not `1.0`; the input layer's
    /// bias row is a literal `1.0`. The output layer gets no bias row.
    pub fn feed_forward_with(x: &Matrix, thetas: &[Matrix]) -> ForwardPass {
        assert!(!thetas.is_empty(), "cannot feed forward through zero layers");

        let input = add_bias_unit(&x.transpose());
        let mut zs = Vec::with_capacity(thetas.len());
        let mut activations = Vec::with_capacity(thetas.len());

        let mut a = input.clone();
        let last = thetas.len() - 1;

        for (l, theta) in thetas.iter().enumerate() {
            let z = theta.clone() * a;

            let act = if l == last {
                matrix_sigmoid(&z)
            } else {
                matrix_sigmoid(&add_bias_unit(&z))
            };

            zs.push(z);
            a = act.clone();
            activations.push(act);
        }

        ForwardPass { input, zs, activations }
    }

    /// Accumulates, per weight matrix, the gradient of the unregularized
    /// fitting cost over every example column of `y`.
    ///
    /// The returned matrices share shapes with `thetas`.
    pub fn backpropagate(fpass: &ForwardPass, y: &Matrix, thetas: &[Matrix]) -> Vec<Matrix> {
        let m = y.cols;
        let mut deltas: Vec<Matrix> = thetas
            .iter()
            .map(|theta| Matrix::zeros(theta.rows, theta.cols))
            .collect();

        for i in 0..m {
            // The output-layer "error" values are actual residuals.
            let mut delta = fpass.output().column(i) - y.column(i);

            for l in (0..thetas.len()).rev() {
                let a_prev = fpass.activation(l).column(i);
                deltas[l] = deltas[l].clone() + delta.clone() * a_prev.transpose();

                if l > 0 {
                    // Weighted sum of the next layer's error, minus the row
                    // belonging to the bias unit, scaled by σ'(z).
                    let weighted = thetas[l].transpose() * delta;
                    delta = hadamard(
                        &weighted.without_first_row(),
                        &matrix_sigmoid_gradient(&fpass.zs[l - 1].column(i)),
                    );
                }
            }
        }

        deltas
    }

    /// Per example column, the class index of the output unit with the
    /// highest activation. See [`max_index`] for the tie/sentinel rules.
    pub fn predict(output_layer: &Matrix) -> Vec<Option<usize>> {
        (0..output_layer.cols)
            .map(|j| {
                let column: Vec<f64> = output_layer.data.iter().map(|row| row[j]).collect();
                max_index(&column)
            })
            .collect()
    }

    /// Expands a vector of 1-indexed class choices into a target matrix
    /// whose columns are one-hot: column `i` is column `y_indices[i] - 1` of
    /// the `k × k` identity.
    pub fn build_y_matrix(y_indices: &[usize], k: usize) -> Result<Matrix> {
        let mut y = Matrix::zeros(k, y_indices.len());

        for (i, &class) in y_indices.iter().enumerate() {
            if class < 1 || class > k {
                return Err(Error::ShapeMismatch(format!(
                    "class index {class} at example {i} is outside [1, {k}]"
                )));
            }
            y.data[class - 1][i] = 1.0;
        }

        Ok(y)
    }

    /// Rebuilds the weights of this network to minimize the regularized
    /// cost on the given data set.
    ///
    /// `x` holds one example per row; `y` holds one example per column (one
    /// row per output unit). Shape disagreement between `x`, `y`, and the
    /// network's actual output layer is fatal to the call: no weight update
    /// happens.
    ///
    /// Progress events `(iteration, cost, parameters)` go out on
    /// `options.progress_tx` when configured; a dropped receiver never
    /// aborts the run. With `options.live_update`, each iteration's
    /// candidate weights are installed into the live network as a whole
    /// set, so inference between iterations sees a complete weight snapshot.
    pub fn train(
        &mut self,
        x: &Matrix,
        y: &Matrix,
        lambda: f64,
        minimizer: &dyn Minimizer,
        options: &TrainOptions,
    ) -> Result<()> {
        if x.rows != y.cols {
            return Err(Error::ShapeMismatch(format!(
                "example matrix has {} rows but target matrix has {} columns",
                x.rows, y.cols
            )));
        }

        // Trial pass: the target matrix must match the shape the network
        // actually produces.
        let trial = self.feed_forward(x);
        let output = trial.output();
        if output.rows != y.rows || output.cols != y.cols {
            return Err(Error::ShapeMismatch(format!(
                "target matrix is {}×{} but the network produces {}×{}",
                y.rows, y.cols, output.rows, output.cols
            )));
        }

        let cost_fn = NetworkCostFunction::new(self, x, y, lambda);
        let shapes = point::shapes_of(&self.thetas);
        let initial = point::flatten(&self.thetas);

        let live_update = options.live_update;
        let progress_tx = options.progress_tx.clone();
        let thetas = &mut self.thetas;

        let mut listener = |iteration: usize, cost: f64, p: &[f64]| {
            if live_update {
                if let Ok(candidate) = point::unflatten(p, &shapes) {
                    *thetas = candidate;
                }
            }
            if let Some(tx) = &progress_tx {
                let _ = tx.send(IterationStats {
                    iteration,
                    cost,
                    parameters: p.to_vec(),
                });
            }
        };

        let final_point =
            minimizer.minimize(&cost_fn, initial, options.max_iterations, Some(&mut listener))?;

        self.thetas = point::unflatten(&final_point, &shapes)?;
        Ok(())
    }
}

/// Prepends a row of ones to an activation matrix, representing the constant
/// bias input each example column feeds to the next layer's transform.
pub fn add_bias_unit(a: &Matrix) -> Matrix {
    let mut data = Vec::with_capacity(a.rows + 1);
    data.push(vec![1.0; a.cols]);
    data.extend(a.data.iter().cloned());
    Matrix::from_data(data)
}

/// Index of the maximum value, using a running max initialized to the
/// smallest representable value and strict greater-than: the first index
/// achieving the maximum wins. `None` only when no entry exceeds the
/// sentinel (e.g. an empty slice).
pub fn max_index(values: &[f64]) -> Option<usize> {
    let mut max = f64::MIN;
    let mut max_index = None;

    for (i, &v) in values.iter().enumerate() {
        if v > max {
            max = v;
            max_index = Some(i);
        }
    }

    max_index
}

fn validate_weight_chain(thetas: &[Matrix]) -> Result<()> {
    if thetas.is_empty() {
        return Err(Error::ShapeMismatch(
            "a network needs at least one weight matrix".to_owned(),
        ));
    }

    for (l, pair) in thetas.windows(2).enumerate() {
        if pair[1].cols != pair[0].rows + 1 {
            return Err(Error::ShapeMismatch(format!(
                "weight matrix {} has {} columns but layer {} produces {} units (+1 bias)",
                l + 1,
                pair[1].cols,
                l + 1,
                pair[0].rows
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::sigmoid;
    use crate::optim::gradient_descent::GradientDescent;

    fn permutation_theta() -> Matrix {
        // Unweighted bias, permutation of the three inputs.
        Matrix::from_data(vec![
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[test]
    fn bias_unit_prepends_a_row_of_ones() {
        let a = Matrix::from_data(vec![vec![0.0, 1.0], vec![2.0, 3.0]]);
        let augmented = add_bias_unit(&a);
        assert_eq!(
            augmented.data,
            vec![vec![1.0, 1.0], vec![0.0, 1.0], vec![2.0, 3.0]]
        );
    }

    #[test]
    fn y_matrix_columns_are_identity_columns() {
        let y = Network::build_y_matrix(&[1, 3, 2], 3).unwrap();
        assert_eq!(
            y.data,
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0],
                vec![0.0, 1.0, 0.0],
            ]
        );
    }

    #[test]
    fn y_matrix_rejects_out_of_range_indices() {
        assert!(Network::build_y_matrix(&[1, 4], 3).is_err());
        assert!(Network::build_y_matrix(&[0], 3).is_err());
    }

    #[test]
    fn identity_weight_forward_pass() {
        let theta = permutation_theta();
        let network = Network::from_weights(vec![theta.clone(), theta]).unwrap();

        let x = Matrix::from_data(vec![vec![1.0, 1.0, 1.0]]);
        let fpass = network.feed_forward(&x);

        // The permutation theta reproduces the biased input, so the hidden
        // activation is sigmoid(addBiasUnit(x^T)).
        let expected_hidden = matrix_sigmoid(&add_bias_unit(&x.transpose()));
        assert_eq!(fpass.activations[0], expected_hidden);

        // The second transform drops the hidden bias row and applies the
        // sigmoid once more.
        let expected_output = matrix_sigmoid(&expected_hidden.without_first_row());
        assert_eq!(*fpass.output(), expected_output);
    }

    #[test]
    fn forward_pass_dimensions() {
        let network = Network::new(&[4, 6, 3]).unwrap();
        let x = Matrix::random_uniform(10, 4, 0.0, 1.0);
        let fpass = network.feed_forward(&x);

        assert_eq!(fpass.input.rows, 5);
        assert_eq!(fpass.input.cols, 10);
        assert_eq!(fpass.zs[0].rows, 6);
        assert_eq!(fpass.activations[0].rows, 7); // bias-augmented hidden
        assert_eq!(fpass.output().rows, 3);
        assert_eq!(fpass.output().cols, 10);
    }

    #[test]
    fn backpropagation_deltas_share_theta_shapes() {
        let network = Network::new(&[3, 5, 2]).unwrap();
        let x = Matrix::random_uniform(4, 3, 0.0, 1.0);
        let y = Network::build_y_matrix(&[1, 2, 1, 2], 2).unwrap();

        let fpass = network.feed_forward(&x);
        let deltas = Network::backpropagate(&fpass, &y, network.weights());

        assert_eq!(deltas.len(), 2);
        for (delta, theta) in deltas.iter().zip(network.weights()) {
            assert_eq!(delta.rows, theta.rows);
            assert_eq!(delta.cols, theta.cols);
        }
    }

    #[test]
    fn predict_takes_first_strict_maximum() {
        let output = Matrix::from_data(vec![
            vec![0.1, 0.9, 0.5],
            vec![0.8, 0.9, 0.5],
            vec![0.3, 0.2, 0.5],
        ]);
        assert_eq!(
            Network::predict(&output),
            vec![Some(1), Some(0), Some(0)]
        );
    }

    #[test]
    fn max_index_sentinel_rules() {
        assert_eq!(max_index(&[]), None);
        assert_eq!(max_index(&[f64::MIN, f64::MIN]), None);
        assert_eq!(max_index(&[2.0, 3.0, 3.0]), Some(1));
    }

    #[test]
    fn from_weights_rejects_incompatible_chain() {
        let t1 = Matrix::zeros(5, 4);
        let t2 = Matrix::zeros(3, 5); // needs 6 columns
        assert!(Network::from_weights(vec![t1, t2]).is_err());
        assert!(Network::from_weights(vec![]).is_err());
    }

    #[test]
    fn new_allocates_bias_augmented_shapes_in_range() {
        let network = Network::new(&[3, 5, 2]).unwrap();
        let thetas = network.weights();
        assert_eq!((thetas[0].rows, thetas[0].cols), (5, 4));
        assert_eq!((thetas[1].rows, thetas[1].cols), (2, 6));
        for theta in thetas {
            for row in &theta.data {
                for &w in row {
                    assert!((0.0..0.12).contains(&w));
                }
            }
        }
    }

    #[test]
    fn train_rejects_mismatched_example_counts() {
        let mut network = Network::new(&[2, 3, 2]).unwrap();
        let x = Matrix::zeros(4, 2);
        let y = Matrix::zeros(2, 3); // 3 columns for 4 examples
        let before = network.weights().to_vec();

        let result = network.train(
            &x,
            &y,
            0.0,
            &GradientDescent::new(0.5),
            &TrainOptions::default(),
        );

        assert!(result.is_err());
        assert_eq!(network.weights(), &before[..]);
    }

    #[test]
    fn train_rejects_wrong_output_layer_shape() {
        let mut network = Network::new(&[2, 3, 2]).unwrap();
        let x = Matrix::zeros(4, 2);
        let y = Matrix::zeros(3, 4); // network only has 2 output units

        let result = network.train(
            &x,
            &y,
            0.0,
            &GradientDescent::new(0.5),
            &TrainOptions::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn sigmoid_and_forward_agree_on_single_unit() {
        // 1-1 network: output = σ(w0 + w1 * x).
        let theta = Matrix::from_data(vec![vec![0.3, -0.7]]);
        let network = Network::from_weights(vec![theta]).unwrap();
        let x = Matrix::from_data(vec![vec![2.0]]);

        let output = network.feed_forward(&x).output().data[0][0];
        assert!((output - sigmoid(0.3 - 0.7 * 2.0)).abs() < 1e-15);
    }
}

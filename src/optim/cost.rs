use crate::error::Result;
use crate::math::Matrix;
use crate::network::network::Network;
use crate::optim::point;

/// The `evaluate(point) -> (cost, gradient)` contract a generic minimizer
/// drives. Implementations must be pure and deterministic for a fixed point.
pub trait CostFunction {
    fn evaluate(&self, point: &[f64]) -> Result<(f64, Vec<f64>)>;
}

/// Adapts a network, a training set, and a regularization strength into a
/// [`CostFunction`].
///
/// Constructed once per `train` call against a frozen data set. It holds
/// private copies of the training matrices and the network's weight shapes;
/// the network's live weights are never touched while the minimizer runs.
pub struct NetworkCostFunction {
    x: Matrix,
    y: Matrix,
    lambda: f64,
    shapes: Vec<(usize, usize)>,
}

impl NetworkCostFunction {
    pub fn new(network: &Network, x: &Matrix, y: &Matrix, lambda: f64) -> NetworkCostFunction {
        NetworkCostFunction {
            x: x.clone(),
            y: y.clone(),
            lambda,
            shapes: point::shapes_of(network.weights()),
        }
    }

    /// Regularized cross-entropy cost of a prediction.
    ///
    /// `h` must lie strictly in `(0, 1)`: a sigmoid that saturates to
    /// exactly 0.0 or 1.0 in floating point sends a log term to infinity.
    /// The log terms carry no epsilon guard; small uniform weight
    /// initialization keeps saturation out of reach in practice.
    fn cost(&self, thetas: &[Matrix], output_layer: &Matrix) -> f64 {
        let m = self.x.rows as f64;

        let mut fitting_cost = 0.0;
        for i in 0..self.y.cols {
            for (h_row, y_row) in output_layer.data.iter().zip(&self.y.data) {
                let h = h_row[i];
                let y = y_row[i];
                fitting_cost -= y * h.ln() + (1.0 - y) * (1.0 - h).ln();
            }
        }

        // Bias weights (first column) are never regularized.
        let regularization_cost: f64 = thetas
            .iter()
            .map(|theta| theta.without_first_column().map(|w| w * w).sum())
            .sum();

        (fitting_cost + self.lambda / 2.0 * regularization_cost) / m
    }
}

impl CostFunction for NetworkCostFunction {
    fn evaluate(&self, p: &[f64]) -> Result<(f64, Vec<f64>)> {
        let thetas = point::unflatten(p, &self.shapes)?;

        let fpass = Network::feed_forward_with(&self.x, &thetas);
        let error_deltas = Network::backpropagate(&fpass, &self.y, &thetas);

        let m = self.x.rows as f64;
        let lambda = self.lambda;

        // Per layer: (errorDelta + λ · candidate theta with bias column
        // zeroed) / m.
        let gradients: Vec<Matrix> = error_deltas
            .into_iter()
            .zip(&thetas)
            .map(|(error_delta, theta)| {
                let regularization_delta = zero_bias_column(theta);
                (error_delta + regularization_delta.map(|w| w * lambda)).map(|g| g / m)
            })
            .collect();

        let cost = self.cost(&thetas, fpass.output());

        Ok((cost, point::flatten(&gradients)))
    }
}

/// A copy of a weight matrix with its first column (the bias weights)
/// zeroed.
fn zero_bias_column(theta: &Matrix) -> Matrix {
    let mut copy = theta.clone();
    for row in &mut copy.data {
        row[0] = 0.0;
    }
    copy
}

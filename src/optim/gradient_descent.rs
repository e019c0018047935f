use crate::error::Result;
use crate::optim::{CostFunction, Minimizer};

/// Batch gradient descent with a backtracking step size.
///
/// Each iteration steps against the gradient; if the step raises the cost
/// (or produces a non-finite one), the step size is halved and retried, so
/// the cost never increases across an accepted iteration. An accepted step
/// grows the step size slightly to recover from overly cautious halving.
///
/// This is deliberately simple integration glue: any type implementing
/// [`Minimizer`] can drive training instead.
pub struct GradientDescent {
    pub learning_rate: f64,
}

/// Halving attempts per iteration before giving up on finding a descent
/// step.
const MAX_BACKTRACKS: usize = 16;

const STEP_GROWTH: f64 = 1.1;

impl GradientDescent {
    pub fn new(learning_rate: f64) -> GradientDescent {
        GradientDescent { learning_rate }
    }
}

impl Minimizer for GradientDescent {
    fn minimize(
        &self,
        cost: &dyn CostFunction,
        initial: Vec<f64>,
        max_iterations: usize,
        mut listener: Option<&mut dyn FnMut(usize, f64, &[f64])>,
    ) -> Result<Vec<f64>> {
        let mut point = initial;
        let (mut cost_value, mut gradient) = cost.evaluate(&point)?;
        let mut step = self.learning_rate;

        for iteration in 1..=max_iterations {
            let mut accepted = false;

            for _ in 0..MAX_BACKTRACKS {
                let candidate: Vec<f64> = point
                    .iter()
                    .zip(&gradient)
                    .map(|(p, g)| p - step * g)
                    .collect();

                let (candidate_cost, candidate_gradient) = cost.evaluate(&candidate)?;

                if candidate_cost.is_finite() && candidate_cost <= cost_value {
                    point = candidate;
                    cost_value = candidate_cost;
                    gradient = candidate_gradient;
                    step *= STEP_GROWTH;
                    accepted = true;
                    break;
                }

                step *= 0.5;
            }

            if let Some(listener) = listener.as_mut() {
                listener(iteration, cost_value, &point);
            }

            if !accepted {
                // No descent direction at any tried step size; the point is
                // as good as this method will get.
                break;
            }
        }

        Ok(point)
    }
}

pub mod cost;
pub mod gradient_descent;
pub mod point;

pub use cost::{CostFunction, NetworkCostFunction};
pub use gradient_descent::GradientDescent;

use crate::error::Result;

/// A generic iterative minimizer.
///
/// The engine treats the minimizer as a black box with this fixed contract:
/// it evaluates `cost` at candidate points, notifies `listener` with
/// `(iteration, cost, point)` after each finished iteration, terminates
/// within `max_iterations` iterations, and returns the best point found.
/// `CostFunction::evaluate` is pure, so the minimizer may call it as often
/// as its internals require.
pub trait Minimizer {
    fn minimize(
        &self,
        cost: &dyn CostFunction,
        initial: Vec<f64>,
        max_iterations: usize,
        listener: Option<&mut dyn FnMut(usize, f64, &[f64])>,
    ) -> Result<Vec<f64>>;
}

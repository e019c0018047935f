pub mod activation;
pub mod data;
pub mod error;
pub mod io;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use data::accumulator::ExampleAccumulator;
pub use data::example::Example;
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use network::forward::ForwardPass;
pub use network::network::Network;
pub use optim::cost::{CostFunction, NetworkCostFunction};
pub use optim::gradient_descent::GradientDescent;
pub use optim::Minimizer;
pub use train::iteration_stats::IterationStats;
pub use train::train_config::TrainOptions;

pub mod sigmoid;

pub use sigmoid::{sigmoid, sigmoid_gradient, matrix_sigmoid, matrix_sigmoid_gradient};

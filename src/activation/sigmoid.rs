use crate::math::Matrix;

/// Logistic sigmoid: `σ(x) = 1 / (1 + e^(-x))`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid: `σ'(x) = σ(x) · (1 - σ(x))`.
pub fn sigmoid_gradient(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

/// Applies the sigmoid to every element of a matrix.
pub fn matrix_sigmoid(z: &Matrix) -> Matrix {
    z.map(sigmoid)
}

/// Applies the sigmoid derivative to every element of a matrix.
pub fn matrix_sigmoid_gradient(z: &Matrix) -> Matrix {
    z.map(sigmoid_gradient)
}

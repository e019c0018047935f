//! Conversion between weight matrices and the flat parameter vector ("point")
//! that a generic numerical minimizer understands.
//!
//! The only contract: `unflatten(&flatten(ms), &shapes_of(ms))` reproduces
//! `ms` exactly for any list of well-formed matrices. Shapes are not
//! self-describing, so they travel alongside the vector.

use crate::error::{Error, Result};
use crate::math::Matrix;

/// Row/column dimensions of each matrix in a weight list, in order.
pub fn shapes_of(weights: &[Matrix]) -> Vec<(usize, usize)> {
    weights.iter().map(|m| (m.rows, m.cols)).collect()
}

/// Unrolls each matrix row-major and concatenates them in the given order.
pub fn flatten(weights: &[Matrix]) -> Vec<f64> {
    let mut point = Vec::with_capacity(weights.iter().map(|m| m.rows * m.cols).sum());

    for theta in weights {
        for row in &theta.data {
            point.extend_from_slice(row);
        }
    }

    point
}

/// Slices `point` into consecutive row-major chunks, one per shape.
///
/// Fails when the vector length disagrees with the total element count the
/// shapes describe.
pub fn unflatten(point: &[f64], shapes: &[(usize, usize)]) -> Result<Vec<Matrix>> {
    let expected: usize = shapes.iter().map(|&(r, c)| r * c).sum();
    if point.len() != expected {
        return Err(Error::ShapeMismatch(format!(
            "parameter vector has {} values but the given shapes require {}",
            point.len(),
            expected
        )));
    }

    let mut weights = Vec::with_capacity(shapes.len());
    let mut offset = 0;

    for &(rows, cols) in shapes {
        let data = point[offset..offset + rows * cols]
            .chunks_exact(cols)
            .map(|chunk| chunk.to_vec())
            .collect();
        weights.push(Matrix { rows, cols, data });
        offset += rows * cols;
    }

    Ok(weights)
}

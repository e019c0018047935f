//! Turns raw image bytes pushed by an example source into feature vectors.
//!
//! The conversion is deterministic: decode, collapse to grayscale, and
//! normalize pixel values linearly into `[0, 1]`.

use crate::error::{Error, Result};
use crate::math::Matrix;

/// Decodes image bytes into a grayscale matrix (`height × width`) with
/// pixel values in `[0, 1]`.
pub fn grayscale_matrix(bytes: &[u8]) -> Result<Matrix> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::ImageDecode(e.to_string()))?;
    let gray = img.to_luma8();

    let data = gray
        .rows()
        .map(|row| row.map(|p| p.0[0] as f64 / 255.0).collect())
        .collect();

    Ok(Matrix::from_data(data))
}

/// Decodes image bytes into a flat feature vector, row-major, values in
/// `[0, 1]`. This is the `Example::x` an image-backed example source
/// produces.
pub fn grayscale_features(bytes: &[u8]) -> Result<Vec<f64>> {
    let matrix = grayscale_matrix(bytes)?;
    Ok(matrix.data.into_iter().flatten().collect())
}

/// Rescales all elements of a matrix linearly so they span `[0, 1]`.
///
/// A constant matrix has no span to stretch; it maps to all zeros.
pub fn normalize(m: &Matrix) -> Matrix {
    let mut max = f64::MIN;
    let mut min = f64::MAX;

    for row in &m.data {
        for &value in row {
            if value > max {
                max = value;
            }
            if value < min {
                min = value;
            }
        }
    }

    if max <= min {
        return Matrix::zeros(m.rows, m.cols);
    }

    m.map(|value| (value - min) / (max - min))
}

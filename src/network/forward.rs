use crate::math::Matrix;

/// Everything a forward pass computes, layer by layer. Backpropagation needs
/// the intermediate values, so they are all retained.
///
/// Owned exclusively by the caller that produced it and never mutated after
/// creation, so it can be handed freely between forward and backward passes.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    /// The bias-augmented, transposed input: `(input units + 1) × examples`.
    pub input: Matrix,
    /// `zs[l]` is the pre-activation feeding layer `l + 1`: no sigmoid, no
    /// bias row.
    pub zs: Vec<Matrix>,
    /// `activations[l]` is the activation of layer `l + 1`: sigmoid applied,
    /// bias-augmented except at the output layer.
    pub activations: Vec<Matrix>,
}

impl ForwardPass {
    /// The output layer activation: `output units × examples`.
    pub fn output(&self) -> &Matrix {
        self.activations
            .last()
            .expect("a forward pass always spans at least one weight layer")
    }

    /// The activation of layer `l`, where `l = 0` is the bias-augmented
    /// input.
    pub fn activation(&self, l: usize) -> &Matrix {
        if l == 0 {
            &self.input
        } else {
            &self.activations[l - 1]
        }
    }
}

/// A single labeled example: a fixed-length input vector and the output
/// vector the network should produce for it.
#[derive(Debug, Clone)]
pub struct Example {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Example {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Example {
        Example { x, y }
    }
}

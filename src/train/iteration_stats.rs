use serde::{Serialize, Deserialize};

/// Per-iteration progress emitted during a `train` run.
///
/// When a `progress_tx` channel is configured in `TrainOptions`, one
/// `IterationStats` value is sent after every finished minimization
/// iteration. The parameter vector is included so a consumer on another
/// thread can unpack it and swap a complete candidate weight set into a
/// serving network (see `Network::set_weights`) without ever observing a
/// torn update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Cost at `parameters`.
    pub cost: f64,
    /// The full parameter vector after this iteration.
    pub parameters: Vec<f64>,
}

use std::sync::mpsc;

use crate::train::iteration_stats::IterationStats;

/// Configuration for a `Network::train` run.
///
/// # Fields
/// - `max_iterations` — iteration budget handed to the minimizer
/// - `live_update`    — install each iteration's candidate weights into the
///                      live network (always as a complete set), enabling
///                      inference while training is still running
/// - `progress_tx`    — optional channel sender; one `IterationStats` is
///                      sent per finished iteration. A dropped receiver is
///                      ignored: progress is best-effort and never aborts
///                      the run.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub max_iterations: usize,
    pub live_update: bool,
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
}

/// Default iteration budget handed to the minimizer.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

impl TrainOptions {
    pub fn new(max_iterations: usize) -> TrainOptions {
        TrainOptions {
            max_iterations,
            live_update: false,
            progress_tx: None,
        }
    }
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions::new(DEFAULT_MAX_ITERATIONS)
    }
}

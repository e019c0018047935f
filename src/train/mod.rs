pub mod iteration_stats;
pub mod train_config;

pub use iteration_stats::IterationStats;
pub use train_config::TrainOptions;

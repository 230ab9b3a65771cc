pub mod epoch_stats;
pub mod gradients;
pub mod loop_fn;
pub mod trainer;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use gradients::Gradients;
pub use loop_fn::{accuracy, evaluate_loss, train_loop};
pub use trainer::train_online;
pub use train_config::TrainConfig;

pub mod math;
pub mod activation;
pub mod layers;
pub mod model;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;
pub mod vis;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::Activation;
pub use layers::dense::Dense;
pub use model::{argmax, InputShape, LayerSpec, ModelMetadata, ModelSpec, Prediction, Sequential};
pub use loss::{LossKind, MseLoss, NllLoss};
pub use optim::sgd::Sgd;
pub use data::{Batches, Dataset};
pub use train::{accuracy, evaluate_loss, train_loop, train_online, EpochStats, Gradients, TrainConfig};

pub mod activation;

pub use activation::{Activation, log_softmax};

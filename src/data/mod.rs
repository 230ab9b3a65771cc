pub mod batcher;
pub mod dataset;
pub mod idx;
pub mod image;

pub use batcher::Batches;
pub use dataset::Dataset;

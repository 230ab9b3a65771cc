pub mod metadata;
pub mod sequential;
pub mod spec;

pub use metadata::{InputShape, ModelMetadata};
pub use sequential::{argmax, Prediction, Sequential};
pub use spec::{LayerSpec, ModelSpec};

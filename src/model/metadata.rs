use serde::{Deserialize, Serialize};

/// Describes how to interpret the input fed to a model.
/// Stored in spec JSON; tools read this to build the right input vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputShape {
    /// Plain f64 feature vector — always a valid fallback.
    Numeric,
    /// Grayscale image resized to width×height, normalized to [0, 1].
    ImageGrayscale { width: u32, height: u32 },
}

/// Optional annotations attached to a saved model spec.
/// All fields are Option<> so older spec files deserialize cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    pub input_shape: Option<InputShape>,
    /// Human-readable class labels for the output layer (e.g. ["0","1",...,"9"]).
    pub class_labels: Option<Vec<String>>,
}

use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::loss::loss_kind::LossKind;
use crate::model::metadata::ModelMetadata;
use crate::model::sequential::Sequential;

/// Describes one layer in a model specification.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — number of neurons feeding into this layer (i.e. the output
///                  size of the previous layer, or the raw input dimension for
///                  the first layer)
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: Activation,
}

/// A fully serializable description of a model architecture plus its
/// training loss and optional metadata.
///
/// `ModelSpec` can be saved to / loaded from JSON independently of the
/// trained weights, so an architecture can be stored before training starts
/// and the class labels travel with the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Human-readable name used as the model file stem.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    /// Loss function to pair with this model during training.
    pub loss: LossKind,
    /// Optional metadata (description, input shape, class labels).
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl ModelSpec {
    /// Instantiates a freshly-initialized network matching this spec.
    pub fn build(&self) -> Sequential {
        Sequential::new(
            self.layers.iter()
                .map(|l| (l.size, l.input_size, l.activation))
                .collect(),
        )
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `ModelSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<ModelSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_matches_spec_shapes() {
        let spec = ModelSpec {
            name: "digits".to_owned(),
            layers: vec![
                LayerSpec { size: 16, input_size: 784, activation: Activation::ReLU },
                LayerSpec { size: 10, input_size: 16, activation: Activation::LogSoftmax },
            ],
            loss: LossKind::Nll,
            metadata: None,
        };
        let model = spec.build();
        assert_eq!(model.layers.len(), 2);
        assert_eq!(model.input_size(), 784);
        assert_eq!(model.output_size(), 10);
        assert!(model.emits_log_probs());
    }

    #[test]
    fn spec_json_roundtrip() {
        let spec = ModelSpec {
            name: "digits".to_owned(),
            layers: vec![
                LayerSpec { size: 10, input_size: 4, activation: Activation::LogSoftmax },
            ],
            loss: LossKind::Nll,
            metadata: Some(ModelMetadata {
                description: Some("test".to_owned()),
                input_shape: None,
                class_labels: Some((0..10).map(|d| d.to_string()).collect()),
            }),
        };

        let path = std::env::temp_dir().join("primer_nn_spec_roundtrip.json");
        let path = path.to_str().unwrap().to_owned();
        spec.save_json(&path).unwrap();
        let restored = ModelSpec::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(restored.name, "digits");
        assert_eq!(restored.loss, LossKind::Nll);
        assert_eq!(restored.layers.len(), 1);
        let labels = restored.metadata.unwrap().class_labels.unwrap();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[3], "3");
    }
}

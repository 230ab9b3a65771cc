use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::layers::dense::Dense;

/// A stack of dense layers applied in order.
#[derive(Serialize, Deserialize)]
pub struct Sequential {
    pub layers: Vec<Dense>,
}

/// Result of running a classifier forward on one sample.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Argmax class index.
    pub class: usize,
    /// Per-class probabilities (exp of the log-probabilities for a
    /// LogSoftmax head, raw outputs otherwise).
    pub probabilities: Vec<f64>,
}

impl Sequential {
    /// Builds a network from (size, input_size, activation) tuples.
    pub fn new(layer_specs: Vec<(usize, usize, Activation)>) -> Sequential {
        let layers = layer_specs.into_iter()
            .map(|(size, input_size, activation)| Dense::new(size, input_size, activation))
            .collect();
        Sequential { layers }
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Number of input features the first layer expects.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size())
    }

    /// Number of outputs the last layer produces.
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// True when the last layer emits log-probabilities.
    pub fn emits_log_probs(&self) -> bool {
        matches!(self.layers.last().map(|l| l.activation), Some(Activation::LogSoftmax))
    }

    /// Runs the classifier on one sample and returns the argmax class with
    /// per-class probabilities.
    pub fn predict(&mut self, input: &[f64]) -> Prediction {
        let output = self.forward(input);
        let probabilities = if self.emits_log_probs() {
            output.iter().map(|lp| lp.exp()).collect()
        } else {
            output
        };
        Prediction { class: argmax(&probabilities), probabilities }
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Sequential> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

/// Index of the maximum element in a slice.
pub fn argmax(values: &[f64]) -> usize {
    values.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

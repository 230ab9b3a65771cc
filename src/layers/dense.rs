use serde::{Serialize, Deserialize};

use crate::activation::{Activation, log_softmax};
use crate::math::matrix::Matrix;

/// A fully-connected layer: `a = act(x·W + b)`.
///
/// The cached pre-activations and activations from the most recent forward
/// pass are what the backward pass differentiates through; they are transient
/// state and are not serialized with the weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    pub size: usize,
    /// Weight matrix, shape (input_size × size).
    pub weights: Matrix,
    /// Bias row, shape (1 × size).
    pub biases: Matrix,
    pub activation: Activation,
    /// z = x·W + b from the last forward pass.
    #[serde(skip)]
    pre_activations: Matrix,
    /// a = act(z) from the last forward pass; read as the next layer's input
    /// during backprop.
    #[serde(skip)]
    pub activations: Matrix,
}

impl Dense {
    /// He init before ReLU, Xavier otherwise; biases start at zero.
    pub fn new(size: usize, input_size: usize, activation: Activation) -> Dense {
        let weights = if activation.prefers_he_init() {
            Matrix::he(input_size, size)
        } else {
            Matrix::xavier(input_size, size)
        };

        Dense {
            size,
            weights,
            biases: Matrix::zeros(1, size),
            activation,
            pre_activations: Matrix::zeros(1, size),
            activations: Matrix::zeros(1, size),
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Forward pass for one sample; caches z and a for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let x = Matrix::row_vector(input.to_vec());
        let z = &(&x * &self.weights) + &self.biases;
        let a = match self.activation {
            Activation::LogSoftmax => Matrix::row_vector(log_softmax(z.row(0))),
            _ => z.map(|v| self.activation.apply(v)),
        };
        self.pre_activations = z;
        self.activations = a.clone();
        a.into_row()
    }

    /// Computes gradient contributions for one sample.
    /// Returns `(weights_grad, biases_grad)`.
    ///
    /// `delta` is ∂L/∂a for this layer (error in activation space); `inputs`
    /// is the activation row that fed this layer on the forward pass.
    pub fn compute_gradients(&self, delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        // δ = (∂L/∂a) ⊙ act'(z); the derivative is taken at the cached
        // pre-activation z, not at a.
        let act_derivative = self.pre_activations.map(|v| self.activation.derivative(v));
        let layer_delta = delta.hadamard(&act_derivative);

        let weights_grad = &inputs.transpose() * &layer_delta;
        (weights_grad, layer_delta)
    }

    /// Applies pre-computed gradients scaled by `lr`.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights = &self.weights - &weights_grad.scale(lr);
        self.biases = &self.biases - &biases_grad.scale(lr);
    }
}

use crate::math::matrix::Matrix;
use crate::model::sequential::Sequential;

/// Per-layer accumulated gradients, shaped like a model.
///
/// Mini-batch lifecycle: `zero()` at the start of each batch, `add()` once per
/// sample during the backward pass, then average by the batch length and hand
/// each slot to the optimizer.
pub struct Gradients {
    slots: Vec<(Matrix, Matrix)>,
}

impl Gradients {
    /// Zero-valued gradient storage matching `model`'s layer shapes.
    pub fn zeros_like(model: &Sequential) -> Gradients {
        let slots = model.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();
        Gradients { slots }
    }

    /// Resets every accumulated gradient to zero.
    pub fn zero(&mut self) {
        for (w, b) in &mut self.slots {
            *w = Matrix::zeros(w.rows, w.cols);
            *b = Matrix::zeros(b.rows, b.cols);
        }
    }

    /// Adds one sample's gradient contribution for layer `layer`.
    pub fn add(&mut self, layer: usize, weights_grad: Matrix, biases_grad: Matrix) {
        let slot = &mut self.slots[layer];
        slot.0 = &slot.0 + &weights_grad;
        slot.1 = &slot.1 + &biases_grad;
    }

    /// Accumulated `(weights, biases)` gradients, one pair per layer.
    pub fn slots(&self) -> &[(Matrix, Matrix)] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;

    #[test]
    fn accumulates_and_zeroes() {
        let model = Sequential::new(vec![(2, 3, Activation::Sigmoid)]);
        let mut grads = Gradients::zeros_like(&model);
        assert_eq!(grads.slots().len(), 1);
        assert_eq!(grads.slots()[0].0.rows, 3);
        assert_eq!(grads.slots()[0].0.cols, 2);

        grads.add(0, Matrix::zeros(3, 2).map(|_| 1.0), Matrix::zeros(1, 2).map(|_| 0.5));
        grads.add(0, Matrix::zeros(3, 2).map(|_| 1.0), Matrix::zeros(1, 2).map(|_| 0.5));
        assert_eq!(grads.slots()[0].0.at(0, 0), 2.0);
        assert_eq!(grads.slots()[0].1.at(0, 1), 1.0);

        grads.zero();
        assert_eq!(grads.slots()[0].0.at(0, 0), 0.0);
        assert_eq!(grads.slots()[0].1.at(0, 1), 0.0);
    }
}

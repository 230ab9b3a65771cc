use crate::{layers::dense::Dense, math::matrix::Matrix};

/// Plain stochastic gradient descent with a fixed learning rate.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one SGD weight update to a layer given its pre-computed gradients.
    pub fn step(&self, layer: &mut Dense, weights_grad: &Matrix, biases_grad: &Matrix) {
        layer.apply_gradients(weights_grad, biases_grad, self.learning_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;

    #[test]
    fn step_scales_by_learning_rate() {
        let mut layer = Dense::new(1, 1, Activation::Identity);
        layer.weights = Matrix::row_vector(vec![1.0]).transpose();
        let optimizer = Sgd::new(0.5);
        let w_grad = Matrix::from_rows(vec![vec![2.0]]);
        let b_grad = Matrix::row_vector(vec![0.0]);
        optimizer.step(&mut layer, &w_grad, &b_grad);
        assert!((layer.weights.at(0, 0) - 0.0).abs() < 1e-12);
    }
}

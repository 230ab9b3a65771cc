use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Sigmoid,
    ReLU,
    Tanh,
    Identity,
    /// LogSoftmax is vector-valued; it is applied over the whole pre-activation
    /// row in `Dense::forward()` (see `log_softmax`), not element-wise. The
    /// element-wise `apply()` path must not be reached for this variant.
    LogSoftmax,
}

impl Activation {
    /// Element-wise activation. For `LogSoftmax`, call `Dense::forward()`
    /// which applies the full-row transform; this path should not be reached.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
            Activation::Tanh => x.tanh(),
            Activation::Identity => x,
            Activation::LogSoftmax => {
                panic!("Activation::LogSoftmax::apply() must not be called directly; \
                        use Dense::forward() which applies the full-row log-softmax.")
            }
        }
    }

    /// Element-wise derivative of the activation.
    ///
    /// For `LogSoftmax`, the output layer pairs it with the NLL loss and the
    /// combined gradient is `exp(log_prob) - target` (already computed by
    /// `NllLoss::derivative()`). Returning `1.0` here lets
    /// `compute_gradients()` pass that delta through unchanged without
    /// double-applying the Jacobian.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => {
                let fx = self.apply(x);
                fx * (1.0 - fx)
            }
            Activation::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::Identity => 1.0,
            Activation::LogSoftmax => 1.0,
        }
    }

    /// True for layers that should get He-initialized weights rather than
    /// Xavier (see `Matrix::he` / `Matrix::xavier`).
    pub fn prefers_he_init(&self) -> bool {
        matches!(self, Activation::ReLU)
    }
}

/// Numerically stable log-softmax over one pre-activation row:
/// `log_softmax(z)_i = z_i - max(z) - ln(Σ exp(z_j - max(z)))`.
///
/// Subtracting the maximum keeps `exp` from overflowing for large logits.
pub fn log_softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let log_sum: f64 = z.iter().map(|&v| (v - max).exp()).sum::<f64>().ln();
    z.iter().map(|&v| v - max - log_sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint() {
        assert!((Activation::Sigmoid.apply(0.0) - 0.5).abs() < 1e-12);
        assert!((Activation::Sigmoid.derivative(0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn relu_clamps_negatives() {
        assert_eq!(Activation::ReLU.apply(-3.0), 0.0);
        assert_eq!(Activation::ReLU.apply(2.5), 2.5);
        assert_eq!(Activation::ReLU.derivative(-1.0), 0.0);
        assert_eq!(Activation::ReLU.derivative(1.0), 1.0);
    }

    #[test]
    fn log_softmax_is_a_distribution() {
        let lp = log_softmax(&[1.0, 2.0, 3.0]);
        let total: f64 = lp.iter().map(|v| v.exp()).sum();
        assert!((total - 1.0).abs() < 1e-9);
        // Largest logit keeps the largest probability.
        assert!(lp[2] > lp[1] && lp[1] > lp[0]);
    }

    #[test]
    fn log_softmax_survives_large_logits() {
        let lp = log_softmax(&[1000.0, 1001.0]);
        assert!(lp.iter().all(|v| v.is_finite()));
        let total: f64 = lp.iter().map(|v| v.exp()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}

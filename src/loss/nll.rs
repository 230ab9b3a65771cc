/// Negative log-likelihood loss for use with a LogSoftmax output layer.
pub struct NllLoss;

impl NllLoss {
    /// Computes the scalar NLL loss:
    ///   L = -sum(target[i] * log_prob[i])
    ///
    /// `log_probs` — log-probabilities from a LogSoftmax head, shape [n_classes]
    /// `target`    — one-hot (or soft) target distribution, shape [n_classes]
    ///
    /// Log-probabilities are used directly; no epsilon is needed because the
    /// LogSoftmax head already produces finite values.
    pub fn loss(log_probs: &[f64], target: &[f64]) -> f64 {
        log_probs.iter().zip(target.iter())
            .map(|(lp, t)| -t * lp)
            .sum()
    }

    /// Gradient of the combined LogSoftmax + NLL w.r.t. the pre-softmax
    /// logits (the inputs to the LogSoftmax layer).
    ///
    /// When LogSoftmax and NLL are composed the gradient simplifies to:
    ///   ∂L/∂z_i = exp(log_prob[i]) - target[i]
    ///
    /// This is the initial delta passed into the backward pass by the trainer.
    /// The LogSoftmax layer's own derivative step is identity (1.0) so the
    /// combined gradient is not double-applied.
    pub fn derivative(log_probs: &[f64], target: &[f64]) -> Vec<f64> {
        log_probs.iter().zip(target.iter())
            .map(|(lp, t)| lp.exp() - t)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::log_softmax;

    #[test]
    fn confident_correct_prediction_has_near_zero_loss() {
        let lp = log_softmax(&[20.0, 0.0, 0.0]);
        let target = [1.0, 0.0, 0.0];
        assert!(NllLoss::loss(&lp, &target) < 1e-6);
    }

    #[test]
    fn uniform_prediction_loss_is_ln_n() {
        let lp = log_softmax(&[0.0, 0.0, 0.0, 0.0]);
        let target = [0.0, 1.0, 0.0, 0.0];
        assert!((NllLoss::loss(&lp, &target) - (4.0f64).ln()).abs() < 1e-9);
    }

    #[test]
    fn derivative_is_probabilities_minus_target() {
        let lp = log_softmax(&[1.0, 2.0]);
        let target = [0.0, 1.0];
        let grad = NllLoss::derivative(&lp, &target);
        assert!((grad[0] - lp[0].exp()).abs() < 1e-12);
        assert!((grad[1] - (lp[1].exp() - 1.0)).abs() < 1e-12);
        // Gradient over a full distribution sums to zero.
        assert!((grad[0] + grad[1]).abs() < 1e-9);
    }
}

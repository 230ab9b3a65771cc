use serde::{Serialize, Deserialize};

/// Selects which loss function the training loop uses.
///
/// - `Mse` — Mean-squared error; pair with Identity or Sigmoid output.
/// - `Nll` — Negative log-likelihood; pair with a LogSoftmax output layer.
///   The gradient is the combined LogSoftmax+NLL gradient
///   (`exp(log_prob) - target`), which matches the convention in
///   `NllLoss::derivative()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    Mse,
    Nll,
}

use std::sync::atomic::Ordering;
use std::time::Instant;

use crate::data::batcher::Batches;
use crate::data::dataset::Dataset;
use crate::loss::loss_kind::LossKind;
use crate::loss::mse::MseLoss;
use crate::loss::nll::NllLoss;
use crate::math::matrix::Matrix;
use crate::model::sequential::{argmax, Sequential};
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::gradients::Gradients;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `model` for `config.epochs` epochs and returns the mean training
/// loss of the **last completed epoch**.
///
/// Each mini-batch runs the full update cycle: zero the gradient buffers,
/// forward and backward once per sample accumulating gradients, average over
/// the batch, and apply one optimizer step per layer.
///
/// # Arguments
/// - `model`     — mutable reference to the network; modified in place
/// - `train`     — training dataset
/// - `val`       — optional validation dataset
/// - `optimizer` — SGD optimizer (carries learning rate)
/// - `config`    — hyperparameters, optional progress channel, optional stop flag
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Panics
/// Panics if `train` is empty or `batch_size == 0`.
pub fn train_loop(
    model: &mut Sequential,
    train: &Dataset,
    val: Option<&Dataset>,
    optimizer: &Sgd,
    config: &TrainConfig,
) -> f64 {
    assert!(!train.is_empty(), "training dataset must not be empty");
    assert_eq!(
        train.inputs.len(),
        train.targets.len(),
        "dataset inputs and targets must have equal length"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        // Check stop flag at the top of each epoch.
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let t_start = Instant::now();

        // ── One full pass over the training data ───────────────────────────
        let train_loss = run_one_epoch(model, train, optimizer, config.batch_size, config.loss);
        last_train_loss = train_loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        // ── Accuracy (classification runs only) ────────────────────────────
        let train_accuracy = if config.loss == LossKind::Nll {
            Some(accuracy(model, train))
        } else {
            None
        };

        // ── Validation ─────────────────────────────────────────────────────
        let (val_loss, val_accuracy) = if let Some(val) = val {
            let vl = Some(evaluate_loss(model, val, config.loss));
            let va = if config.loss == LossKind::Nll {
                Some(accuracy(model, val))
            } else {
                None
            };
            (vl, va)
        } else {
            (None, None)
        };

        // ── Emit progress ──────────────────────────────────────────────────
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            train_accuracy,
            val_accuracy,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }

        // Check stop flag again after potentially expensive eval.
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }
    }

    last_train_loss
}

// ---------------------------------------------------------------------------
// Epoch and backward pass
// ---------------------------------------------------------------------------

/// Runs one full epoch of mini-batch SGD over the training data.
/// Returns the mean loss over all samples.
fn run_one_epoch(
    model: &mut Sequential,
    train: &Dataset,
    optimizer: &Sgd,
    batch_size: usize,
    loss: LossKind,
) -> f64 {
    let n = train.len();
    let mut total_loss = 0.0;
    let mut rng = rand::thread_rng();
    let mut grads = Gradients::zeros_like(model);

    for batch in Batches::new(n, batch_size, &mut rng) {
        grads.zero();

        // Accumulate gradients over the mini-batch.
        for &idx in &batch {
            let input = &train.inputs[idx];
            let target = &train.targets[idx];

            let output = model.forward(input);
            total_loss += sample_loss(&output, target, loss);

            let error = sample_delta(&output, target, loss);
            backward(model, input, error, &mut grads);
        }

        // Average and apply.
        let inv_batch = 1.0 / batch.len() as f64;
        for (i, (w_acc, b_acc)) in grads.slots().iter().enumerate() {
            optimizer.step(
                &mut model.layers[i],
                &w_acc.scale(inv_batch),
                &b_acc.scale(inv_batch),
            );
        }
    }

    total_loss / n as f64
}

/// Backward pass for one sample: propagates `error` (∂L/∂output) through the
/// stack in reverse, adding each layer's gradient contribution to `grads`.
///
/// Must run directly after `model.forward()` for the same sample — it reads
/// the activations cached by that forward pass.
pub(crate) fn backward(
    model: &Sequential,
    input: &[f64],
    error: Vec<f64>,
    grads: &mut Gradients,
) {
    let mut delta = Matrix::row_vector(error);

    for i in (0..model.layers.len()).rev() {
        let input_for_layer = if i == 0 {
            Matrix::row_vector(input.to_vec())
        } else {
            model.layers[i - 1].activations.clone()
        };

        let (w_grad, b_grad) = model.layers[i].compute_gradients(&delta, &input_for_layer);

        if i > 0 {
            // Propagate δ_i through the weights to get ∂L/∂a_{i-1}.
            delta = &b_grad * &model.layers[i].weights.transpose();
        }

        grads.add(i, w_grad, b_grad);
    }
}

// ---------------------------------------------------------------------------
// Loss dispatch and evaluation
// ---------------------------------------------------------------------------

/// Scalar loss for one sample — dispatches on `LossKind`.
pub(crate) fn sample_loss(output: &[f64], target: &[f64], loss: LossKind) -> f64 {
    match loss {
        LossKind::Mse => MseLoss::loss(output, target),
        LossKind::Nll => NllLoss::loss(output, target),
    }
}

/// Initial backward delta for one sample — dispatches on `LossKind`.
pub(crate) fn sample_delta(output: &[f64], target: &[f64], loss: LossKind) -> Vec<f64> {
    match loss {
        LossKind::Mse => MseLoss::derivative(output, target),
        LossKind::Nll => NllLoss::derivative(output, target),
    }
}

/// Mean loss over a full dataset without gradient accumulation (eval mode).
pub fn evaluate_loss(model: &mut Sequential, data: &Dataset, loss: LossKind) -> f64 {
    let n = data.len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = data.inputs.iter().zip(data.targets.iter())
        .map(|(input, target)| {
            let output = model.forward(input);
            sample_loss(&output, target, loss)
        })
        .sum();
    total / n as f64
}

/// Fraction of samples classified correctly (argmax match).
pub fn accuracy(model: &mut Sequential, data: &Dataset) -> f64 {
    let n = data.len();
    if n == 0 {
        return 0.0;
    }
    let correct: usize = data.inputs.iter().zip(data.targets.iter())
        .filter(|(input, target)| {
            let output = model.forward(input);
            argmax(&output) == argmax(target)
        })
        .count();
    correct as f64 / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;

    fn empty_dataset() -> Dataset {
        Dataset {
            inputs: vec![],
            targets: vec![],
            n_classes: 2,
            image_width: 1,
            image_height: 1,
        }
    }

    #[test]
    fn accuracy_on_empty_set_is_zero() {
        let mut model = Sequential::new(vec![(2, 1, Activation::LogSoftmax)]);
        assert_eq!(accuracy(&mut model, &empty_dataset()), 0.0);
        assert_eq!(evaluate_loss(&mut model, &empty_dataset(), LossKind::Nll), 0.0);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn train_loop_rejects_empty_dataset() {
        let mut model = Sequential::new(vec![(2, 1, Activation::LogSoftmax)]);
        let config = TrainConfig::new(1, 4, LossKind::Nll);
        train_loop(&mut model, &empty_dataset(), None, &Sgd::new(0.1), &config);
    }

    #[test]
    fn stop_flag_prevents_any_epoch() {
        use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

        let mut model = Sequential::new(vec![(2, 2, Activation::LogSoftmax)]);
        let data = Dataset {
            inputs: vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            targets: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            n_classes: 2,
            image_width: 2,
            image_height: 1,
        };

        let flag = Arc::new(AtomicBool::new(true));
        let mut config = TrainConfig::new(50, 1, LossKind::Nll);
        config.stop_flag = Some(flag.clone());

        let before = model.layers[0].weights.clone();
        let loss = train_loop(&mut model, &data, None, &Sgd::new(0.5), &config);
        assert_eq!(loss, 0.0);
        assert_eq!(model.layers[0].weights, before);
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn progress_channel_receives_one_stats_per_epoch() {
        use std::sync::mpsc;

        let mut model = Sequential::new(vec![(2, 2, Activation::LogSoftmax)]);
        let data = Dataset {
            inputs: vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            targets: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            n_classes: 2,
            image_width: 2,
            image_height: 1,
        };

        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(3, 2, LossKind::Nll);
        config.progress_tx = Some(tx);
        train_loop(&mut model, &data, Some(&data), &Sgd::new(0.1), &config);

        let stats: Vec<EpochStats> = rx.try_iter().collect();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[2].epoch, 3);
        assert!(stats[0].train_accuracy.is_some());
        assert!(stats[0].val_loss.is_some());
    }
}

use crate::loss::loss_kind::LossKind;
use crate::model::sequential::Sequential;
use crate::optim::sgd::Sgd;
use crate::train::gradients::Gradients;
use crate::train::loop_fn::{backward, sample_delta, sample_loss};

/// One pass of online (per-sample) SGD over the given samples.
///
/// The batch-of-one variant of `train_loop`: every sample triggers an
/// immediate weight update. Suited to tiny demo problems; returns the mean
/// loss over the pass.
pub fn train_online(
    model: &mut Sequential,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    optimizer: &Sgd,
    loss: LossKind,
) -> f64 {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(inputs.len(), targets.len(), "inputs and targets must have equal length");

    let mut total_loss = 0.0;
    let mut grads = Gradients::zeros_like(model);

    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = model.forward(input);
        total_loss += sample_loss(&output, target, loss);

        let error = sample_delta(&output, target, loss);
        grads.zero();
        backward(model, input, error, &mut grads);

        for (i, (w_grad, b_grad)) in grads.slots().iter().enumerate() {
            optimizer.step(&mut model.layers[i], w_grad, b_grad);
        }
    }

    total_loss / inputs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;

    #[test]
    fn loss_decreases_on_a_linear_fit() {
        // y = x, learnable exactly by a single Identity neuron.
        let mut model = Sequential::new(vec![(1, 1, Activation::Identity)]);
        let inputs: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64 / 8.0]).collect();
        let targets = inputs.clone();
        let optimizer = Sgd::new(0.5);

        let first = train_online(&mut model, &inputs, &targets, &optimizer, LossKind::Mse);
        let mut last = first;
        for _ in 0..200 {
            last = train_online(&mut model, &inputs, &targets, &optimizer, LossKind::Mse);
        }
        assert!(last < first, "loss did not decrease: first={} last={}", first, last);
        assert!(last < 1e-3, "loss did not converge: {}", last);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn rejects_mismatched_lengths() {
        let mut model = Sequential::new(vec![(1, 1, Activation::Identity)]);
        let _ = train_online(
            &mut model,
            &[vec![0.0]],
            &[],
            &Sgd::new(0.1),
            LossKind::Mse,
        );
    }
}

//! End-to-end training on a small synthetic image dataset.

use rand::prelude::*;

use primer_nn::{
    accuracy, evaluate_loss, train_loop, Activation, Dataset, LossKind, Sequential, Sgd,
    TrainConfig,
};

/// Two visually distinct 4×4 "digit" classes: class 0 lights up the top half,
/// class 1 the bottom half, with pixel noise on top.
fn synthetic_dataset(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut inputs = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);

    for i in 0..n {
        let class = i % 2;
        let mut pixels = vec![0.0f64; 16];
        let bright = if class == 0 { 0..8 } else { 8..16 };
        for p in bright {
            pixels[p] = 0.8 + rng.gen::<f64>() * 0.2;
        }
        for px in pixels.iter_mut() {
            *px = (*px + rng.gen::<f64>() * 0.1).min(1.0);
        }
        inputs.push(pixels);

        let mut one_hot = vec![0.0; 2];
        one_hot[class] = 1.0;
        targets.push(one_hot);
    }

    Dataset {
        inputs,
        targets,
        n_classes: 2,
        image_width: 4,
        image_height: 4,
    }
}

fn classifier() -> Sequential {
    Sequential::new(vec![
        (12, 16, Activation::ReLU),
        (2, 12, Activation::LogSoftmax),
    ])
}

#[test]
fn training_reduces_loss_and_learns_the_classes() {
    let (train, val) = synthetic_dataset(100, 42).split(0.2);
    let mut model = classifier();

    let loss_before = evaluate_loss(&mut model, &val, LossKind::Nll);

    let config = TrainConfig::new(40, 8, LossKind::Nll);
    let final_train_loss = train_loop(&mut model, &train, Some(&val), &Sgd::new(0.3), &config);

    let loss_after = evaluate_loss(&mut model, &val, LossKind::Nll);
    assert!(
        loss_after < loss_before,
        "validation loss did not improve: before={} after={}",
        loss_before,
        loss_after
    );
    assert!(final_train_loss < loss_before);

    let val_acc = accuracy(&mut model, &val);
    assert!(val_acc >= 0.9, "validation accuracy too low: {}", val_acc);
}

#[test]
fn trained_model_survives_a_save_load_cycle() {
    let data = synthetic_dataset(60, 7);
    let mut model = classifier();

    let config = TrainConfig::new(20, 8, LossKind::Nll);
    train_loop(&mut model, &data, None, &Sgd::new(0.3), &config);

    let path = std::env::temp_dir().join("primer_nn_trained_roundtrip.json");
    let path = path.to_str().unwrap().to_owned();
    model.save_json(&path).unwrap();
    let mut restored = Sequential::load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    // The restored model must classify exactly like the one it was saved from.
    for input in &data.inputs {
        assert_eq!(model.predict(input).class, restored.predict(input).class);
    }
    assert_eq!(accuracy(&mut model, &data), accuracy(&mut restored, &data));
}

#[test]
fn mse_path_trains_a_regression_head() {
    // Identity output + MSE on the same separable data, target = one-hot.
    let data = synthetic_dataset(60, 21);
    let mut model = Sequential::new(vec![
        (8, 16, Activation::Sigmoid),
        (2, 8, Activation::Identity),
    ]);

    let loss_before = evaluate_loss(&mut model, &data, LossKind::Mse);
    let config = TrainConfig::new(30, 8, LossKind::Mse);
    train_loop(&mut model, &data, None, &Sgd::new(0.3), &config);
    let loss_after = evaluate_loss(&mut model, &data, LossKind::Mse);

    assert!(
        loss_after < loss_before,
        "MSE did not improve: before={} after={}",
        loss_before,
        loss_after
    );
}

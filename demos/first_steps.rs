/// First steps with primer-nn: fit XOR with a two-layer sigmoid network.
///
/// The smallest end-to-end walkthrough — build a model, pick a loss and an
/// optimizer, loop over the data, watch the loss fall.
///
/// Run with:
///   cargo run --example first_steps

use primer_nn::{Activation, LossKind, Sequential, Sgd, train_online};

fn main() {
    // 2 inputs → 2 hidden sigmoid neurons → 1 sigmoid output.
    let mut model = Sequential::new(vec![
        (2, 2, Activation::Sigmoid),
        (1, 2, Activation::Sigmoid),
    ]);

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let targets = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let optimizer = Sgd::new(0.5);
    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_online(&mut model, &inputs, &targets, &optimizer, LossKind::Mse);
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    println!();
    for input in &inputs {
        let output = model.forward(input);
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
}

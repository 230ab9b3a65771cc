/// MNIST digit classification, step by step.
///
/// The full walkthrough: load and normalize the dataset, declare a stack of
/// dense layers ending in log-probabilities, train with NLL + mini-batch SGD
/// while watching per-epoch stats, evaluate on the held-out test set, save
/// the model, and visualize what the classifier believes about a sample image.
///
/// Architecture: 784 → 128 (ReLU) → 64 (ReLU) → 10 (LogSoftmax)
/// Loss:         NllLoss (combined with LogSoftmax — gradient is exp(log_p) - target)
/// Optimizer:    SGD, lr = 0.1
/// Batch size:   32
/// Epochs:       10
///
/// Run with:
///   cargo run --example mnist --release
///
/// Data files must be present at demos/mnist_data/ (IDX binary format).

use std::sync::mpsc;
use std::thread;

use primer_nn::{
    Activation, Dataset, InputShape, LayerSpec, LossKind, ModelMetadata, ModelSpec,
    Sgd, TrainConfig, accuracy, evaluate_loss, train_loop,
};
use primer_nn::data::image::decode_grayscale;
use primer_nn::vis::{ascii_image, probability_bars};

const TRAIN_IMAGES: &str = "demos/mnist_data/train-images-idx3-ubyte";
const TRAIN_LABELS: &str = "demos/mnist_data/train-labels-idx1-ubyte";
const TEST_IMAGES: &str = "demos/mnist_data/t10k-images-idx3-ubyte";
const TEST_LABELS: &str = "demos/mnist_data/t10k-labels-idx1-ubyte";

/// Drop a 28×28-ish grayscale digit here to have the trained model classify it.
const USER_DIGIT: &str = "demos/my_digit.png";

fn load_or_exit(image_path: &str, label_path: &str) -> Dataset {
    Dataset::from_idx_files(image_path, label_path, 10).unwrap_or_else(|e| {
        eprintln!("Failed to load MNIST data: {}", e);
        eprintln!("Download the four IDX files into demos/mnist_data/ first.");
        std::process::exit(1);
    })
}

fn main() {
    // --- Step 1: load and normalize the data ---
    println!("Loading MNIST data...");
    let full_train = load_or_exit(TRAIN_IMAGES, TRAIN_LABELS);
    let test_set = load_or_exit(TEST_IMAGES, TEST_LABELS);

    println!(
        "  Training set: {} images of {}×{} pixels",
        full_train.len(),
        full_train.image_width,
        full_train.image_height
    );
    println!("  Test set:     {} images", test_set.len());

    // Hold out 10% of the training images for per-epoch validation.
    let (train_set, val_set) = full_train.split(0.1);
    println!(
        "  Split:        {} train / {} validation\n",
        train_set.len(),
        val_set.len()
    );

    // --- Step 2: declare the model ---
    let spec = ModelSpec {
        name: "mnist".to_owned(),
        layers: vec![
            LayerSpec { size: 128, input_size: 784, activation: Activation::ReLU },
            LayerSpec { size: 64, input_size: 128, activation: Activation::ReLU },
            LayerSpec { size: 10, input_size: 64, activation: Activation::LogSoftmax },
        ],
        loss: LossKind::Nll,
        metadata: Some(ModelMetadata {
            description: Some("MNIST digit classifier from the primer-nn walkthrough".to_owned()),
            input_shape: Some(InputShape::ImageGrayscale { width: 28, height: 28 }),
            class_labels: Some((0..10).map(|d| d.to_string()).collect()),
        }),
    };
    let model = spec.build();

    println!("Network architecture:");
    println!("  Input:   784 neurons (28×28 pixels, normalized to [0, 1])");
    println!("  Hidden1: 128 neurons — ReLU (He init)");
    println!("  Hidden2: 64  neurons — ReLU (He init)");
    println!("  Output:  10  neurons — LogSoftmax (Xavier init)");
    println!("  Loss:    NllLoss");
    println!("  Optimizer: SGD, lr = 0.1, batch_size = 32\n");

    // --- Step 3: train ---
    // Training runs on its own thread; the per-epoch stats it emits over the
    // progress channel drive the table below.
    let optimizer = Sgd::new(0.1);
    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(10, 32, LossKind::Nll);
    config.progress_tx = Some(tx);

    println!("Training for {} epochs...", config.epochs);
    println!(
        "{:>6}  {:>10}  {:>10}  {:>10}  {:>10}  {:>8}",
        "Epoch", "NLL Loss", "Val Loss", "Train Acc", "Val Acc", "Time"
    );
    println!("{}", "─".repeat(66));

    let trainer = thread::spawn(move || {
        let mut model = model;
        train_loop(&mut model, &train_set, Some(&val_set), &optimizer, &config);
        (model, train_set, val_set)
    });

    for stats in rx {
        println!(
            "{:>6}  {:>10.4}  {:>10.4}  {:>9.2}%  {:>9.2}%  {:>6.1}s",
            stats.epoch,
            stats.train_loss,
            stats.val_loss.unwrap_or(f64::NAN),
            stats.train_accuracy.unwrap_or(0.0) * 100.0,
            stats.val_accuracy.unwrap_or(0.0) * 100.0,
            stats.elapsed_ms as f64 / 1000.0,
        );
    }

    let (mut model, _train_set, _val_set) = trainer.join().expect("training thread panicked");

    // --- Step 4: evaluate on the held-out test set ---
    println!("\nEvaluating on test set ({} images)...", test_set.len());
    let test_acc = accuracy(&mut model, &test_set);
    let test_loss = evaluate_loss(&mut model, &test_set, LossKind::Nll);
    let correct = (test_acc * test_set.len() as f64).round() as usize;
    println!("  Correct:       {}/{}", correct, test_set.len());
    println!("  Test accuracy: {:.2}%", test_acc * 100.0);
    println!("  Test NLL loss: {:.4}", test_loss);

    // --- Step 5: save the model and its spec ---
    let model_dir = "demos/trained";
    std::fs::create_dir_all(model_dir).expect("Failed to create model directory");
    model.save_json("demos/trained/mnist.json").expect("Failed to save model");
    spec.save_json("demos/trained/mnist.spec.json").expect("Failed to save model spec");
    println!("\nModel saved to demos/trained/mnist.json");

    // --- Step 6: visualize a prediction ---
    let labels: Vec<String> = (0..10).map(|d| d.to_string()).collect();
    show_sample(&mut model, &test_set, 0, &labels);

    // Also show the first mistake, if the classifier makes one.
    if let Some(miss) = (0..test_set.len())
        .find(|&i| model.predict(&test_set.inputs[i]).class != test_set.class_of(i))
    {
        println!("First misclassified test image (index {}):", miss);
        show_sample(&mut model, &test_set, miss, &labels);
    }

    // --- Step 7 (optional): classify a user-supplied digit image ---
    if let Ok(bytes) = std::fs::read(USER_DIGIT) {
        match decode_grayscale(&bytes, 28, 28) {
            Ok(pixels) => {
                println!("Classifying {}:", USER_DIGIT);
                let prediction = model.predict(&pixels);
                print!("{}", ascii_image(&pixels, 28, 28));
                print!("{}", probability_bars(&prediction.probabilities, &labels));
                println!("Predicted: {}\n", labels[prediction.class]);
            }
            Err(e) => eprintln!("Could not decode {}: {}", USER_DIGIT, e),
        }
    }
}

/// Prints one test image with the model's per-class probabilities.
fn show_sample(
    model: &mut primer_nn::Sequential,
    data: &Dataset,
    index: usize,
    labels: &[String],
) {
    let prediction = model.predict(&data.inputs[index]);
    let truth = data.class_of(index);

    println!(
        "\nTest image {} — true label {}, predicted {}:",
        index, labels[truth], labels[prediction.class]
    );
    print!("{}", ascii_image(&data.inputs[index], data.image_width, data.image_height));
    print!("{}", probability_bars(&prediction.probabilities, labels));
    println!();
}

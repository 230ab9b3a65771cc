/// primer-nn inspector
///
/// Browse a trained classifier's predictions over a test set: each page shows
/// one sample image, its true label, and the model's per-class probability
/// bars, with prev/next/random navigation. Served by a synchronous tiny_http
/// server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin inspector --release [model.json] [images-idx] [labels-idx]
/// Then open http://127.0.0.1:7878
///
/// Defaults point at the artifacts the MNIST walkthrough writes.

mod render;
mod routes;

use std::sync::{Arc, Mutex};

use tiny_http::Server;

use primer_nn::{Dataset, ModelSpec, Sequential};

const DEFAULT_MODEL: &str = "demos/trained/mnist.json";
const DEFAULT_IMAGES: &str = "demos/mnist_data/t10k-images-idx3-ubyte";
const DEFAULT_LABELS: &str = "demos/mnist_data/t10k-labels-idx1-ubyte";

pub struct InspectorState {
    pub model: Sequential,
    pub dataset: Dataset,
    pub class_labels: Vec<String>,
}

pub type SharedState = Arc<Mutex<InspectorState>>;

/// The spec file the walkthrough saves next to the weights, when present,
/// carries the human-readable class labels.
fn class_labels_for(model_path: &str, n_classes: usize) -> Vec<String> {
    let spec_path = model_path
        .strip_suffix(".json")
        .map(|stem| format!("{}.spec.json", stem));
    if let Some(spec_path) = spec_path {
        if let Ok(spec) = ModelSpec::load_json(&spec_path) {
            if let Some(labels) = spec.metadata.and_then(|m| m.class_labels) {
                if labels.len() == n_classes {
                    return labels;
                }
            }
        }
    }
    (0..n_classes).map(|c| c.to_string()).collect()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let model_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_MODEL);
    let images_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_IMAGES);
    let labels_path = args.get(3).map(String::as_str).unwrap_or(DEFAULT_LABELS);

    let model = Sequential::load_json(model_path).unwrap_or_else(|e| {
        eprintln!("Cannot load model '{}': {}", model_path, e);
        eprintln!("Train one first: cargo run --example mnist --release");
        std::process::exit(1);
    });

    let n_classes = model.output_size();
    let dataset = Dataset::from_idx_files(images_path, labels_path, n_classes)
        .unwrap_or_else(|e| {
            eprintln!("Cannot load dataset: {}", e);
            std::process::exit(1);
        });

    if model.input_size() != dataset.image_width * dataset.image_height {
        eprintln!(
            "Model expects {} inputs but dataset images have {}×{} = {} pixels.",
            model.input_size(),
            dataset.image_width,
            dataset.image_height,
            dataset.image_width * dataset.image_height
        );
        std::process::exit(1);
    }

    let class_labels = class_labels_for(model_path, n_classes);

    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");
    let shared_state: SharedState = Arc::new(Mutex::new(InspectorState {
        model,
        dataset,
        class_labels,
    }));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          primer-nn inspector                 ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{}                 ║", addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Browse predictions with prev/next/random    ║");
    println!("╚══════════════════════════════════════════════╝");

    // Each request is dispatched on its own thread so a slow client cannot
    // stall other page loads.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}

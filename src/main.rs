// This binary crate is intentionally minimal.
// All neural network logic lives in the library (src/lib.rs and its modules).
// Run the walkthroughs with:
//   cargo run --example first_steps
//   cargo run --example mnist --release
fn main() {
    println!("primer-nn: train a small feed-forward image classifier, step by step.");
    println!("Run `cargo run --example first_steps` for the minimal walkthrough,");
    println!("`cargo run --example mnist --release` for the full MNIST one, and");
    println!("`cargo run --bin inspector --release` to browse a trained model's predictions.");
}

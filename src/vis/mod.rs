pub mod terminal;

pub use terminal::{ascii_image, probability_bars};

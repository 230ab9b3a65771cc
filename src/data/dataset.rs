use rand::prelude::*;

use crate::data::idx;
use crate::model::sequential::argmax;

/// A labeled image dataset: normalized pixel vectors paired with one-hot
/// targets, plus the image geometry needed to render samples back out.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    /// One-hot target distributions, one per input.
    pub targets: Vec<Vec<f64>>,
    pub n_classes: usize,
    pub image_width: usize,
    pub image_height: usize,
}

impl Dataset {
    /// Loads an IDX image/label file pair (pixels normalized to [0, 1],
    /// labels one-hot encoded).
    pub fn from_idx_files(
        image_path: &str,
        label_path: &str,
        n_classes: usize,
    ) -> Result<Dataset, String> {
        let pair = idx::read_idx_pair(image_path, label_path, n_classes)?;
        Ok(Dataset {
            inputs: pair.inputs,
            targets: pair.targets,
            n_classes,
            image_width: pair.cols,
            image_height: pair.rows,
        })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Class index of sample `i` (argmax of its one-hot target).
    pub fn class_of(&self, i: usize) -> usize {
        argmax(&self.targets[i])
    }

    /// Standardizes every pixel in place: `x ← (x - mean) / std`.
    ///
    /// Applied after the [0, 1] normalization from loading; `std` must be
    /// non-zero.
    pub fn standardize(&mut self, mean: f64, std: f64) {
        assert!(std != 0.0, "standardize() requires a non-zero std");
        for input in &mut self.inputs {
            for px in input.iter_mut() {
                *px = (*px - mean) / std;
            }
        }
    }

    /// Splits off a validation set: returns `(train, validation)` where the
    /// validation set holds `val_fraction` of the samples, chosen at random.
    ///
    /// With `0 < val_fraction < 1` and at least two samples, both sides are
    /// guaranteed non-empty.
    pub fn split(mut self, val_fraction: f64) -> (Dataset, Dataset) {
        assert!(
            (0.0..1.0).contains(&val_fraction),
            "val_fraction must be in [0, 1), got {}",
            val_fraction
        );

        let n = self.len();
        let mut n_val = (n as f64 * val_fraction).round() as usize;
        if val_fraction > 0.0 && n >= 2 {
            n_val = n_val.clamp(1, n - 1);
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut rand::thread_rng());

        let val_indices = &order[..n_val];
        let mut val = Dataset {
            inputs: Vec::with_capacity(n_val),
            targets: Vec::with_capacity(n_val),
            n_classes: self.n_classes,
            image_width: self.image_width,
            image_height: self.image_height,
        };
        // Pull validation rows out back-to-front so earlier indices stay valid.
        let mut sorted: Vec<usize> = val_indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        for idx in sorted {
            val.inputs.push(self.inputs.swap_remove(idx));
            val.targets.push(self.targets.swap_remove(idx));
        }

        (self, val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_dataset(n: usize) -> Dataset {
        Dataset {
            inputs: (0..n).map(|i| vec![i as f64; 4]).collect(),
            targets: (0..n)
                .map(|i| if i % 2 == 0 { vec![1.0, 0.0] } else { vec![0.0, 1.0] })
                .collect(),
            n_classes: 2,
            image_width: 2,
            image_height: 2,
        }
    }

    #[test]
    fn class_of_reads_one_hot() {
        let data = toy_dataset(4);
        assert_eq!(data.class_of(0), 0);
        assert_eq!(data.class_of(1), 1);
    }

    #[test]
    fn split_partitions_all_samples() {
        let data = toy_dataset(10);
        let (train, val) = data.split(0.2);
        assert_eq!(val.len(), 2);
        assert_eq!(train.len(), 8);
        assert_eq!(train.n_classes, 2);
        assert_eq!(val.image_width, 2);
    }

    #[test]
    fn split_keeps_both_sides_non_empty() {
        let data = toy_dataset(2);
        let (train, val) = data.split(0.01);
        assert_eq!(train.len(), 1);
        assert_eq!(val.len(), 1);
    }

    #[test]
    fn split_zero_fraction_keeps_everything() {
        let data = toy_dataset(5);
        let (train, val) = data.split(0.0);
        assert_eq!(train.len(), 5);
        assert!(val.is_empty());
    }

    #[test]
    fn standardize_shifts_and_scales() {
        let mut data = toy_dataset(2);
        data.standardize(0.5, 0.5);
        assert_eq!(data.inputs[0][0], -1.0); // (0 - 0.5) / 0.5
        assert_eq!(data.inputs[1][0], 1.0);  // (1 - 0.5) / 0.5
    }
}

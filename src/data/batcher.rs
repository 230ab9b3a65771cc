use rand::prelude::*;

/// Shuffled mini-batch iterator over sample indices.
///
/// Each epoch constructs a fresh `Batches`: every index in `0..len` is
/// visited exactly once, in random order, in chunks of `batch_size` (the
/// final chunk may be shorter). Generic over the RNG so tests can seed it.
pub struct Batches {
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl Batches {
    pub fn new<R: Rng>(len: usize, batch_size: usize, rng: &mut R) -> Batches {
        assert!(batch_size > 0, "batch_size must be at least 1");
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        Batches { order, batch_size, cursor: 0 }
    }

    /// Number of batches this iterator will yield in total.
    pub fn batch_count(&self) -> usize {
        (self.order.len() + self.batch_size - 1) / self.batch_size
    }
}

impl Iterator for Batches {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let batch = self.order[self.cursor..end].to_vec();
        self.cursor = end;
        Some(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_every_index_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = vec![0usize; 10];
        for batch in Batches::new(10, 3, &mut rng) {
            for idx in batch {
                seen[idx] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn final_batch_may_be_short() {
        let mut rng = StdRng::seed_from_u64(7);
        let sizes: Vec<usize> = Batches::new(10, 4, &mut rng).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn oversized_batch_yields_single_batch() {
        let mut rng = StdRng::seed_from_u64(7);
        let batches: Vec<_> = Batches::new(3, 64, &mut rng).collect();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
    }

    #[test]
    fn empty_input_yields_no_batches() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Batches::new(0, 4, &mut rng).count(), 0);
    }

    #[test]
    fn batch_count_matches_iteration() {
        let mut rng = StdRng::seed_from_u64(1);
        let batches = Batches::new(100, 32, &mut rng);
        assert_eq!(batches.batch_count(), 4);
        assert_eq!(batches.count(), 4);
    }

    #[test]
    #[should_panic(expected = "batch_size must be at least 1")]
    fn zero_batch_size_panics() {
        let mut rng = StdRng::seed_from_u64(7);
        let _ = Batches::new(10, 0, &mut rng);
    }
}

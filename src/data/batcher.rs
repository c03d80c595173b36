// ============================================================
// Layer 4 — Dialogue Batcher
// ============================================================
// Splits a dataset into training batches for one epoch.
//
//   1. Collect row indices 0..len
//   2. Shuffle them with a seeded RNG (same seed → same order)
//   3. Walk the shuffled indices in windows of batch_size
//   4. Fetch each row through Dataset::get and split it into
//      the inputs / targets columns
//
// The last batch may be shorter than batch_size.

use burn::data::dataset::Dataset;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::data::dataset::DialogueItem;

/// One batch of rows, column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueBatch {
    pub inputs:  Vec<String>,
    pub targets: Vec<String>,
}

pub struct DialogueBatcher {
    batch_size: usize,
    rng:        StdRng,
}

impl DialogueBatcher {
    /// Create a batcher. A `batch_size` of 0 is treated as 1.
    pub fn new(batch_size: usize, seed: u64) -> Self {
        Self {
            batch_size: batch_size.max(1),
            rng:        StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle and batch every row of `dataset`.
    /// Each call advances the RNG, so successive epochs see different orders.
    pub fn epoch<D: Dataset<DialogueItem>>(&mut self, dataset: &D) -> Vec<DialogueBatch> {
        let mut indices: Vec<usize> = (0..dataset.len()).collect();
        indices.shuffle(&mut self.rng);

        indices
            .chunks(self.batch_size)
            .map(|window| {
                let (inputs, targets) = window
                    .iter()
                    .filter_map(|&i| dataset.get(i))
                    .map(|item| (item.input_text, item.target_text))
                    .unzip();
                DialogueBatch { inputs, targets }
            })
            .collect()
    }
}

// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only ever talks to these traits:
//
//   PairSource   → TranscriptLoader reads Q/A pairs from a file
//   Metric       → CharOverlapMatch scores generated text
//   Seq2SeqModel → MemorySeq2Seq, or a stub in tests
//   Persistable  → MemorySeq2Seq saves/loads its model directory
//
// Swapping the model for a real encoder-decoder only requires a
// new Seq2SeqModel implementation; parsing and scoring stay as is.

use std::path::Path;

use anyhow::Result;

use crate::data::dataset::DialogueDataset;
use crate::domain::dialogue_pair::DialoguePair;
use crate::domain::report::{EvalReport, TrainSummary};

// ─── PairSource ───────────────────────────────────────────────────────────────
/// Any component that can produce dialogue pairs.
pub trait PairSource {
    /// Load every pair, in source order.
    fn load_pairs(&self) -> Result<Vec<DialoguePair>>;
}

// ─── Metric ───────────────────────────────────────────────────────────────────
/// An evaluation callback comparing reference texts against generated texts.
///
/// The model invokes it during evaluation with equal-length slices,
/// labels first.
pub trait Metric {
    /// Key under which the score is reported
    fn name(&self) -> &str;

    fn score(&self, labels: &[String], predictions: &[String]) -> Result<f64>;
}

// ─── Seq2SeqModel ─────────────────────────────────────────────────────────────
/// The narrow interface to a sequence-to-sequence model.
pub trait Seq2SeqModel {
    /// Fit the model on `train`. When `eval` is given the model may evaluate
    /// on it between epochs, reporting `metric` alongside its loss.
    fn train(
        &mut self,
        train:  &DialogueDataset,
        eval:   Option<&DialogueDataset>,
        metric: &dyn Metric,
    ) -> Result<TrainSummary>;

    /// Generate for every row of `data` and score against its targets.
    fn evaluate(&self, data: &DialogueDataset, metric: &dyn Metric) -> Result<EvalReport>;

    /// Generate one output per input, in order.
    fn predict(&self, inputs: &[String]) -> Result<Vec<String>>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be written to and restored from a directory.
pub trait Persistable: Sized {
    fn save(&self, dir: &Path) -> Result<()>;

    fn load(dir: &Path) -> Result<Self>;
}

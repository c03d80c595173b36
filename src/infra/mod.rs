// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Filesystem concerns shared by the model and the use cases:
//
//   checkpoint.rs      — reads/writes a model directory
//                        (model_args.json, memory.json)
//
//   tokenizer_store.rs — builds the word-level tokenizer and
//                        persists it as tokenizer.json
//
//   metrics.rs         — appends evaluation results to
//                        training_progress_scores.csv

/// Model directory saving and loading
pub mod checkpoint;

/// Tokenizer building, saving, and loading
pub mod tokenizer_store;

/// Training progress CSV logger
pub mod metrics;

// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From a transcript on disk to batches the model can consume:
//
//   dialog.txt
//       │
//       ▼
//   TranscriptLoader  → Q:/A: lines to DialoguePairs
//       │
//       ▼
//   DialogueDataset   → input_text / target_text rows (burn Dataset)
//       │
//       ▼
//   DialogueBatcher   → seeded shuffle, fixed-size batches
//
// Each module is responsible for exactly one step.

/// Typed errors for transcript reading
pub mod error;

/// Parses Q:/A: dialogue transcripts into pairs
pub mod loader;

/// Implements burn's Dataset trait for dialogue rows
pub mod dataset;

/// Shuffles dataset rows into training batches
pub mod batcher;

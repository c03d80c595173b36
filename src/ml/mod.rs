// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything that generates or scores text:
//
//   args.rs     — ModelArgs, the per-run model configuration
//
//   scoring.rs  — character-set similarity and the "matches"
//                 batch metric used during evaluation
//
//   model.rs    — MemorySeq2Seq, a nearest-neighbour responder
//                 implementing the Seq2SeqModel trait
//
//   trainer.rs  — epoch loop with evaluation, best-model
//                 saving and early stopping

/// Model configuration persisted as model_args.json
pub mod args;

/// Similarity scorer and batch match metric
pub mod scoring;

/// Nearest-neighbour sequence-to-sequence model
pub mod model;

/// Training loop with evaluation and checkpointing
pub mod trainer;

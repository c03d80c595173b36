// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// The vocabulary of the system: what a dialogue pair is, what an
// evaluation produces, and the seams (traits) that the data, ml
// and infra layers plug into.
//
// Nothing in here touches the filesystem or a tokenizer. The
// application layer wires concrete implementations together
// through these traits only.

// A (question, answer) pair extracted from a transcript
pub mod dialogue_pair;

// Results produced by evaluation and training runs
pub mod report;

// Core abstractions (traits) that other layers implement
pub mod traits;

// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: each use case wires the data,
// ml and infra layers together for one command. No parsing,
// scoring or file formats live here.

// The training workflow
pub mod train_use_case;

// The prediction workflow
pub mod predict_use_case;

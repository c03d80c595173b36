// ============================================================
// Layer 5 — Model Arguments
// ============================================================
// Everything the model needs to know about a training run.
// Saved next to the weights as model_args.json so a model
// directory can be reloaded without the original CLI flags.

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelArgs {
    /// Architecture family, e.g. "bart"
    pub model_type: String,

    /// Base model to start from; a directory holding a saved model
    /// is warm-started, anything else starts empty
    pub model_name: String,

    /// Input tokens kept per question
    pub max_seq_length: usize,

    /// Words kept per generated answer
    pub max_length: usize,

    pub train_batch_size: usize,
    pub num_train_epochs: usize,

    /// Seed for the per-epoch shuffle
    pub manual_seed: u64,

    pub output_dir:     PathBuf,
    pub best_model_dir: PathBuf,

    /// Refuse to train into a non-empty output_dir when false
    pub overwrite_output_dir: bool,

    pub evaluate_during_training:         bool,
    pub evaluate_during_training_verbose: bool,

    /// Invoke the metric callback on generated text during evaluation
    pub evaluate_generated_text: bool,

    pub save_model_every_epoch: bool,
    pub save_eval_checkpoints:  bool,
    pub save_best_model:        bool,

    pub use_early_stopping:     bool,
    pub early_stopping_patience: usize,
    /// Minimum eval_loss decrease that counts as an improvement
    pub early_stopping_delta:   f64,

    /// Suppress per-epoch progress lines on stdout
    pub silent: bool,
}

impl Default for ModelArgs {
    fn default() -> Self {
        let output_dir = PathBuf::from("./outputs/bart_en/");
        Self {
            model_type:                       "bart".to_string(),
            model_name:                       "facebook/bart-base".to_string(),
            max_seq_length:                   50,
            max_length:                       50,
            train_batch_size:                 32,
            num_train_epochs:                 30,
            manual_seed:                      42,
            best_model_dir:                   output_dir.join("best_model"),
            output_dir,
            overwrite_output_dir:             true,
            evaluate_during_training:         true,
            evaluate_during_training_verbose: true,
            evaluate_generated_text:          true,
            save_model_every_epoch:           false,
            save_eval_checkpoints:            false,
            save_best_model:                  true,
            use_early_stopping:               true,
            early_stopping_patience:          3,
            early_stopping_delta:             0.0,
            silent:                           false,
        }
    }
}

impl ModelArgs {
    /// Reject settings that would make training meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.max_seq_length == 0 {
            bail!("max_seq_length must be at least 1");
        }
        if self.max_length == 0 {
            bail!("max_length must be at least 1");
        }
        if self.train_batch_size == 0 {
            bail!("train_batch_size must be at least 1");
        }
        if self.early_stopping_delta < 0.0 {
            bail!("early_stopping_delta must not be negative");
        }
        Ok(())
    }
}

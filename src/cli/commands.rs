// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `predict`, and all
// their configurable flags.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the dialogue model on a Q:/A: transcript
    Train(TrainArgs),

    /// Generate responses with a trained model
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Training transcript (`=` separators, `Q: ` / `A: ` lines)
    #[arg(long, default_value = "../data/en_dialog.txt")]
    pub train_file: PathBuf,

    /// Model type
    #[arg(long, default_value = "bart")]
    pub model_type: String,

    /// Base model name, or a saved model directory to continue from
    #[arg(long, default_value = "facebook/bart-base")]
    pub model_name: String,

    /// Model output directory
    #[arg(long, default_value = "./outputs/bart_en/")]
    pub output_dir: PathBuf,

    /// Input max sequence length
    #[arg(long, default_value_t = 50)]
    pub max_seq_length: usize,

    /// Output max sequence length
    #[arg(long, default_value_t = 50)]
    pub max_length: usize,

    /// Number of training epochs
    #[arg(long, default_value_t = 30)]
    pub num_epochs: usize,

    /// Batch size
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Number of leading transcript pairs used for evaluation
    #[arg(long, default_value_t = 10)]
    pub eval_size: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            train_file:     a.train_file,
            model_type:     a.model_type,
            model_name:     a.model_name,
            output_dir:     a.output_dir,
            max_seq_length: a.max_seq_length,
            max_length:     a.max_length,
            num_epochs:     a.num_epochs,
            batch_size:     a.batch_size,
            eval_size:      a.eval_size,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Directory the model was trained into
    #[arg(long, default_value = "./outputs/bart_en/")]
    pub output_dir: PathBuf,

    /// Model type
    #[arg(long, default_value = "bart")]
    pub model_type: String,

    /// Utterance to respond to; repeat for several. Two demo
    /// utterances are used when omitted.
    #[arg(long = "input")]
    pub inputs: Vec<String>,
}

// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with clap and delegates to
// Layer 2. Two commands are supported:
//   1. `train`   — trains the model on a dialogue transcript
//   2. `predict` — loads a trained model and answers utterances

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "dialog-seq2seq",
    version,
    about = "Train a sequence-to-sequence dialogue model on Q/A transcripts, then query it."
)]
pub struct Cli {
    /// The subcommand to run (train or predict)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("{:?}", args);

    let outcome = TrainUseCase::new(args.into()).execute()?;
    tracing::debug!("Train summary: {:?}", outcome.summary);
    match outcome.report {
        Some(report) => println!("{report}"),
        None         => println!("Training complete. No evaluation rows."),
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    tracing::info!("{:?}", args);

    let use_case    = PredictUseCase::from_output_dir(&args.output_dir, &args.model_type)?;
    let predictions = use_case.predict(&args.inputs)?;
    for prediction in predictions {
        println!("{prediction}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["dialog-seq2seq", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert_eq!(args.max_seq_length, 50);
        assert_eq!(args.batch_size, 32);
        assert_eq!(args.num_epochs, 30);
        assert_eq!(args.model_name, "facebook/bart-base");
    }

    #[test]
    fn test_predict_collects_repeated_inputs() {
        let cli = Cli::try_parse_from([
            "dialog-seq2seq", "predict", "--input", "hello", "--input", "bye",
        ])
        .unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        assert_eq!(args.inputs, vec!["hello", "bye"]);
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["dialog-seq2seq", "serve"]).is_err());
    }
}

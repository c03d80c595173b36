// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a training run in order:
//
//   Step 1: Parse the transcript into pairs      (Layer 4 - data)
//   Step 2: Build the train and eval datasets    (Layer 4 - data)
//   Step 3: Build the model                      (Layer 5 - ml)
//   Step 4: Train, evaluating with "matches"     (Layer 5 - ml)
//   Step 5: Final evaluation on the eval set     (Layer 5 - ml)

use std::path::PathBuf;

use anyhow::{bail, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::{dataset::DialogueDataset, loader::TranscriptLoader};
use crate::domain::report::{EvalReport, TrainSummary};
use crate::domain::traits::{PairSource, Seq2SeqModel};
use crate::ml::{args::ModelArgs, model::MemorySeq2Seq, scoring::CharOverlapMatch};

/// How many parsed pairs are echoed to the debug log
const PREVIEW_PAIRS: usize = 20;

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_file:     PathBuf,
    pub model_type:     String,
    pub model_name:     String,
    pub output_dir:     PathBuf,
    pub max_seq_length: usize,
    pub max_length:     usize,
    pub num_epochs:     usize,
    pub batch_size:     usize,
    /// Leading pairs of the transcript reused as the evaluation set
    pub eval_size:      usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_file:     PathBuf::from("../data/en_dialog.txt"),
            model_type:     "bart".to_string(),
            model_name:     "facebook/bart-base".to_string(),
            output_dir:     PathBuf::from("./outputs/bart_en/"),
            max_seq_length: 50,
            max_length:     50,
            num_epochs:     30,
            batch_size:     32,
            eval_size:      10,
        }
    }
}

impl From<&TrainConfig> for ModelArgs {
    fn from(cfg: &TrainConfig) -> Self {
        ModelArgs {
            model_type:       cfg.model_type.clone(),
            model_name:       cfg.model_name.clone(),
            max_seq_length:   cfg.max_seq_length,
            max_length:       cfg.max_length,
            train_batch_size: cfg.batch_size,
            num_train_epochs: cfg.num_epochs,
            best_model_dir:   cfg.output_dir.join("best_model"),
            output_dir:       cfg.output_dir.clone(),
            ..Default::default()
        }
    }
}

/// What a training run produced
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub summary: TrainSummary,
    /// Final evaluation, absent when the eval set is empty
    pub report:  Option<EvalReport>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Train the bundled MemorySeq2Seq model.
    pub fn execute(&self) -> Result<TrainOutcome> {
        let mut model = MemorySeq2Seq::new(ModelArgs::from(&self.config))?;
        self.execute_with(&mut model)
    }

    /// Run the pipeline against any Seq2SeqModel.
    pub fn execute_with<M: Seq2SeqModel>(&self, model: &mut M) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 1: Parse the transcript ──────────────────────────────────────
        tracing::info!("Loading data from '{}'", cfg.train_file.display());
        let pairs = TranscriptLoader::new(&cfg.train_file).load_pairs()?;
        if pairs.is_empty() {
            bail!(
                "No Q:/A: pairs found in '{}'; nothing to train on",
                cfg.train_file.display()
            );
        }
        tracing::debug!("train_data: {:?}", &pairs[..pairs.len().min(PREVIEW_PAIRS)]);

        // ── Step 2: Build datasets ────────────────────────────────────────────
        let train_ds = DialogueDataset::from_pairs(pairs);
        let eval_ds  = train_ds.head(cfg.eval_size);
        tracing::info!("Datasets: {} train rows, {} eval rows", train_ds.len(), eval_ds.len());

        // ── Step 3: Train ─────────────────────────────────────────────────────
        let metric  = CharOverlapMatch;
        let eval    = (!eval_ds.is_empty()).then_some(&eval_ds);
        let summary = model.train(&train_ds, eval, &metric)?;
        tracing::info!(
            "Trained {} epochs ({} steps){}",
            summary.epochs_run,
            summary.global_step,
            if summary.stopped_early { ", stopped early" } else { "" }
        );

        // ── Step 4: Final evaluation ──────────────────────────────────────────
        let report = match eval {
            Some(eval_ds) => Some(model.evaluate(eval_ds, &metric)?),
            None          => None,
        };

        Ok(TrainOutcome { summary, report })
    }
}

// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Epoch loop for MemorySeq2Seq, driven entirely by ModelArgs:
//
//   for each epoch:
//     shuffle + batch the training rows     (DialogueBatcher)
//     fit every batch, average the loss
//     optionally snapshot the model
//     evaluate on the eval rows             (if configured)
//       → append to training_progress_scores.csv
//       → save best_model when eval_loss improves
//       → stop early after `patience` evaluations without one
//   save the final model to output_dir

use std::path::Path;

use anyhow::{bail, Result};
use burn::data::dataset::Dataset;

use crate::data::{batcher::DialogueBatcher, dataset::DialogueDataset};
use crate::domain::report::TrainSummary;
use crate::domain::traits::{Metric, Persistable, Seq2SeqModel};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{ProgressLogger, ProgressRow};
use crate::ml::model::MemorySeq2Seq;

pub fn run_training(
    model:  &mut MemorySeq2Seq,
    train:  &DialogueDataset,
    eval:   Option<&DialogueDataset>,
    metric: &dyn Metric,
) -> Result<TrainSummary> {
    let args = model.args().clone();
    args.validate()?;

    if train.is_empty() {
        bail!("No training rows: the training dataset is empty");
    }

    let ckpt = CheckpointManager::new(&args.output_dir);
    ckpt.prepare(args.overwrite_output_dir)?;
    let progress = ProgressLogger::create(&args.output_dir, metric.name())?;
    tracing::debug!("Progress scores go to '{}'", progress.csv_path().display());

    model.extend_vocab(&train.inputs())?;

    let eval = eval.filter(|_| args.evaluate_during_training);
    let mut batcher = DialogueBatcher::new(args.train_batch_size, args.manual_seed);

    tracing::info!(
        "Training on {} rows for {} epochs (batch size {}){}",
        train.len(),
        args.num_train_epochs,
        args.train_batch_size,
        eval.map(|e| format!(", evaluating on {} rows", e.len())).unwrap_or_default(),
    );

    let mut summary = TrainSummary {
        epochs_run:     0,
        global_step:    0,
        train_loss:     f64::NAN,
        best_eval_loss: None,
        stopped_early:  false,
    };
    let mut best_loss = f64::INFINITY;
    let mut stale     = 0usize;

    for epoch in 1..=args.num_train_epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in batcher.epoch(train) {
            loss_sum += model.fit_batch(&batch)?;
            batches  += 1;
            summary.global_step += 1;
        }

        summary.epochs_run = epoch;
        summary.train_loss = loss_sum / batches.max(1) as f64;

        if !args.silent {
            println!(
                "Epoch {:>3}/{} | train_loss={:.4} | memory={}",
                epoch,
                args.num_train_epochs,
                summary.train_loss,
                model.memory().len(),
            );
        }

        if args.save_model_every_epoch {
            save_snapshot(model, &ckpt.snapshot_dir(summary.global_step, epoch))?;
        }

        // ── Evaluation phase ──────────────────────────────────────────────────
        let Some(eval_data) = eval else { continue };

        let report = model.evaluate(eval_data, metric)?;
        let row    = ProgressRow {
            global_step: summary.global_step,
            epoch,
            train_loss:  summary.train_loss,
            eval_loss:   report.eval_loss,
            metric:      report.metric_value(),
        };
        progress.log(&row)?;

        if args.evaluate_during_training_verbose {
            tracing::info!("Epoch {} evaluation: {}", epoch, report);
        }

        if args.save_eval_checkpoints && !args.save_model_every_epoch {
            save_snapshot(model, &ckpt.snapshot_dir(summary.global_step, epoch))?;
        }

        if row.is_improvement(best_loss, args.early_stopping_delta) {
            best_loss = row.eval_loss;
            summary.best_eval_loss = Some(best_loss);
            stale = 0;

            if args.save_best_model {
                model.save(&args.best_model_dir)?;
                tracing::info!(
                    "New best eval_loss {:.6}, saved to '{}'",
                    best_loss,
                    args.best_model_dir.display()
                );
            }
        } else {
            stale += 1;
            tracing::debug!("No improvement for {} evaluation(s)", stale);

            if args.use_early_stopping && stale >= args.early_stopping_patience {
                tracing::info!(
                    "Early stopping at epoch {}: eval_loss has not improved for {} evaluations",
                    epoch,
                    stale
                );
                summary.stopped_early = true;
                break;
            }
        }
    }

    model.save(&args.output_dir)?;
    tracing::info!("Training complete! Model saved to '{}'", args.output_dir.display());
    Ok(summary)
}

fn save_snapshot(model: &MemorySeq2Seq, dir: &Path) -> Result<()> {
    model.save(dir)?;
    tracing::debug!("Saved snapshot '{}'", dir.display());
    Ok(())
}

// ============================================================
// Layer 6 — Training Progress Logger
// ============================================================
// Appends one CSV row per evaluation during training.
//
// Output file: <output_dir>/training_progress_scores.csv
//
//   global_step,epoch,train_loss,eval_loss,matches
//   4,1,1.000000,0.000000,1.000000
//   8,2,0.000000,0.000000,1.000000
//
// The last column is named after the metric callback and is left
// blank when the callback was not run (evaluate_generated_text = false).

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

const CSV_FILE: &str   = "training_progress_scores.csv";
const CSV_COLUMNS: &str = "global_step,epoch,train_loss,eval_loss";

/// One evaluation during training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRow {
    pub global_step: usize,
    pub epoch:       usize,
    pub train_loss:  f64,
    pub eval_loss:   f64,
    pub metric:      Option<f64>,
}

impl ProgressRow {
    /// True if this row beats `best` by more than `delta`
    pub fn is_improvement(&self, best: f64, delta: f64) -> bool {
        best - self.eval_loss > delta
    }
}

pub struct ProgressLogger {
    csv_path: PathBuf,
}

impl ProgressLogger {
    /// Start a fresh progress file in `dir`, replacing any previous run's.
    /// `metric_name` heads the last column.
    pub fn create(dir: &Path, metric_name: &str) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;

        let csv_path = dir.join(CSV_FILE);
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "{CSV_COLUMNS},{metric_name}")?;

        tracing::debug!("Created progress CSV: '{}'", csv_path.display());
        Ok(Self { csv_path })
    }

    pub fn log(&self, row: &ProgressRow) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        let metric = row.metric.map(|m| format!("{m:.6}")).unwrap_or_default();
        writeln!(
            f,
            "{},{},{:.6},{:.6},{}",
            row.global_step, row.epoch, row.train_loss, row.eval_loss, metric,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

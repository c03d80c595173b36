// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Reads and writes one model directory.
//
// Directory layout:
//   outputs/bart_en/
//     model_args.json                 ← ModelArgs used for the run
//     memory.json                     ← memorised (question, answer) entries
//     tokenizer.json                  ← written by TokenizerStore
//     training_progress_scores.csv    ← written by ProgressLogger
//     best_model/                     ← same layout, best eval_loss
//     checkpoint-<step>-epoch-<n>/    ← optional per-epoch snapshots
//
// Everything is JSON via serde_json so a directory can be
// inspected by hand.

use anyhow::{bail, Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::PathBuf};

use crate::ml::args::ModelArgs;
use crate::ml::model::MemoryEntry;

const ARGS_FILE:   &str = "model_args.json";
const MEMORY_FILE: &str = "memory.json";

/// Manages the files of a single model directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// True when the directory holds a saved model.
    pub fn has_model(&self) -> bool {
        self.dir.join(ARGS_FILE).is_file() && self.dir.join(MEMORY_FILE).is_file()
    }

    /// Make sure the directory exists and may be written into.
    ///
    /// A non-empty directory is only accepted when `overwrite` is set.
    pub fn prepare(&self, overwrite: bool) -> Result<()> {
        if self.dir.is_dir() && !overwrite {
            let mut entries = fs::read_dir(&self.dir)
                .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?;
            if entries.next().is_some() {
                bail!(
                    "Output directory '{}' already exists and is not empty. \
                     Set overwrite_output_dir to train into it anyway.",
                    self.dir.display()
                );
            }
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create directory '{}'", self.dir.display()))
    }

    pub fn save_args(&self, args: &ModelArgs) -> Result<()> {
        self.write_json(ARGS_FILE, args)
    }

    pub fn load_args(&self) -> Result<ModelArgs> {
        self.read_json(ARGS_FILE)
    }

    pub fn save_memory(&self, entries: &[MemoryEntry]) -> Result<()> {
        self.write_json(MEMORY_FILE, entries)
    }

    pub fn load_memory(&self) -> Result<Vec<MemoryEntry>> {
        self.read_json(MEMORY_FILE)
    }

    /// Directory for an intermediate snapshot, e.g. `checkpoint-40-epoch-2`.
    pub fn snapshot_dir(&self, global_step: usize, epoch: usize) -> PathBuf {
        self.dir.join(format!("checkpoint-{global_step}-epoch-{epoch}"))
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create directory '{}'", self.dir.display()))?;

        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::debug!("Wrote '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read '{}'. Have you run 'train' with this output directory?",
                path.display()
            )
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed JSON in '{}'", path.display()))
    }
}

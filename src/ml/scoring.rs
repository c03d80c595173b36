// ============================================================
// Layer 5 — Generated Text Scoring
// ============================================================
// A deliberately crude similarity between a generated answer
// and its reference: compare the SETS of characters used,
// ignoring order and repetition.
//
//   similarity("abab", "ab") = |{a,b} ∩ {a,b}| / max(2, 2) = 1.0
//   similarity("cat", "act") = 1.0
//   similarity("abc", "xyz") = 0.0
//
// batch_match averages this over a batch and is what the
// model reports as "matches" during evaluation.

use std::collections::HashSet;

use anyhow::Result;
use thiserror::Error;

use crate::domain::traits::Metric;

/// How many labels/predictions are echoed to the debug log per batch
const LOG_PREVIEW: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("cannot score an empty batch")]
    EmptyBatch,

    #[error("batch length mismatch: {labels} labels vs {predictions} predictions")]
    LengthMismatch { labels: usize, predictions: usize },
}

/// Character-set overlap between two strings, in [0, 1].
///
/// Returns 0.0 when either string is empty.
pub fn similarity(text1: &str, text2: &str) -> f64 {
    if text1.is_empty() || text2.is_empty() {
        return 0.0;
    }

    let set1: HashSet<char> = text1.chars().collect();
    let set2: HashSet<char> = text2.chars().collect();

    let shared  = set1.intersection(&set2).count();
    let largest = set1.len().max(set2.len());

    shared as f64 / largest as f64
}

/// Mean `similarity` over corresponding label/prediction pairs.
pub fn batch_match(labels: &[String], predictions: &[String]) -> Result<f64, ScoreError> {
    if labels.is_empty() {
        return Err(ScoreError::EmptyBatch);
    }
    if labels.len() != predictions.len() {
        return Err(ScoreError::LengthMismatch {
            labels:      labels.len(),
            predictions: predictions.len(),
        });
    }

    tracing::debug!("labels: {:?}", &labels[..labels.len().min(LOG_PREVIEW)]);
    tracing::debug!("preds: {:?}", &predictions[..predictions.len().min(LOG_PREVIEW)]);

    let total: f64 = labels
        .iter()
        .zip(predictions)
        .map(|(label, pred)| similarity(label, pred))
        .sum();
    let score = total / labels.len() as f64;

    tracing::debug!("match: {}", score);
    Ok(score)
}

/// `batch_match` packaged as the "matches" evaluation callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharOverlapMatch;

impl Metric for CharOverlapMatch {
    fn name(&self) -> &str {
        "matches"
    }

    fn score(&self, labels: &[String], predictions: &[String]) -> Result<f64> {
        Ok(batch_match(labels, predictions)?)
    }
}

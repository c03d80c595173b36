// ============================================================
// Layer 3 — Evaluation and Training Reports
// ============================================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of one evaluation pass over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// 1 - mean similarity between targets and generated text.
    /// Lower is better, 0.0 means every target was reproduced.
    pub eval_loss: f64,

    /// Score returned by the metric callback, if it was invoked
    pub metric: Option<MetricScore>,
}

/// A metric callback's score, keyed by the callback's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub name:  String,
    pub value: f64,
}

impl EvalReport {
    pub fn metric_value(&self) -> Option<f64> {
        self.metric.as_ref().map(|m| m.value)
    }
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.metric {
            Some(m) => write!(f, "{{'eval_loss': {:.6}, '{}': {:.6}}}", self.eval_loss, m.name, m.value),
            None    => write!(f, "{{'eval_loss': {:.6}}}", self.eval_loss),
        }
    }
}

/// Summary of a finished training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Epochs actually completed (fewer than configured on early stop)
    pub epochs_run: usize,

    /// Total number of batches processed
    pub global_step: usize,

    /// Mean training loss of the final epoch
    pub train_loss: f64,

    /// Lowest eval_loss seen, if any evaluation ran
    pub best_eval_loss: Option<f64>,

    pub stopped_early: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_matches() {
        let r = EvalReport {
            eval_loss: 0.25,
            metric:    Some(MetricScore { name: "matches".into(), value: 0.75 }),
        };
        assert_eq!(r.to_string(), "{'eval_loss': 0.250000, 'matches': 0.750000}");
        assert_eq!(r.metric_value(), Some(0.75));
    }

    #[test]
    fn test_display_uses_metric_name() {
        let r = EvalReport {
            eval_loss: 0.5,
            metric:    Some(MetricScore { name: "bleu".into(), value: 0.5 }),
        };
        assert_eq!(r.to_string(), "{'eval_loss': 0.500000, 'bleu': 0.500000}");
    }

    #[test]
    fn test_display_without_matches() {
        let r = EvalReport { eval_loss: 1.0, metric: None };
        assert_eq!(r.to_string(), "{'eval_loss': 1.000000}");
    }
}

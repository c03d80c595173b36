// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Loads a trained model directory and generates a response for
// each input utterance.

use std::path::Path;

use anyhow::Result;

use crate::domain::traits::{Persistable, Seq2SeqModel};
use crate::ml::model::MemorySeq2Seq;

/// Utterances answered when none are given on the command line
pub const DEMO_INPUTS: [&str; 2] = [
    "that 's the kind of guy she likes ? Pretty ones ?",
    "Not the hacking and gagging and spitting part .",
];

pub struct PredictUseCase<M: Seq2SeqModel> {
    model: M,
}

impl PredictUseCase<MemorySeq2Seq> {
    /// Load the model saved in `output_dir`.
    pub fn from_output_dir(output_dir: &Path, model_type: &str) -> Result<Self> {
        let model = MemorySeq2Seq::load(output_dir)?;
        if model.args().model_type != model_type {
            tracing::warn!(
                "Model in '{}' was trained as '{}', not '{}'",
                output_dir.display(),
                model.args().model_type,
                model_type
            );
        }
        Ok(Self::with_model(model))
    }
}

impl<M: Seq2SeqModel> PredictUseCase<M> {
    pub fn with_model(model: M) -> Self {
        Self { model }
    }

    /// Predict for `inputs`, or for the demo utterances when empty.
    pub fn predict(&self, inputs: &[String]) -> Result<Vec<String>> {
        if inputs.is_empty() {
            let demo: Vec<String> = DEMO_INPUTS.iter().map(|s| s.to_string()).collect();
            return self.model.predict(&demo);
        }
        self.model.predict(inputs)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::DialogueDataset;
    use crate::domain::report::{EvalReport, TrainSummary};
    use crate::domain::traits::Metric;

    /// Returns the length of each input as text
    struct LengthModel;

    impl Seq2SeqModel for LengthModel {
        fn train(&mut self, _: &DialogueDataset, _: Option<&DialogueDataset>, _: &dyn Metric) -> Result<TrainSummary> {
            anyhow::bail!("not trainable")
        }

        fn evaluate(&self, _: &DialogueDataset, _: &dyn Metric) -> Result<EvalReport> {
            anyhow::bail!("not evaluable")
        }

        fn predict(&self, inputs: &[String]) -> Result<Vec<String>> {
            Ok(inputs.iter().map(|i| i.len().to_string()).collect())
        }
    }

    #[test]
    fn test_empty_inputs_use_demo_utterances() {
        let uc    = PredictUseCase::with_model(LengthModel);
        let preds = uc.predict(&[]).unwrap();
        assert_eq!(preds.len(), DEMO_INPUTS.len());
        assert_eq!(preds[0], DEMO_INPUTS[0].len().to_string());
    }

    #[test]
    fn test_given_inputs_are_used() {
        let uc    = PredictUseCase::with_model(LengthModel);
        let preds = uc.predict(&["abc".to_string()]).unwrap();
        assert_eq!(preds, vec!["3".to_string()]);
    }

    #[test]
    fn test_missing_model_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PredictUseCase::from_output_dir(dir.path(), "bart").is_err());
    }
}

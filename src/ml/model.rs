// ============================================================
// Layer 5 — Memory Seq2Seq Model
// ============================================================
// A nearest-neighbour responder behind the Seq2SeqModel trait.
//
// Training memorises (question, answer) rows. Generation
// tokenises the input with the word-level tokenizer, finds the
// memorised question with the highest token overlap and
// returns its answer:
//
//   overlap(a, b) = |ids(a) ∩ ids(b)| / |ids(a) ∪ ids(b)|
//
// Ties fall back to character similarity of the raw questions,
// then to the earliest memorised entry.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;

use crate::data::batcher::DialogueBatch;
use crate::data::dataset::DialogueDataset;
use crate::domain::report::{EvalReport, MetricScore, TrainSummary};
use crate::domain::traits::{Metric, Persistable, Seq2SeqModel};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::tokenizer_store::{build_word_level, encode_words, TokenizerStore};
use crate::ml::args::ModelArgs;
use crate::ml::scoring::{batch_match, similarity};
use crate::ml::trainer::run_training;

/// One memorised training row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub question: String,
    pub answer:   String,
}

pub struct MemorySeq2Seq {
    args:      ModelArgs,
    tokenizer: Tokenizer,
    entries:   Vec<MemoryEntry>,
    /// Token id set of each entry's question, parallel to `entries`
    keys:      Vec<HashSet<u32>>,
    /// Every memorised (question, answer) row
    known:     HashSet<(String, String)>,
}

impl MemorySeq2Seq {
    /// Build a model for a training run.
    ///
    /// If `args.model_name` is a directory holding a saved model its memory
    /// is carried over; otherwise the model starts empty.
    pub fn new(args: ModelArgs) -> Result<Self> {
        args.validate()?;

        let base    = CheckpointManager::new(&args.model_name);
        let entries = if base.has_model() {
            let saved = base.load_args()?;
            if saved.model_type != args.model_type {
                tracing::warn!(
                    "Base model '{}' was trained as '{}', continuing as '{}'",
                    args.model_name,
                    saved.model_type,
                    args.model_type
                );
            }
            let entries = base.load_memory()?;
            tracing::info!(
                "Warm start from '{}' with {} memorised pairs",
                args.model_name,
                entries.len()
            );
            entries
        } else {
            tracing::info!(
                "'{}' is not a saved model directory, starting from an empty memory",
                args.model_name
            );
            Vec::new()
        };

        Self::from_parts(args, entries, &[])
    }

    /// Assemble a model from its memory, building a tokenizer that covers
    /// the memorised questions and `extra_texts`.
    fn from_parts(args: ModelArgs, entries: Vec<MemoryEntry>, extra_texts: &[String]) -> Result<Self> {
        let mut corpus: Vec<&str> = entries.iter().map(|e| e.question.as_str()).collect();
        corpus.extend(extra_texts.iter().map(String::as_str));

        let tokenizer = build_word_level(&corpus)?;
        let mut model = Self { args, tokenizer, entries, keys: Vec::new(), known: HashSet::new() };
        model.rebuild_index()?;
        Ok(model)
    }

    pub fn args(&self) -> &ModelArgs {
        &self.args
    }

    pub fn memory(&self) -> &[MemoryEntry] {
        &self.entries
    }

    /// Rebuild the tokenizer so its vocabulary also covers `texts`.
    /// Called once before training so every training question has ids.
    pub fn extend_vocab(&mut self, texts: &[String]) -> Result<()> {
        *self = Self::from_parts(self.args.clone(), self.entries.clone(), texts)?;
        Ok(())
    }

    /// Train on one batch. Returns the batch loss measured *before* the
    /// batch is memorised: 1 - batch_match(targets, predictions).
    pub fn fit_batch(&mut self, batch: &DialogueBatch) -> Result<f64> {
        let predictions = self.predict(&batch.inputs)?;
        let loss        = 1.0 - batch_match(&batch.targets, &predictions)?;

        for (question, answer) in batch.inputs.iter().zip(&batch.targets) {
            self.memorise(question, answer)?;
        }
        Ok(loss)
    }

    fn memorise(&mut self, question: &str, answer: &str) -> Result<()> {
        let row = (question.to_string(), answer.to_string());
        if self.known.contains(&row) {
            return Ok(());
        }

        self.keys.push(self.key_of(question)?);
        self.known.insert(row);
        self.entries.push(MemoryEntry {
            question: question.to_string(),
            answer:   answer.to_string(),
        });
        Ok(())
    }

    fn rebuild_index(&mut self) -> Result<()> {
        self.keys = self
            .entries
            .iter()
            .map(|e| self.key_of(&e.question))
            .collect::<Result<_>>()?;
        self.known = self
            .entries
            .iter()
            .map(|e| (e.question.clone(), e.answer.clone()))
            .collect();
        Ok(())
    }

    fn key_of(&self, text: &str) -> Result<HashSet<u32>> {
        Ok(encode_words(&self.tokenizer, text, self.args.max_seq_length)?
            .into_iter()
            .collect())
    }

    /// Generate a response for a single input.
    fn respond(&self, input: &str) -> Result<String> {
        let query = self.key_of(input)?;
        if query.is_empty() {
            return Ok(String::new());
        }

        let mut best: Option<(f64, f64, usize)> = None;
        for (idx, key) in self.keys.iter().enumerate() {
            let shared = query.intersection(key).count();
            if shared == 0 {
                continue;
            }
            let overlap  = shared as f64 / query.union(key).count() as f64;
            let char_sim = similarity(input, &self.entries[idx].question);
            let is_better = match best {
                None            => true,
                Some((o, c, _)) => overlap > o || (overlap == o && char_sim > c),
            };
            if is_better {
                best = Some((overlap, char_sim, idx));
            }
        }

        Ok(best
            .map(|(_, _, idx)| self.truncate_output(&self.entries[idx].answer))
            .unwrap_or_default())
    }

    /// Re-join on single spaces and keep at most `max_length` words.
    fn truncate_output(&self, answer: &str) -> String {
        answer
            .split_whitespace()
            .take(self.args.max_length)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Seq2SeqModel for MemorySeq2Seq {
    fn train(
        &mut self,
        train:  &DialogueDataset,
        eval:   Option<&DialogueDataset>,
        metric: &dyn Metric,
    ) -> Result<TrainSummary> {
        run_training(self, train, eval, metric)
    }

    fn evaluate(&self, data: &DialogueDataset, metric: &dyn Metric) -> Result<EvalReport> {
        let targets     = data.targets();
        let predictions = self.predict(&data.inputs())?;

        let eval_loss = 1.0 - batch_match(&targets, &predictions)?;
        let score     = if self.args.evaluate_generated_text {
            Some(MetricScore {
                name:  metric.name().to_string(),
                value: metric.score(&targets, &predictions)?,
            })
        } else {
            None
        };

        Ok(EvalReport { eval_loss, metric: score })
    }

    fn predict(&self, inputs: &[String]) -> Result<Vec<String>> {
        inputs.iter().map(|input| self.respond(input)).collect()
    }
}

impl Persistable for MemorySeq2Seq {
    fn save(&self, dir: &Path) -> Result<()> {
        let ckpt = CheckpointManager::new(dir);
        ckpt.save_args(&self.args)?;
        ckpt.save_memory(&self.entries)?;
        TokenizerStore::new(dir).save(&self.tokenizer)?;

        tracing::debug!("Saved model with {} entries to '{}'", self.entries.len(), dir.display());
        Ok(())
    }

    fn load(dir: &Path) -> Result<Self> {
        let ckpt      = CheckpointManager::new(dir);
        let args      = ckpt.load_args()?;
        let entries   = ckpt.load_memory()?;
        let tokenizer = TokenizerStore::new(dir).load()?;

        let mut model = Self { args, tokenizer, entries, keys: Vec::new(), known: HashSet::new() };
        model.rebuild_index()?;

        tracing::info!("Loaded model with {} memorised pairs from '{}'", model.entries.len(), dir.display());
        Ok(model)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::scoring::CharOverlapMatch;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn batch(pairs: &[(&str, &str)]) -> DialogueBatch {
        DialogueBatch {
            inputs:  pairs.iter().map(|p| p.0.to_string()).collect(),
            targets: pairs.iter().map(|p| p.1.to_string()).collect(),
        }
    }

    fn empty_model(args: ModelArgs) -> MemorySeq2Seq {
        MemorySeq2Seq::from_parts(args, Vec::new(), &[]).unwrap()
    }

    fn trained(pairs: &[(&str, &str)]) -> MemorySeq2Seq {
        let b         = batch(pairs);
        let mut model = empty_model(ModelArgs::default());
        model.extend_vocab(&b.inputs).unwrap();
        model.fit_batch(&b).unwrap();
        model
    }

    #[test]
    fn test_empty_model_predicts_empty() {
        let model = empty_model(ModelArgs::default());
        assert_eq!(model.predict(&strings(&["hello"])).unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_first_batch_loss_is_one() {
        let b         = batch(&[("hello", "hi there")]);
        let mut model = empty_model(ModelArgs::default());
        model.extend_vocab(&b.inputs).unwrap();

        assert_eq!(model.fit_batch(&b).unwrap(), 1.0);
        assert_eq!(model.fit_batch(&b).unwrap(), 0.0);
    }

    #[test]
    fn test_reproduces_training_answers() {
        let model = trained(&[
            ("how are you", "fine thanks"),
            ("what is your name", "call me bart"),
        ]);
        let preds = model.predict(&strings(&["what is your name", "how are you"])).unwrap();
        assert_eq!(preds, strings(&["call me bart", "fine thanks"]));
    }

    #[test]
    fn test_nearest_question_wins() {
        let model = trained(&[
            ("where do you live", "in paris"),
            ("what do you eat", "bread"),
        ]);
        let preds = model.predict(&strings(&["Where do you LIVE now?"])).unwrap();
        assert_eq!(preds, strings(&["in paris"]));
    }

    #[test]
    fn test_duplicate_rows_memorised_once() {
        let mut model = trained(&[("hello", "hi")]);
        model.fit_batch(&batch(&[("hello", "hi")])).unwrap();
        assert_eq!(model.memory().len(), 1);
    }

    #[test]
    fn test_loaded_model_skips_known_rows() {
        let dir = tempfile::tempdir().unwrap();
        trained(&[("hello", "hi"), ("bye", "goodbye")]).save(dir.path()).unwrap();

        let mut model = MemorySeq2Seq::load(dir.path()).unwrap();
        model.fit_batch(&batch(&[("bye", "goodbye"), ("bye", "see you")])).unwrap();
        assert_eq!(model.memory().len(), 3);
    }

    #[test]
    fn test_non_latin_questions_are_recognised() {
        let model = trained(&[
            ("नमस्ते", "hello back"),
            ("x²", "square"),
            ("こんにちは", "good afternoon"),
        ]);
        let preds = model.predict(&strings(&["नमस्ते", "x²", "こんにちは"])).unwrap();
        assert_eq!(preds, strings(&["hello back", "square", "good afternoon"]));
    }

    #[test]
    fn test_output_truncated_to_max_length() {
        let b         = batch(&[("tell me a story", "once upon a time there was")]);
        let args      = ModelArgs { max_length: 3, ..Default::default() };
        let mut model = empty_model(args);
        model.extend_vocab(&b.inputs).unwrap();
        model.fit_batch(&b).unwrap();

        let preds = model.predict(&strings(&["tell me a story"])).unwrap();
        assert_eq!(preds, strings(&["once upon a"]));
    }

    #[test]
    fn test_evaluate_reports_matches() {
        let model = trained(&[("hello", "hi there"), ("bye", "goodbye")]);
        let data  = DialogueDataset::from_pairs(vec![
            ("hello", "hi there").into(),
            ("bye", "goodbye").into(),
        ]);

        let report = model.evaluate(&data, &CharOverlapMatch).unwrap();
        assert_eq!(report.eval_loss, 0.0);
        assert_eq!(report.metric_value(), Some(1.0));
    }

    #[test]
    fn test_evaluate_without_generated_text_metric() {
        let args  = ModelArgs { evaluate_generated_text: false, ..Default::default() };
        let model = empty_model(args);
        let data  = DialogueDataset::from_pairs(vec![("hello", "hi").into()]);

        let report = model.evaluate(&data, &CharOverlapMatch).unwrap();
        assert_eq!(report.eval_loss, 1.0);
        assert_eq!(report.metric, None);
    }

    #[test]
    fn test_evaluate_empty_dataset_fails() {
        let model = empty_model(ModelArgs::default());
        let data  = DialogueDataset::new(Vec::new());
        assert!(model.evaluate(&data, &CharOverlapMatch).is_err());
    }

    #[test]
    fn test_save_and_load_predict_the_same() {
        let dir   = tempfile::tempdir().unwrap();
        let model = trained(&[("hello", "hi there"), ("bye", "goodbye")]);
        model.save(dir.path()).unwrap();

        let loaded = MemorySeq2Seq::load(dir.path()).unwrap();
        let inputs = strings(&["hello", "bye", "unknown"]);
        assert_eq!(loaded.predict(&inputs).unwrap(), model.predict(&inputs).unwrap());
        assert_eq!(loaded.args(), model.args());
    }

    #[test]
    fn test_warm_start_from_saved_model() {
        let dir = tempfile::tempdir().unwrap();
        trained(&[("hello", "hi there")]).save(dir.path()).unwrap();

        let args  = ModelArgs {
            model_name: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };
        let model = MemorySeq2Seq::new(args).unwrap();
        assert_eq!(model.memory().len(), 1);
        assert_eq!(model.predict(&strings(&["hello"])).unwrap(), strings(&["hi there"]));
    }

    #[test]
    fn test_unknown_base_model_starts_empty() {
        let model = MemorySeq2Seq::new(ModelArgs::default()).unwrap();
        assert!(model.memory().is_empty());
    }
}

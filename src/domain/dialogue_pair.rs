// ============================================================
// Layer 3 — DialoguePair Domain Type
// ============================================================
// One conversational turn taken from a transcript:
//
//   Q: hello          → question = "hello"
//   A: hi there       → answer   = "hi there"
//
// The question becomes the model input and the answer becomes
// the generation target.

use serde::{Deserialize, Serialize};

use crate::data::dataset::DialogueItem;

/// A question paired with the answer that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialoguePair {
    pub question: String,
    pub answer:   String,
}

impl DialoguePair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer:   answer.into(),
        }
    }

    /// Convert into a dataset row: question → input_text, answer → target_text
    pub fn into_item(self) -> DialogueItem {
        DialogueItem {
            input_text:  self.question,
            target_text: self.answer,
        }
    }
}

impl From<(&str, &str)> for DialoguePair {
    fn from((question, answer): (&str, &str)) -> Self {
        Self::new(question, answer)
    }
}

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::dialogue_pair::DialoguePair;

/// One row of the seq2seq table: the model reads `input_text`
/// and learns to generate `target_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueItem {
    pub input_text:  String,
    pub target_text: String,
}

pub struct DialogueDataset {
    items: Vec<DialogueItem>,
}

impl DialogueDataset {
    pub fn new(items: Vec<DialogueItem>) -> Self { Self { items } }

    pub fn from_pairs(pairs: Vec<DialoguePair>) -> Self {
        Self::new(pairs.into_iter().map(DialoguePair::into_item).collect())
    }

    /// A new dataset holding the first `n` rows (or all of them if fewer).
    pub fn head(&self, n: usize) -> Self {
        Self::new(self.items.iter().take(n).cloned().collect())
    }

    pub fn inputs(&self) -> Vec<String> {
        self.items.iter().map(|i| i.input_text.clone()).collect()
    }

    pub fn targets(&self) -> Vec<String> {
        self.items.iter().map(|i| i.target_text.clone()).collect()
    }
}

impl Dataset<DialogueItem> for DialogueDataset {
    fn get(&self, index: usize) -> Option<DialogueItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DialogueDataset {
        DialogueDataset::from_pairs(vec![
            DialoguePair::new("hello", "hi there"),
            DialoguePair::new("bye", "goodbye"),
            DialoguePair::new("how are you", "fine"),
        ])
    }

    #[test]
    fn test_columns() {
        let ds = sample();
        assert_eq!(ds.inputs(),  vec!["hello", "bye", "how are you"]);
        assert_eq!(ds.targets(), vec!["hi there", "goodbye", "fine"]);
    }

    #[test]
    fn test_head_truncates() {
        let ds = sample();
        assert_eq!(ds.head(2).len(), 2);
        assert_eq!(ds.head(10).len(), 3);
        assert!(ds.head(0).is_empty());
    }

    #[test]
    fn test_dataset_get() {
        let ds = sample();
        assert_eq!(ds.get(1).map(|i| i.target_text), Some("goodbye".to_string()));
        assert!(ds.get(3).is_none());
    }
}

// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Builds, saves and loads the word-level tokenizer of a model
// directory.
//
// The vocabulary is built by running the tokenizer's own
// normaliser and pre-tokeniser over the training questions, so a
// question always encodes to known ids. Pieces never seen in
// training encode as [UNK]. The tokenizer JSON is in HuggingFace
// format and goes through `tokenizers`.

use anyhow::{Context, Result};
use std::{collections::HashMap, path::PathBuf, str::FromStr};
use tokenizers::{
    NormalizedString, Normalizer, OffsetReferential, OffsetType, PreTokenizedString,
    PreTokenizer, Tokenizer,
};

pub const PAD_ID: u32 = 0;
pub const UNK_ID: u32 = 1;

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the tokenizer saved in this directory.
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        Tokenizer::from_file(&path).map_err(|e| {
            anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })
    }

    pub fn save(&self, tokenizer: &Tokenizer) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create directory '{}'", self.dir.display()))?;

        let path = self.dir.join(TOKENIZER_FILE);
        tokenizer
            .save(&path, true)
            .map_err(|e| anyhow::anyhow!("Cannot write tokenizer '{}': {}", path.display(), e))
    }
}

/// Build a word-level tokenizer whose vocabulary covers `texts`.
///
/// Ids 0 and 1 are reserved for [PAD] and [UNK]; pieces follow in order of
/// descending frequency, ties broken alphabetically so the same corpus
/// always yields the same ids.
pub fn build_word_level<S: AsRef<str>>(texts: &[S]) -> Result<Tokenizer> {
    let mut vocab = serde_json::json!({
        "[PAD]": PAD_ID,
        "[UNK]": UNK_ID
    });

    // ── Step 1: Count pieces as the pipeline splits them ─────────────────────
    let splitter = assemble(vocab.clone())?;
    let mut freq: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for piece in split_pieces(&splitter, text.as_ref())? {
            *freq.entry(piece).or_insert(0) += 1;
        }
    }

    let mut pieces: Vec<(String, usize)> = freq.into_iter().collect();
    pieces.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    // ── Step 2: Assign ids ───────────────────────────────────────────────────
    let mut next_id = UNK_ID + 1;
    for (piece, _) in &pieces {
        if vocab.get(piece).is_none() {
            vocab[piece] = serde_json::json!(next_id);
            next_id += 1;
        }
    }

    tracing::debug!("Built word-level tokenizer with {} entries", next_id);
    assemble(vocab)
}

/// Assemble a HuggingFace tokenizer JSON around `vocab` and load it.
fn assemble(vocab: serde_json::Value) -> Result<Tokenizer> {
    let tokenizer_json = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [
            {"id": PAD_ID, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
            {"id": UNK_ID, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
        ],
        "normalizer": {
            "type": "BertNormalizer",
            "clean_text": true,
            "handle_chinese_chars": false,
            "strip_accents": false,
            "lowercase": true
        },
        "pre_tokenizer": {
            "type": "Whitespace"
        },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });

    Tokenizer::from_str(&tokenizer_json.to_string())
        .map_err(|e| anyhow::anyhow!("Cannot build tokenizer: {e}"))
}

/// Normalise and pre-tokenise `text` with `tokenizer`'s own pipeline.
fn split_pieces(tokenizer: &Tokenizer, text: &str) -> Result<Vec<String>> {
    let mut normalized = NormalizedString::from(text);
    if let Some(normalizer) = tokenizer.get_normalizer() {
        normalizer
            .normalize(&mut normalized)
            .map_err(|e| anyhow::anyhow!("Normalisation error: {e}"))?;
    }

    let mut pre_tokenized = PreTokenizedString::from(normalized);
    if let Some(pre_tokenizer) = tokenizer.get_pre_tokenizer() {
        pre_tokenizer
            .pre_tokenize(&mut pre_tokenized)
            .map_err(|e| anyhow::anyhow!("Pre-tokenisation error: {e}"))?;
    }

    Ok(pre_tokenized
        .get_splits(OffsetReferential::Normalized, OffsetType::Byte)
        .into_iter()
        .map(|(piece, _, _)| piece.to_string())
        .collect())
}

/// Token ids of `text`, without [PAD]/[UNK], truncated to `max_tokens`.
pub fn encode_words(tokenizer: &Tokenizer, text: &str, max_tokens: usize) -> Result<Vec<u32>> {
    let enc = tokenizer
        .encode(text, false)
        .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

    Ok(enc
        .get_ids()
        .iter()
        .take(max_tokens)
        .copied()
        .filter(|&id| id != PAD_ID && id != UNK_ID)
        .collect())
}

// ============================================================
// Layer 4 — Transcript Loader
// ============================================================
// Reads a line-oriented dialogue transcript and extracts
// (question, answer) pairs.
//
// Transcript format:
//
//   =                     ← conversation separator
//   Q: hello              ← question
//   A: hi there           ← answer, pairs with the pending question
//   =
//   Q: bye
//   A: goodbye
//
// Lines may end in "\n", "\r\n" or a lone "\r". Every line is
// trimmed before it is classified. Lines with
// any other prefix are ignored, so malformed input is skipped
// rather than rejected.

use std::{fs, path::PathBuf};

use anyhow::Result;

use crate::data::error::TranscriptError;
use crate::domain::dialogue_pair::DialoguePair;
use crate::domain::traits::PairSource;

const SEPARATOR:       &str = "=";
const QUESTION_PREFIX: &str = "Q: ";
const ANSWER_PREFIX:   &str = "A: ";

/// Loads dialogue pairs from a transcript file.
/// Implements the PairSource trait from Layer 3.
pub struct TranscriptLoader {
    path: PathBuf,
}

impl TranscriptLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the file and decode it as UTF-8, keeping the two failure
    /// modes apart.
    fn read_text(&self) -> Result<String, TranscriptError> {
        let bytes = fs::read(&self.path).map_err(|source| TranscriptError::Read {
            path: self.path.clone(),
            source,
        })?;

        String::from_utf8(bytes).map_err(|source| TranscriptError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}

impl PairSource for TranscriptLoader {
    fn load_pairs(&self) -> Result<Vec<DialoguePair>> {
        let text  = self.read_text()?;
        let pairs = parse_transcript(&text);

        tracing::info!(
            "Parsed {} dialogue pairs from '{}'",
            pairs.len(),
            self.path.display()
        );
        Ok(pairs)
    }
}

/// Run the transcript state machine over `text`.
///
/// Two slots are tracked: the pending question and the pending answer.
/// A pair is emitted when an answer line arrives while a question is
/// pending; both slots are cleared afterwards. A separator clears both.
///
/// A second `Q:` line before any answer replaces the pending question.
/// The replaced question is dropped (with a warning) so that existing
/// transcripts parse exactly as they always have.
pub fn parse_transcript(text: &str) -> Vec<DialoguePair> {
    let mut pairs            = Vec::new();
    let mut pending_question = String::new();
    let mut pending_answer   = String::new();

    for (line_no, raw) in split_lines(text).enumerate() {
        let line = raw.trim();

        if line.starts_with(SEPARATOR) {
            pending_question.clear();
            pending_answer.clear();
            continue;
        }

        if let Some(question) = line.strip_prefix(QUESTION_PREFIX) {
            if !pending_question.is_empty() {
                tracing::warn!(
                    "Line {}: question {:?} has no answer and is replaced",
                    line_no + 1,
                    pending_question
                );
            }
            pending_question = question.to_string();
        }

        if let Some(answer) = line.strip_prefix(ANSWER_PREFIX) {
            pending_answer = answer.to_string();

            if !pending_question.is_empty() && !pending_answer.is_empty() {
                pairs.push(DialoguePair::new(
                    std::mem::take(&mut pending_question),
                    std::mem::take(&mut pending_answer),
                ));
            }
        }
    }

    pairs
}

/// Split on "\r\n", "\n" and lone "\r" line breaks.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\n', '\r']))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pair(q: &str, a: &str) -> DialoguePair {
        DialoguePair::new(q, a)
    }

    #[test]
    fn test_end_to_end_transcript() {
        let text = "=\nQ: hello\nA: hi there\n=\nQ: bye\nA: goodbye\n";
        assert_eq!(
            parse_transcript(text),
            vec![pair("hello", "hi there"), pair("bye", "goodbye")]
        );
    }

    #[test]
    fn test_adjacent_pairs_in_file_order() {
        let text = "Q: one\nA: 1\nQ: two\nA: 2\nQ: three\nA: 3";
        let pairs = parse_transcript(text);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], pair("one", "1"));
        assert_eq!(pairs[2], pair("three", "3"));
    }

    #[test]
    fn test_separator_resets_pending_question() {
        // The answer after the separator must not pair with "lost"
        let text = "Q: lost\n=\nA: orphan\nQ: kept\nA: found";
        assert_eq!(parse_transcript(text), vec![pair("kept", "found")]);
    }

    #[test]
    fn test_separator_with_trailing_text() {
        let text = "Q: before\n===== chapter 2 =====\nA: after";
        assert!(parse_transcript(text).is_empty());
    }

    #[test]
    fn test_consecutive_questions_keep_the_last() {
        let text = "Q: first\nQ: second\nA: answer";
        assert_eq!(parse_transcript(text), vec![pair("second", "answer")]);
    }

    #[test]
    fn test_answer_without_question_is_skipped() {
        let text = "A: nobody asked\nQ: asked\nA: answered";
        assert_eq!(parse_transcript(text), vec![pair("asked", "answered")]);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let text = "   Q: padded question   \n\tA: padded answer\t\r\n";
        assert_eq!(
            parse_transcript(text),
            vec![pair("padded question", "padded answer")]
        );
    }

    #[test]
    fn test_unrecognised_lines_ignored() {
        let text = "# comment\nQ:no space\nQ: real\nnoise\nA: reply\nB: other";
        assert_eq!(parse_transcript(text), vec![pair("real", "reply")]);
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let expected = vec![pair("hello", "hi there"), pair("bye", "goodbye")];
        assert_eq!(parse_transcript("=\rQ: hello\rA: hi there\r=\rQ: bye\rA: goodbye\r"), expected);
        assert_eq!(parse_transcript("=\r\nQ: hello\r\nA: hi there\r\n=\nQ: bye\rA: goodbye"), expected);
    }

    #[test]
    fn test_carriage_return_separator_resets() {
        assert!(parse_transcript("Q: lost\r=\rA: orphan\r").is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_transcript("").is_empty());
    }

    #[test]
    fn test_loader_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "=\nQ: hello\nA: hi there").unwrap();

        let pairs = TranscriptLoader::new(file.path()).load_pairs().unwrap();
        assert_eq!(pairs, vec![pair("hello", "hi there")]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = TranscriptLoader::new(&path).load_pairs().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TranscriptError>(),
            Some(TranscriptError::Read { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'Q', b':', b' ', 0xff, 0xfe, b'\n']).unwrap();

        let err = TranscriptLoader::new(file.path()).load_pairs().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TranscriptError>(),
            Some(TranscriptError::Decode { .. })
        ));
    }
}

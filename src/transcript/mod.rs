//! Meeting transcript model
//!
//! Handles validation of untrusted transcript payloads and flattening them
//! into prompt text.

mod validate;

pub use validate::TranscriptError;

use serde::Serialize;

/// A single spoken contribution in a meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utterance {
    /// Who spoke
    pub speaker: String,

    /// What was said
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Chronologically ordered utterances of one meeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new(utterances: Vec<Utterance>) -> Self {
        Self { utterances }
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    /// Join the spoken text of every utterance with single spaces.
    ///
    /// Speaker labels are dropped: only what was said reaches the model.
    pub fn flatten_text(&self) -> String {
        self.utterances
            .iter()
            .map(|u| u.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_joins_text_and_drops_speakers() {
        let transcript = Transcript::new(vec![
            Utterance::new("Alice", "We should ship Friday."),
            Utterance::new("Bob", "I disagree, too risky."),
        ]);

        let flat = transcript.flatten_text();
        assert_eq!(flat, "We should ship Friday. I disagree, too risky.");
        assert!(!flat.contains("Alice"));
        assert!(!flat.contains("Bob"));
    }

    #[test]
    fn flatten_empty_transcript_is_empty() {
        assert_eq!(Transcript::default().flatten_text(), "");
    }
}

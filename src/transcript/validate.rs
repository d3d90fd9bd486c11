//! Transcript validation for untrusted request payloads

use serde_json::Value;
use thiserror::Error;

use super::{Transcript, Utterance};

/// Why a submitted transcript was rejected.
///
/// Every variant is an invalid-transcript error; the message is shown to
/// the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Missing meeting transcript")]
    Missing,

    #[error("Meeting transcript must be a list")]
    NotAList,

    #[error("Each transcript entry must be a list with [speaker, text] (entry {index})")]
    WrongArity { index: usize },

    #[error("Speaker and text must be strings (entry {index})")]
    NonStringField { index: usize },
}

impl Transcript {
    /// Build a transcript from a decoded JSON value.
    ///
    /// `None` means the field was absent from the request. The whole
    /// transcript is rejected on the first bad entry.
    pub fn from_value(value: Option<&Value>) -> Result<Self, TranscriptError> {
        let entries = match value {
            None => return Err(TranscriptError::Missing),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(TranscriptError::NotAList),
        };

        let mut utterances = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let pair = match entry {
                Value::Array(pair) if pair.len() == 2 => pair,
                _ => return Err(TranscriptError::WrongArity { index }),
            };

            match (&pair[0], &pair[1]) {
                (Value::String(speaker), Value::String(text)) => {
                    utterances.push(Utterance::new(speaker.as_str(), text.as_str()));
                }
                _ => return Err(TranscriptError::NonStringField { index }),
            }
        }

        Ok(Transcript::new(utterances))
    }
}

//! Error types for practice-engine.

use thiserror::Error;

use crate::types::{Language, Person, Tense};

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors returned by the engine.
///
/// Degenerate inputs (an empty catalog, a sentence with no known words) are
/// not errors; they produce empty results.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("invalid mastery state: {correct_attempts} correct out of {attempts} attempts")]
    InvalidMasteryState { attempts: u32, correct_attempts: u32 },

    #[error("unsupported combination: {verb} has no {tense} form for {person}")]
    UnsupportedCombination {
        verb: String,
        tense: Tense,
        person: Person,
    },

    #[error("invalid vocabulary item {id}: {reason}")]
    InvalidItem { id: String, reason: String },

    #[error("duplicate surface form {form:?} ({language}) in items {existing} and {duplicate}")]
    DuplicateSurfaceForm {
        form: String,
        language: Language,
        existing: String,
        duplicate: String,
    },

    #[error("duplicate verb {infinitive:?} ({language})")]
    DuplicateVerb {
        infinitive: String,
        language: Language,
    },

    #[error("sentence too short for a gap: {tokens} tokens")]
    SentenceTooShort { tokens: usize },

    #[error("unknown vocabulary item {id} ({language})")]
    UnknownItem { id: String, language: Language },

    #[error("challenge {id} is not a free-text challenge")]
    NotFreeText { id: String },
}

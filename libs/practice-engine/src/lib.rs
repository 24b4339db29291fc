//! Adaptive language-practice engine.
//!
//! Provides:
//! - Lexical matching of learner text against a vocabulary catalog, with
//!   multi-word expressions preferred over their component words and
//!   inflected words credited to their base form
//! - Mastery tracking from graded attempts
//! - Review scheduling by staleness, weakness and difficulty fit
//! - Conjugation, sentence-gap and free-text challenge generation
//! - XP and gem rewards
//!
//! Everything is synchronous and free of I/O. Callers load state, pass it
//! in, and persist what comes back.

pub mod catalog;
pub mod challenge;
pub mod config;
pub mod error;
pub mod lexical;
pub mod mastery;
pub mod matching;
pub mod reward;
pub mod scheduler;
pub mod session;
pub mod types;

pub use catalog::Catalog;
pub use challenge::{
    Challenge, ChallengeConfig, ChallengeGenerator, ChallengeKind, ChallengeTarget,
    ConjugationTable, Grading, VerbEntry,
};
pub use config::{EngineConfig, EngineOverrides};
pub use error::{EngineError, Result};
pub use lexical::{
    grade_sentence, match_vocabulary, match_with_lemmas, LemmaIndex, LexicalMatch, MatchKind,
    SentenceGrade, VocabularyMatch,
};
pub use mastery::{mastery_level_for, record_attempt, MasteryThresholds};
pub use matching::{grade_answer, GradingConfig, MatchResult, MatchingMode};
pub use reward::{compute_reward, RewardConfig, RewardContext};
pub use scheduler::{select_next_batch, SchedulerConfig};
pub use session::{AttemptOutcome, PracticeSession};
pub use types::{
    AttemptRecord, Difficulty, GemRarity, GrammarChallengeSpec, ItemId, Language, MasteryLevel,
    MasteryState, Person, RewardOutcome, Tense, VerbClass, VocabularyItem,
};

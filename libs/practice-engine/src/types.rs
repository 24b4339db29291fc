//! Core types for the practice engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Target language of a vocabulary item or verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Es,
    Fr,
    De,
}

impl Language {
    /// Get the ISO 639-1 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// Parse from an ISO code or an English language name.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "es" | "spanish" => Some(Self::Es),
            "fr" | "french" => Some(Self::Fr),
            "de" | "german" => Some(Self::De),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty tier of an item or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

impl Difficulty {
    fn ordinal(self) -> u8 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Advanced => 2,
        }
    }

    /// Number of tiers between two difficulties.
    pub fn distance(self, other: Difficulty) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Opaque identifier of a practice target, stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A learnable unit of meaning, possibly spanning several words.
///
/// Construct through [`VocabularyItem::new`] so surface forms are normalized
/// and `token_count` agrees with the canonical form. Deserialization goes
/// through the same validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVocabularyItem")]
pub struct VocabularyItem {
    pub id: ItemId,
    /// Accepted forms, canonical form first. Lower-case, single-spaced.
    pub surface_forms: Vec<String>,
    pub token_count: usize,
    pub language: Language,
    pub difficulty: Difficulty,
}

impl VocabularyItem {
    /// Validate and normalize a catalog entry.
    pub fn new<I, S>(
        id: impl Into<ItemId>,
        surface_forms: I,
        language: Language,
        difficulty: Difficulty,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = id.into();
        let mut forms: Vec<String> = Vec::new();
        for form in surface_forms {
            let normalized = normalize_form(form.as_ref());
            if normalized.is_empty() {
                return Err(EngineError::InvalidItem {
                    id: id.to_string(),
                    reason: "empty surface form".to_string(),
                });
            }
            if !forms.contains(&normalized) {
                forms.push(normalized);
            }
        }

        let token_count = match forms.first() {
            Some(canonical) => canonical.split(' ').count(),
            None => {
                return Err(EngineError::InvalidItem {
                    id: id.to_string(),
                    reason: "no surface forms".to_string(),
                })
            }
        };

        Ok(Self {
            id,
            surface_forms: forms,
            token_count,
            language,
            difficulty,
        })
    }

    /// Canonical (first) surface form. Empty only for an item built by hand
    /// without forms, which the catalog rejects.
    pub fn canonical(&self) -> &str {
        self.surface_forms.first().map_or("", String::as_str)
    }

    /// Whether this item is a multi-word expression.
    pub fn is_mwe(&self) -> bool {
        self.token_count > 1
    }
}

/// Wire shape of a catalog entry before validation. `token_count` is
/// recomputed, so any value sent for it is ignored.
#[derive(Deserialize)]
struct RawVocabularyItem {
    id: ItemId,
    surface_forms: Vec<String>,
    language: Language,
    #[serde(default)]
    difficulty: Difficulty,
}

impl TryFrom<RawVocabularyItem> for VocabularyItem {
    type Error = EngineError;

    fn try_from(raw: RawVocabularyItem) -> Result<Self> {
        Self::new(raw.id, raw.surface_forms, raw.language, raw.difficulty)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Lower-case and collapse whitespace.
pub(crate) fn normalize_form(s: &str) -> String {
    s.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Grammatical tense of a conjugation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Present,
    Preterite,
    Future,
}

impl Tense {
    pub const ALL: [Tense; 3] = [Self::Present, Self::Preterite, Self::Future];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Preterite => "preterite",
            Self::Future => "future",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammatical person, in paradigm order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    FirstSingular,
    SecondSingular,
    ThirdSingular,
    FirstPlural,
    SecondPlural,
    ThirdPlural,
}

impl Person {
    pub const ALL: [Person; 6] = [
        Self::FirstSingular,
        Self::SecondSingular,
        Self::ThirdSingular,
        Self::FirstPlural,
        Self::SecondPlural,
        Self::ThirdPlural,
    ];

    /// Position in a six-slot paradigm (0-5).
    pub fn index(self) -> usize {
        match self {
            Self::FirstSingular => 0,
            Self::SecondSingular => 1,
            Self::ThirdSingular => 2,
            Self::FirstPlural => 3,
            Self::SecondPlural => 4,
            Self::ThirdPlural => 5,
        }
    }

    pub fn is_plural(self) -> bool {
        self.index() >= 3
    }

    /// Subject pronoun shown in prompts.
    pub fn pronoun(self, language: Language) -> &'static str {
        let pronouns: [&'static str; 6] = match language {
            Language::Es => ["yo", "tú", "él/ella", "nosotros", "vosotros", "ellos/ellas"],
            Language::Fr => ["je", "tu", "il/elle", "nous", "vous", "ils/elles"],
            Language::De => ["ich", "du", "er/sie", "wir", "ihr", "sie"],
        };
        pronouns[self.index()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSingular => "first_singular",
            Self::SecondSingular => "second_singular",
            Self::ThirdSingular => "third_singular",
            Self::FirstPlural => "first_plural",
            Self::SecondPlural => "second_plural",
            Self::ThirdPlural => "third_plural",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regularity class of a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbClass {
    Regular,
    Irregular,
    StemChanging,
}

impl Default for VerbClass {
    fn default() -> Self {
        Self::Regular
    }
}

/// A conjugation practice target: one verb in one tense and person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammarChallengeSpec {
    pub verb: String,
    pub language: Language,
    pub tense: Tense,
    pub person: Person,
}

impl GrammarChallengeSpec {
    /// Stable target id used for mastery tracking, e.g. `es:hablar:present:first_singular`.
    pub fn target_id(&self) -> ItemId {
        ItemId(format!(
            "{}:{}:{}:{}",
            self.language, self.verb, self.tense, self.person
        ))
    }
}

/// One graded answer. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub target_id: ItemId,
    pub student_answer: String,
    pub is_correct: bool,
    pub response_time_ms: u64,
    pub hint_used: bool,
    pub timestamp: DateTime<Utc>,
}

/// Discrete mastery summary (0-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    Unknown,
    Seen,
    Recognized,
    Practiced,
    Mastered,
    Expert,
}

impl Default for MasteryLevel {
    fn default() -> Self {
        Self::Unknown
    }
}

impl MasteryLevel {
    /// Convert to numeric value (0-5).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Seen => 1,
            Self::Recognized => 2,
            Self::Practiced => 3,
            Self::Mastered => 4,
            Self::Expert => 5,
        }
    }

    /// Create from numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Seen),
            2 => Some(Self::Recognized),
            3 => Some(Self::Practiced),
            4 => Some(Self::Mastered),
            5 => Some(Self::Expert),
            _ => None,
        }
    }
}

/// Per-learner, per-target practice history.
///
/// `mastery_level` is a cache derived from the counters; see
/// [`crate::mastery::mastery_level_for`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MasteryState {
    pub attempts: u32,
    pub correct_attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub mastery_level: MasteryLevel,
}

impl MasteryState {
    /// Fraction of correct attempts, 0.0 when never attempted.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        (self.correct_attempts as f64 / self.attempts as f64).min(1.0)
    }

    /// Check the counter invariant `attempts >= correct_attempts`.
    pub fn validate(&self) -> Result<()> {
        if self.correct_attempts > self.attempts {
            return Err(EngineError::InvalidMasteryState {
                attempts: self.attempts,
                correct_attempts: self.correct_attempts,
            });
        }
        Ok(())
    }
}

/// Reward tier, ordered from least to most valuable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GemRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Reward for one attempt. `gem_rarity` is `None` when no gem is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardOutcome {
    pub gem_rarity: Option<GemRarity>,
    pub xp_awarded: u32,
}

impl RewardOutcome {
    /// The zero-reward outcome for incorrect answers.
    pub fn none() -> Self {
        Self::default()
    }
}

//! Challenge generation.
//!
//! A [`ChallengeGenerator`] turns a [`ChallengeTarget`] into a presentable
//! [`Challenge`]. All randomness comes from the caller's RNG, so the same
//! seed always yields the same challenge, id included.

mod conjugation;
mod free_text;
mod sentence_gap;
pub mod tables;

pub use conjugation::{
    complexity_score, conjugate, difficulty_for_class, verb_ending, ConjugationChallenge,
    ConjugationTable, VerbEntry, VerbForm,
};
pub use free_text::FreeTextChallenge;
pub use sentence_gap::{filler_words, gap_count, Gap, SentenceGapChallenge, GAP_MARKER};

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::lexical::{clean_token, grade_sentence, SentenceGrade};
use crate::matching::{grade_answer, GradingConfig, MatchResult};
use crate::types::{Difficulty, GrammarChallengeSpec, ItemId, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Upper bound on distractors per gap.
    pub max_distractors: usize,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self { max_distractors: 3 }
    }
}

/// What to build a challenge for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChallengeTarget {
    Conjugation(GrammarChallengeSpec),
    SentenceGap { sentence: String, language: Language },
    /// Open writing that should use the listed catalog items.
    FreeText { targets: Vec<ItemId>, language: Language },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChallengeKind {
    Conjugation(ConjugationChallenge),
    SentenceGap(SentenceGapChallenge),
    FreeText(FreeTextChallenge),
}

/// How an answer was graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Grading {
    /// Compared against fixed accepted answers.
    Typed(MatchResult),
    /// Matched against the catalog.
    Sentence(SentenceGrade),
}

impl Grading {
    pub fn is_correct(&self) -> bool {
        match self {
            Self::Typed(result) => result.is_correct,
            Self::Sentence(grade) => grade.is_correct(),
        }
    }

    /// Whether the answer earns credit for `target_id`. A typed answer
    /// credits whichever target it was submitted for.
    pub fn credits(&self, target_id: &ItemId) -> bool {
        match self {
            Self::Typed(result) => result.is_correct,
            Self::Sentence(grade) => grade.credits(target_id),
        }
    }
}

/// A generated, presentable question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Correlates later attempts with this challenge.
    pub id: Uuid,
    pub language: Language,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub kind: ChallengeKind,
}

impl Challenge {
    /// Accepted answers. For a sentence gap, one per gap in order; for free
    /// text, the forms the answer should use.
    pub fn correct_answers(&self) -> Vec<String> {
        match &self.kind {
            ChallengeKind::Conjugation(c) => c.accepted_answers(),
            ChallengeKind::SentenceGap(g) => g.answers(),
            ChallengeKind::FreeText(f) => f.forms.clone(),
        }
    }

    /// Wrong options per gap. Empty for other challenges.
    pub fn distractors(&self) -> Vec<&[String]> {
        match &self.kind {
            ChallengeKind::SentenceGap(g) => {
                g.gaps.iter().map(|gap| gap.distractors.as_slice()).collect()
            }
            ChallengeKind::Conjugation(_) | ChallengeKind::FreeText(_) => Vec::new(),
        }
    }

    /// Target items of a free-text challenge. Empty for other challenges.
    pub fn targets(&self) -> &[ItemId] {
        match &self.kind {
            ChallengeKind::FreeText(f) => f.targets.as_slice(),
            ChallengeKind::Conjugation(_) | ChallengeKind::SentenceGap(_) => &[],
        }
    }

    /// Grade a whole answer.
    ///
    /// A sentence-gap answer is every gap word in order, separated by spaces.
    /// A free-text answer goes through the lexical matcher over `catalog`.
    pub fn grade(&self, answer: &str, catalog: &Catalog, config: &GradingConfig) -> Grading {
        match &self.kind {
            ChallengeKind::Conjugation(c) => {
                Grading::Typed(grade_answer(answer, &c.accepted_answers(), config))
            }
            ChallengeKind::SentenceGap(g) => {
                Grading::Typed(grade_answer(answer, &[g.answers().join(" ")], config))
            }
            ChallengeKind::FreeText(f) => Grading::Sentence(grade_sentence(
                answer,
                catalog,
                f.language,
                &f.targets,
                config.min_sentence_coverage,
            )),
        }
    }

    /// Grade one gap, ignoring case and edge punctuation. `None` when the
    /// challenge has no such gap.
    pub fn grade_gap(&self, index: usize, answer: &str) -> Option<bool> {
        match &self.kind {
            ChallengeKind::SentenceGap(g) => g.gaps.get(index).map(|gap| {
                let typed = clean_token(answer);
                !typed.is_empty() && typed == clean_token(&gap.answer)
            }),
            ChallengeKind::Conjugation(_) | ChallengeKind::FreeText(_) => None,
        }
    }
}

pub struct ChallengeGenerator<'a> {
    verbs: &'a ConjugationTable,
    catalog: &'a Catalog,
    config: ChallengeConfig,
}

impl<'a> ChallengeGenerator<'a> {
    pub fn new(verbs: &'a ConjugationTable, catalog: &'a Catalog, config: ChallengeConfig) -> Self {
        Self {
            verbs,
            catalog,
            config,
        }
    }

    /// Build a challenge for `target`.
    ///
    /// Without a hint, a conjugation takes its difficulty from the verb
    /// class, a sentence gap from its number of gaps and free text from its
    /// hardest target.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        target: &ChallengeTarget,
        difficulty_hint: Option<Difficulty>,
        rng: &mut R,
    ) -> Result<Challenge> {
        let (language, difficulty, prompt, kind) = match target {
            ChallengeTarget::Conjugation(spec) => {
                let (challenge, difficulty) =
                    conjugation::build(self.verbs, spec, difficulty_hint)?;
                (
                    spec.language,
                    difficulty,
                    challenge.prompt(),
                    ChallengeKind::Conjugation(challenge),
                )
            }
            ChallengeTarget::SentenceGap { sentence, language } => {
                let challenge = sentence_gap::build(
                    sentence,
                    *language,
                    self.catalog,
                    self.config.max_distractors,
                    rng,
                )?;
                let difficulty = difficulty_hint.unwrap_or(match challenge.gaps.len() {
                    0 | 1 => Difficulty::Beginner,
                    2 => Difficulty::Intermediate,
                    _ => Difficulty::Advanced,
                });
                (
                    *language,
                    difficulty,
                    challenge.prompt(),
                    ChallengeKind::SentenceGap(challenge),
                )
            }
            ChallengeTarget::FreeText { targets, language } => {
                let (challenge, derived) = free_text::build(targets, *language, self.catalog)?;
                (
                    *language,
                    difficulty_hint.unwrap_or(derived),
                    challenge.prompt(),
                    ChallengeKind::FreeText(challenge),
                )
            }
        };

        let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        tracing::debug!(
            challenge_id = %id,
            language = %language,
            difficulty = difficulty.as_str(),
            "generated challenge"
        );

        Ok(Challenge {
            id,
            language,
            difficulty,
            prompt,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::matching::MatchingMode;
    use crate::types::{Person, Tense, VocabularyItem};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spec(verb: &str, language: Language, tense: Tense, person: Person) -> GrammarChallengeSpec {
        GrammarChallengeSpec {
            verb: verb.to_string(),
            language,
            tense,
            person,
        }
    }

    #[test]
    fn conjugation_round_trip() {
        let verbs = tables::builtin_table().unwrap();
        let catalog = Catalog::default();
        let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GradingConfig {
            matching_mode: MatchingMode::Exact,
            ..Default::default()
        };

        let mut generated = 0;
        for verb in verbs.iter() {
            for tense in [Tense::Present, Tense::Preterite, Tense::Future] {
                for person in Person::ALL {
                    let spec = spec(&verb.infinitive, verb.language, tense, person);
                    let target = ChallengeTarget::Conjugation(spec);
                    let challenge = match generator.generate(&target, None, &mut rng) {
                        Ok(challenge) => challenge,
                        Err(EngineError::UnsupportedCombination { .. }) => continue,
                        Err(other) => panic!("unexpected error: {other}"),
                    };
                    let ChallengeKind::Conjugation(c) = &challenge.kind else {
                        panic!("expected a conjugation challenge");
                    };
                    assert!(!c.expected.is_empty());
                    assert_eq!(c.expected, conjugate(verb, tense, person).unwrap());
                    assert!(challenge.grade(&c.expected, &catalog, &config).is_correct());
                    generated += 1;
                }
            }
        }
        assert!(generated > 100);
    }

    #[test]
    fn defective_verb_is_refused() {
        let verbs = tables::builtin_table().unwrap();
        let catalog = Catalog::default();
        let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
        let target = ChallengeTarget::Conjugation(spec(
            "llover",
            Language::Es,
            Tense::Present,
            Person::FirstSingular,
        ));
        let result = generator.generate(&target, None, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(
            result,
            Err(EngineError::UnsupportedCombination {
                verb: "llover".to_string(),
                tense: Tense::Present,
                person: Person::FirstSingular,
            })
        );
    }

    #[test]
    fn difficulty_hint_overrides_class() {
        let verbs = tables::builtin_table().unwrap();
        let catalog = Catalog::default();
        let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
        let target = ChallengeTarget::Conjugation(spec(
            "tener",
            Language::Es,
            Tense::Present,
            Person::FirstSingular,
        ));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let derived = generator.generate(&target, None, &mut rng).unwrap();
        assert_eq!(derived.difficulty, Difficulty::Advanced);

        let hinted = generator.generate(&target, Some(Difficulty::Beginner), &mut rng).unwrap();
        assert_eq!(hinted.difficulty, Difficulty::Beginner);
        assert_eq!(hinted.prompt, "yo ___ (tener: to have, present)");
        assert_ne!(derived.id, hinted.id);
    }

    #[test]
    fn same_seed_same_challenge_id() {
        let verbs = tables::builtin_table().unwrap();
        let catalog = Catalog::default();
        let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
        let target = ChallengeTarget::Conjugation(spec(
            "hablar",
            Language::Es,
            Tense::Present,
            Person::FirstSingular,
        ));

        let a = generator.generate(&target, None, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = generator.generate(&target, None, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sentence_gap_challenge() {
        let verbs = ConjugationTable::default();
        let catalog = Catalog::from_items(vec![
            VocabularyItem::new("v1", ["perro"], Language::Es, Difficulty::Beginner).unwrap(),
            VocabularyItem::new("v2", ["gato"], Language::Es, Difficulty::Beginner).unwrap(),
        ])
        .unwrap();
        let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
        let target = ChallengeTarget::SentenceGap {
            sentence: "Quiero la pizza de hoy".to_string(),
            language: Language::Es,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let challenge = generator.generate(&target, None, &mut rng).unwrap();
        assert_eq!(challenge.prompt, "Quiero la ___ de hoy");
        assert_eq!(challenge.difficulty, Difficulty::Beginner);
        assert_eq!(challenge.correct_answers(), vec!["pizza"]);
        assert_eq!(challenge.distractors()[0].len(), 3);
        assert!(challenge.distractors()[0].iter().all(|d| d != "pizza"));

        assert_eq!(challenge.grade_gap(0, "Pizza!"), Some(true));
        assert_eq!(challenge.grade_gap(0, "pasta"), Some(false));
        assert_eq!(challenge.grade_gap(1, "pizza"), None);
        assert!(challenge.grade("pizza", &catalog, &GradingConfig::default()).is_correct());
    }

    #[test]
    fn free_text_challenge_is_graded_by_matcher() {
        let verbs = tables::builtin_table().unwrap();
        let catalog = Catalog::from_items(vec![
            VocabularyItem::new("gusta", ["gusta"], Language::Es, Difficulty::Beginner).unwrap(),
            VocabularyItem::new("me-gusta", ["me gusta"], Language::Es, Difficulty::Beginner)
                .unwrap(),
            VocabularyItem::new("preferir", ["preferir"], Language::Es, Difficulty::Intermediate)
                .unwrap(),
        ])
        .unwrap()
        .with_lemmas(verbs.lemma_index());
        let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
        let target = ChallengeTarget::FreeText {
            targets: vec![ItemId::from("gusta"), ItemId::from("preferir")],
            language: Language::Es,
        };

        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let challenge = generator.generate(&target, None, &mut rng).unwrap();
        assert_eq!(challenge.prompt, "Write a sentence using: gusta, preferir");
        assert_eq!(challenge.difficulty, Difficulty::Intermediate);
        assert_eq!(challenge.targets().len(), 2);
        assert!(challenge.distractors().is_empty());

        let config = GradingConfig::default();
        let good = challenge.grade("Prefiero el mar, pero gusta", &catalog, &config);
        assert!(good.is_correct());

        // "gusta" inside "me gusta" belongs to the expression.
        let shadowed = challenge.grade("Me gusta y prefiero", &catalog, &config);
        assert!(!shadowed.is_correct());
        assert!(shadowed.credits(&ItemId::from("preferir")));
        assert!(!shadowed.credits(&ItemId::from("gusta")));
    }

    #[test]
    fn challenge_wire_format_is_tagged() {
        let target = ChallengeTarget::SentenceGap {
            sentence: "a b c".to_string(),
            language: Language::Fr,
        };
        let json = serde_json::to_value(&target).unwrap();
        assert_eq!(json["type"], "sentence_gap");
        assert_eq!(json["language"], "fr");
    }
}

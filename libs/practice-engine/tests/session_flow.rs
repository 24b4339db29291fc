//! Practice session tests: scheduling, submitting and handing state back.

mod common;

use std::collections::HashMap;

use chrono::Duration;
use pretty_assertions::assert_eq;

use common::fixtures;
use practice_engine::challenge::tables;
use practice_engine::{
    Challenge, ChallengeConfig, ChallengeGenerator, ChallengeTarget, Difficulty, EngineConfig,
    EngineOverrides, ItemId, Language, MasteryLevel, MatchingMode, Person, PracticeSession, Tense,
};

/// A fresh learner sees every item before any repeats.
#[test]
fn test_session_round() {
    let catalog = fixtures::spanish_catalog();
    let verbs = tables::builtin_table().unwrap();
    let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
    let mut session = PracticeSession::new(EngineConfig::default(), &catalog, HashMap::new());
    let mut rng = common::rng(21);

    let first = session.next_batch(3, common::now());
    assert_eq!(first.len(), 3);

    for (i, id) in first.iter().enumerate() {
        let item = catalog.get(id).unwrap();
        let target = ChallengeTarget::SentenceGap {
            sentence: format!("Hoy veo {} en el parque", item.canonical()),
            language: Language::Es,
        };
        let challenge = generator.generate(&target, None, &mut rng).unwrap();
        let answer = challenge.correct_answers().join(" ");
        let at = common::now() + Duration::minutes(i as i64);
        let outcome = session.submit(&challenge, id, &answer, 2000, false, at).unwrap();
        assert!(outcome.attempt.is_correct);
    }

    let later = common::now() + Duration::minutes(10);
    let second = session.next_batch(3, later);
    assert!(second.iter().all(|id| !first.contains(id)));

    let states = session.into_states();
    assert_eq!(states.len(), 3);
    assert!(states.values().all(|s| s.mastery_level == MasteryLevel::Seen));
}

/// Items answered wrongly come back before items answered correctly.
#[test]
fn test_weak_items_are_rescheduled_first() {
    let catalog = fixtures::catalog(
        Language::Es,
        &[
            ("es-perro", "perro", Difficulty::Beginner),
            ("es-gato", "gato", Difficulty::Beginner),
        ],
    );
    let verbs = tables::builtin_table().unwrap();
    let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
    let mut session = PracticeSession::new(EngineConfig::default(), &catalog, HashMap::new());
    let mut rng = common::rng(5);

    for (id, sentence, answer) in [
        ("es-perro", "Mi perro duerme", "perro"),
        ("es-gato", "Mi gato duerme", "perro"),
    ] {
        let target = ChallengeTarget::SentenceGap {
            sentence: sentence.to_string(),
            language: Language::Es,
        };
        let challenge = generator.generate(&target, None, &mut rng).unwrap();
        session
            .submit(&challenge, &ItemId::from(id), answer, 1500, false, common::now())
            .unwrap();
    }

    let batch = session.next_batch(2, common::now() + Duration::hours(2));
    assert_eq!(batch, vec![ItemId::from("es-gato"), ItemId::from("es-perro")]);
}

/// Overrides change grading for one caller only.
#[test]
fn test_overrides_apply_to_session() {
    let global = EngineConfig::default();
    let overrides = EngineOverrides {
        matching_mode: Some(MatchingMode::Fuzzy),
        ..Default::default()
    };
    let verbs = tables::builtin_table().unwrap();
    let catalog = fixtures::spanish_catalog();
    let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
    let spec = fixtures::grammar_spec("preferir", Tense::Present, Person::FirstSingular);
    let challenge = generator
        .generate(&ChallengeTarget::Conjugation(spec.clone()), None, &mut common::rng(2))
        .unwrap();

    let effective = EngineConfig::merge(&global, Some(&overrides));
    let mut strict = PracticeSession::new(global.clone(), &catalog, HashMap::new());
    let mut lenient = PracticeSession::new(effective, &catalog, HashMap::new());
    let target = spec.target_id();

    assert!(accepted(&mut strict, &challenge, &target, "prefiero "));
    assert!(!accepted(&mut strict, &challenge, &target, "prefero"));
    assert!(accepted(&mut lenient, &challenge, &target, "prefero"));
}

fn accepted(
    session: &mut PracticeSession<'_>,
    challenge: &Challenge,
    target: &ItemId,
    answer: &str,
) -> bool {
    session
        .submit(challenge, target, answer, 900, false, common::now())
        .unwrap()
        .attempt
        .is_correct
}

/// Rewards follow the practised item, not the shape of the challenge.
#[test]
fn test_short_gap_for_advanced_item() {
    let catalog = fixtures::catalog(
        Language::Es,
        &[
            ("es-biblioteca", "biblioteca", Difficulty::Advanced),
            ("es-casa", "casa", Difficulty::Beginner),
        ],
    );
    let verbs = tables::builtin_table().unwrap();
    let generator = ChallengeGenerator::new(&verbs, &catalog, ChallengeConfig::default());
    let target = ChallengeTarget::SentenceGap {
        sentence: "Hoy veo biblioteca en casa".to_string(),
        language: Language::Es,
    };
    let challenge = generator.generate(&target, None, &mut common::rng(17)).unwrap();
    assert_eq!(challenge.difficulty, Difficulty::Beginner);

    let mut session = PracticeSession::new(EngineConfig::default(), &catalog, HashMap::new());
    let answer = challenge.correct_answers().join(" ");
    let outcome = session
        .submit(&challenge, &ItemId::from("es-biblioteca"), &answer, 1500, false, common::now())
        .unwrap();

    assert!(outcome.attempt.is_correct);
    assert_eq!(outcome.reward.xp_awarded, 12);
}

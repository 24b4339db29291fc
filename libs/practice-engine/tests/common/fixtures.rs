//! Test fixtures and factory functions for creating test data.

use practice_engine::{
    Catalog, Difficulty, GrammarChallengeSpec, Language, Person, Tense, VocabularyItem,
};

/// Build a single-language catalog from `(id, form, difficulty)` rows.
pub fn catalog(language: Language, rows: &[(&str, &str, Difficulty)]) -> Catalog {
    Catalog::from_items(rows.iter().map(|(id, form, difficulty)| {
        VocabularyItem::new(*id, [*form], language, *difficulty).unwrap()
    }))
    .unwrap()
}

/// A small Spanish catalog mixing single words and expressions.
pub fn spanish_catalog() -> Catalog {
    catalog(
        Language::Es,
        &[
            ("es-me-gusta", "me gusta", Difficulty::Beginner),
            ("es-la-pizza", "la pizza", Difficulty::Beginner),
            ("es-perro", "perro", Difficulty::Beginner),
            ("es-gato", "gato", Difficulty::Beginner),
            ("es-casa", "casa", Difficulty::Beginner),
            ("es-biblioteca", "biblioteca", Difficulty::Intermediate),
            ("es-hay-que", "hay que", Difficulty::Intermediate),
            ("es-sin-embargo", "sin embargo", Difficulty::Advanced),
        ],
    )
}

pub fn grammar_spec(verb: &str, tense: Tense, person: Person) -> GrammarChallengeSpec {
    GrammarChallengeSpec {
        verb: verb.to_string(),
        language: Language::Es,
        tense,
        person,
    }
}

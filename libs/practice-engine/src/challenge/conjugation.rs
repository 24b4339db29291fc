//! Verb conjugation by table lookup and regular rules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::lexical::LemmaIndex;
use crate::types::{Difficulty, GrammarChallengeSpec, Language, Person, Tense, VerbClass};

/// One explicit form of a verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbForm {
    pub tense: Tense,
    pub person: Person,
    pub form: String,
}

/// A verb as delivered by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbEntry {
    pub infinitive: String,
    pub language: Language,
    pub class: VerbClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Explicit forms. These win over the regular rules for every class.
    #[serde(default)]
    pub forms: Vec<VerbForm>,
    /// Persons the verb conjugates for. `None` means all six.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persons: Option<Vec<Person>>,
}

impl VerbEntry {
    pub fn new(infinitive: impl Into<String>, language: Language, class: VerbClass) -> Self {
        Self {
            infinitive: infinitive.into().trim().to_lowercase(),
            language,
            class,
            translation: None,
            forms: Vec::new(),
            persons: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// Set all six forms of one tense, in paradigm order.
    pub fn with_paradigm(mut self, tense: Tense, forms: [&str; 6]) -> Self {
        for (person, form) in Person::ALL.into_iter().zip(forms) {
            self = self.with_form(tense, person, form);
        }
        self
    }

    /// Set one form, replacing any earlier form for the same slot.
    pub fn with_form(mut self, tense: Tense, person: Person, form: impl Into<String>) -> Self {
        let form = form.into();
        match self
            .forms
            .iter_mut()
            .find(|f| f.tense == tense && f.person == person)
        {
            Some(existing) => existing.form = form,
            None => self.forms.push(VerbForm { tense, person, form }),
        }
        self
    }

    /// Restrict a defective or impersonal verb to some persons.
    pub fn restricted_to(mut self, persons: &[Person]) -> Self {
        self.persons = Some(persons.to_vec());
        self
    }

    pub fn supports_person(&self, person: Person) -> bool {
        self.persons
            .as_ref()
            .map_or(true, |persons| persons.contains(&person))
    }

    pub fn table_form(&self, tense: Tense, person: Person) -> Option<&str> {
        self.forms
            .iter()
            .find(|f| f.tense == tense && f.person == person)
            .map(|f| f.form.as_str())
            .filter(|form| !form.is_empty())
    }
}

/// Verbs of every language, keyed by language and infinitive.
#[derive(Debug, Clone, Default)]
pub struct ConjugationTable {
    verbs: Vec<VerbEntry>,
    index: HashMap<(Language, String), usize>,
}

impl ConjugationTable {
    /// Build a table, rejecting a second entry for the same infinitive.
    pub fn new(verbs: impl IntoIterator<Item = VerbEntry>) -> Result<Self> {
        let mut table = Self::default();
        for verb in verbs {
            let key = (verb.language, verb.infinitive.trim().to_lowercase());
            if table.index.contains_key(&key) {
                return Err(EngineError::DuplicateVerb {
                    infinitive: verb.infinitive,
                    language: verb.language,
                });
            }
            table.index.insert(key, table.verbs.len());
            table.verbs.push(verb);
        }
        Ok(table)
    }

    pub fn get(&self, language: Language, infinitive: &str) -> Option<&VerbEntry> {
        self.index
            .get(&(language, infinitive.trim().to_lowercase()))
            .map(|&idx| &self.verbs[idx])
    }

    pub fn for_language(&self, language: Language) -> impl Iterator<Item = &VerbEntry> {
        self.verbs.iter().filter(move |v| v.language == language)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerbEntry> {
        self.verbs.iter()
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Every producible form mapped back to its infinitive. When two verbs
    /// share a form, the one registered first keeps it.
    pub fn lemma_index(&self) -> LemmaIndex {
        let mut index = LemmaIndex::new();
        for verb in &self.verbs {
            for tense in Tense::ALL {
                for person in Person::ALL {
                    if let Ok(form) = conjugate(verb, tense, person) {
                        index.insert(verb.language, &form, &verb.infinitive);
                    }
                }
            }
        }
        index
    }

    /// Conjugate the verb named by `spec`. An unknown verb has no forms.
    pub fn conjugate(&self, spec: &GrammarChallengeSpec) -> Result<String> {
        match self.get(spec.language, &spec.verb) {
            Some(verb) => conjugate(verb, spec.tense, spec.person),
            None => Err(unsupported(&spec.verb, spec.tense, spec.person)),
        }
    }
}

/// Produce the inflected form of `verb`.
///
/// Person restrictions are checked first, then explicit table forms, then
/// the regular rules. Irregular and stem-changing verbs never fall back to
/// the rules.
pub fn conjugate(verb: &VerbEntry, tense: Tense, person: Person) -> Result<String> {
    if !verb.supports_person(person) {
        return Err(unsupported(&verb.infinitive, tense, person));
    }
    if let Some(form) = verb.table_form(tense, person) {
        return Ok(form.to_string());
    }
    let form = match verb.class {
        VerbClass::Regular => regular_form(&verb.infinitive, verb.language, tense, person),
        VerbClass::Irregular | VerbClass::StemChanging => None,
    };
    form.ok_or_else(|| unsupported(&verb.infinitive, tense, person))
}

fn unsupported(verb: &str, tense: Tense, person: Person) -> EngineError {
    EngineError::UnsupportedCombination {
        verb: verb.to_string(),
        tense,
        person,
    }
}

/// Ending family of a regular infinitive, e.g. `ar` for "hablar".
pub fn verb_ending(infinitive: &str, language: Language) -> Option<&'static str> {
    let endings: &[&'static str] = match language {
        Language::Es => &["ar", "er", "ir"],
        Language::Fr => &["er", "ir", "re"],
        Language::De => &["en", "n"],
    };
    endings
        .iter()
        .copied()
        .find(|ending| infinitive.len() > ending.len() && infinitive.ends_with(ending))
}

const ES_PRESENT_AR: [&str; 6] = ["o", "as", "a", "amos", "áis", "an"];
const ES_PRESENT_ER: [&str; 6] = ["o", "es", "e", "emos", "éis", "en"];
const ES_PRESENT_IR: [&str; 6] = ["o", "es", "e", "imos", "ís", "en"];
const ES_PRETERITE_AR: [&str; 6] = ["é", "aste", "ó", "amos", "asteis", "aron"];
const ES_PRETERITE_ER_IR: [&str; 6] = ["í", "iste", "ió", "imos", "isteis", "ieron"];
const ES_FUTURE: [&str; 6] = ["é", "ás", "á", "emos", "éis", "án"];

const FR_PRESENT_ER: [&str; 6] = ["e", "es", "e", "ons", "ez", "ent"];
const FR_PRESENT_IR: [&str; 6] = ["is", "is", "it", "issons", "issez", "issent"];
const FR_PRESENT_RE: [&str; 6] = ["s", "s", "", "ons", "ez", "ent"];
const FR_FUTURE: [&str; 6] = ["ai", "as", "a", "ons", "ez", "ont"];

const DE_PRESENT: [&str; 6] = ["e", "st", "t", "en", "t", "en"];
const DE_PRESENT_EPENTHESIS: [&str; 6] = ["e", "est", "et", "en", "et", "en"];
const DE_PRESENT_N: [&str; 6] = ["e", "st", "t", "n", "t", "n"];

fn regular_form(
    infinitive: &str,
    language: Language,
    tense: Tense,
    person: Person,
) -> Option<String> {
    let ending = verb_ending(infinitive, language)?;
    // Endings are ASCII, so the split lands on a char boundary.
    let stem = &infinitive[..infinitive.len() - ending.len()];
    let i = person.index();

    let form = match (language, tense) {
        (Language::Es, Tense::Present) => {
            let endings = match ending {
                "ar" => &ES_PRESENT_AR,
                "er" => &ES_PRESENT_ER,
                _ => &ES_PRESENT_IR,
            };
            format!("{stem}{}", endings[i])
        }
        (Language::Es, Tense::Preterite) => {
            let endings = if ending == "ar" {
                &ES_PRETERITE_AR
            } else {
                &ES_PRETERITE_ER_IR
            };
            format!("{stem}{}", endings[i])
        }
        (Language::Es, Tense::Future) => format!("{infinitive}{}", ES_FUTURE[i]),
        (Language::Fr, Tense::Present) => {
            let endings = match ending {
                "er" => &FR_PRESENT_ER,
                "ir" => &FR_PRESENT_IR,
                _ => &FR_PRESENT_RE,
            };
            format!("{stem}{}", endings[i])
        }
        (Language::Fr, Tense::Future) => {
            let base = infinitive
                .strip_suffix('e')
                .filter(|_| ending == "re")
                .unwrap_or(infinitive);
            format!("{base}{}", FR_FUTURE[i])
        }
        (Language::De, Tense::Present) => german_present(stem, ending, person),
        _ => return None,
    };
    Some(form)
}

fn german_present(stem: &str, ending: &str, person: Person) -> String {
    let i = person.index();
    if ending == "n" {
        return format!("{stem}{}", DE_PRESENT_N[i]);
    }
    if stem.ends_with('t') || stem.ends_with('d') {
        return format!("{stem}{}", DE_PRESENT_EPENTHESIS[i]);
    }
    // du tanzt, du heißt
    if person == Person::SecondSingular && stem.ends_with(['s', 'ß', 'z', 'x']) {
        return format!("{stem}t");
    }
    format!("{stem}{}", DE_PRESENT[i])
}

/// A conjugation challenge: fill in one verb form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConjugationChallenge {
    pub spec: GrammarChallengeSpec,
    pub expected: String,
    /// Other accepted answers, such as the form with its pronoun.
    pub alternatives: Vec<String>,
    pub pronoun: String,
    pub verb_class: VerbClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    pub explanation: String,
    /// 1 (easiest) to 5.
    pub complexity_score: u8,
}

impl ConjugationChallenge {
    pub fn accepted_answers(&self) -> Vec<String> {
        std::iter::once(self.expected.clone())
            .chain(self.alternatives.iter().cloned())
            .collect()
    }

    pub fn prompt(&self) -> String {
        match &self.translation {
            Some(translation) => format!(
                "{} ___ ({}: {}, {})",
                self.pronoun, self.spec.verb, translation, self.spec.tense
            ),
            None => format!("{} ___ ({}, {})", self.pronoun, self.spec.verb, self.spec.tense),
        }
    }
}

/// Default difficulty of a verb class.
pub fn difficulty_for_class(class: VerbClass) -> Difficulty {
    match class {
        VerbClass::Regular => Difficulty::Beginner,
        VerbClass::StemChanging => Difficulty::Intermediate,
        VerbClass::Irregular => Difficulty::Advanced,
    }
}

/// Rate a challenge from 1 to 5 by verb class, tense and difficulty.
pub fn complexity_score(class: VerbClass, tense: Tense, difficulty: Difficulty) -> u8 {
    let mut score = 1.0_f64;
    score += match class {
        VerbClass::Irregular => 2.0,
        VerbClass::StemChanging => 1.0,
        VerbClass::Regular => 0.0,
    };
    if tense != Tense::Present {
        score += 1.0;
    }
    score += match difficulty {
        Difficulty::Advanced => 1.0,
        Difficulty::Intermediate => 0.5,
        Difficulty::Beginner => 0.0,
    };
    score.round().clamp(1.0, 5.0) as u8
}

fn explanation(verb: &VerbEntry, tense: Tense, pronoun: &str) -> String {
    let base = format!("{pronoun} + {} ({tense} tense)", verb.infinitive);
    match verb.class {
        VerbClass::Irregular => format!("{base} - irregular verb with its own pattern"),
        VerbClass::StemChanging => format!("{base} - stem-changing verb"),
        VerbClass::Regular => match verb_ending(&verb.infinitive, verb.language) {
            Some(ending) => format!("{base} - regular -{ending} pattern"),
            None => format!("{base} - regular pattern"),
        },
    }
}

/// Answers written with the subject pronoun, one per pronoun variant.
fn pronoun_alternatives(language: Language, person: Person, form: &str) -> Vec<String> {
    person
        .pronoun(language)
        .split('/')
        .map(|pronoun| {
            let elides = language == Language::Fr
                && pronoun == "je"
                && form.starts_with(['a', 'e', 'i', 'o', 'u', 'h', 'é', 'ê']);
            if elides {
                format!("j'{form}")
            } else {
                format!("{pronoun} {form}")
            }
        })
        .collect()
}

pub(crate) fn build(
    table: &ConjugationTable,
    spec: &GrammarChallengeSpec,
    difficulty_hint: Option<Difficulty>,
) -> Result<(ConjugationChallenge, Difficulty)> {
    let verb = table
        .get(spec.language, &spec.verb)
        .ok_or_else(|| unsupported(&spec.verb, spec.tense, spec.person))?;
    let expected = conjugate(verb, spec.tense, spec.person)?;
    let difficulty = difficulty_hint.unwrap_or_else(|| difficulty_for_class(verb.class));
    let pronoun = spec.person.pronoun(spec.language);

    let challenge = ConjugationChallenge {
        spec: GrammarChallengeSpec {
            verb: verb.infinitive.clone(),
            ..spec.clone()
        },
        alternatives: pronoun_alternatives(spec.language, spec.person, &expected),
        pronoun: pronoun.to_string(),
        verb_class: verb.class,
        translation: verb.translation.clone(),
        explanation: explanation(verb, spec.tense, pronoun),
        complexity_score: complexity_score(verb.class, spec.tense, difficulty),
        expected,
    };
    Ok((challenge, difficulty))
}

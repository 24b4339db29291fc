//! Sentence-gap challenges: restore the missing words of a sentence.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::lexical::{is_basic_word, EDGE_PUNCTUATION};
use crate::types::Language;

/// Placeholder shown in place of each gapped token.
pub const GAP_MARKER: &str = "___";

/// One removed word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    /// Token index in the sentence.
    pub position: usize,
    pub answer: String,
    pub distractors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceGapChallenge {
    pub sentence: String,
    pub language: Language,
    /// Gaps in ascending position order.
    pub gaps: Vec<Gap>,
}

impl SentenceGapChallenge {
    pub fn answers(&self) -> Vec<String> {
        self.gaps.iter().map(|g| g.answer.clone()).collect()
    }

    /// The sentence with each gapped word replaced by [`GAP_MARKER`]. Edge
    /// punctuation of a gapped token stays in place.
    pub fn prompt(&self) -> String {
        self.sentence
            .split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                if self.gaps.iter().any(|g| g.position == i) {
                    mask(token)
                } else {
                    token.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn mask(token: &str) -> String {
    let lead = token.len() - token.trim_start_matches(EDGE_PUNCTUATION).len();
    let trail = token.len() - token.trim_end_matches(EDGE_PUNCTUATION).len();
    if lead + trail >= token.len() {
        return GAP_MARKER.to_string();
    }
    format!("{}{}{}", &token[..lead], GAP_MARKER, &token[token.len() - trail..])
}

/// Number of gaps for a sentence of `tokens` words.
pub fn gap_count(tokens: usize) -> usize {
    match tokens {
        0..=7 => 1,
        8..=11 => 2,
        _ => 3,
    }
}

/// Articles and prepositions used when the catalog has too few distractors.
pub fn filler_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::Es => &[
            "el", "la", "los", "las", "un", "una", "de", "en", "con", "por", "para", "sin",
        ],
        Language::Fr => &[
            "le", "la", "les", "un", "une", "des", "de", "dans", "avec", "pour", "sans", "sur",
        ],
        Language::De => &[
            "der", "die", "das", "ein", "eine", "in", "mit", "für", "ohne", "auf", "von", "zu",
        ],
    }
}

pub(crate) fn build<R: Rng + ?Sized>(
    sentence: &str,
    language: Language,
    catalog: &Catalog,
    max_distractors: usize,
    rng: &mut R,
) -> Result<SentenceGapChallenge> {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(EngineError::SentenceTooShort {
            tokens: tokens.len(),
        });
    }

    let answers: Vec<String> = tokens
        .iter()
        .map(|t| t.trim_matches(EDGE_PUNCTUATION).to_string())
        .collect();

    // Interior tokens that are words, not bare punctuation.
    let candidates: Vec<usize> = (1..tokens.len() - 1)
        .filter(|&i| !answers[i].is_empty())
        .collect();
    if candidates.is_empty() {
        return Err(EngineError::SentenceTooShort {
            tokens: tokens.len(),
        });
    }

    let wanted = gap_count(tokens.len()).min(candidates.len());
    let (mut content, mut rest): (Vec<usize>, Vec<usize>) = candidates
        .into_iter()
        .partition(|&i| answers[i].chars().count() > 2 && !is_basic_word(&answers[i], language));

    content.shuffle(rng);
    let mut positions: Vec<usize> = content.into_iter().take(wanted).collect();
    if positions.len() < wanted {
        rest.shuffle(rng);
        positions.extend(rest.into_iter().take(wanted - positions.len()));
    }
    positions.sort_unstable();

    let gaps = positions
        .into_iter()
        .map(|position| {
            let answer = answers[position].clone();
            let distractors = distractors_for(&answer, language, catalog, max_distractors, rng);
            Gap {
                position,
                answer,
                distractors,
            }
        })
        .collect();

    Ok(SentenceGapChallenge {
        sentence: tokens.join(" "),
        language,
        gaps,
    })
}

/// Pick up to `max` wrong options for `answer`: same-language catalog words
/// of similar length first, then filler words.
pub(crate) fn distractors_for<R: Rng + ?Sized>(
    answer: &str,
    language: Language,
    catalog: &Catalog,
    max: usize,
    rng: &mut R,
) -> Vec<String> {
    let answer_lower = answer.to_lowercase();
    let answer_len = answer_lower.chars().count();

    let mut pool: Vec<&str> = Vec::new();
    for form in catalog
        .for_language(language)
        .flat_map(|item| item.surface_forms.iter())
    {
        let similar = form.chars().count().abs_diff(answer_len) <= 2;
        let fresh = *form != answer_lower && !pool.contains(&form.as_str());
        if !form.contains(' ') && similar && fresh {
            pool.push(form);
        }
    }
    pool.shuffle(rng);

    let mut chosen: Vec<String> = pool.into_iter().take(max).map(str::to_string).collect();
    if chosen.len() < max {
        let mut fillers: Vec<&str> = filler_words(language)
            .iter()
            .copied()
            .filter(|w| *w != answer_lower && !chosen.iter().any(|c| c == w))
            .collect();
        fillers.shuffle(rng);
        let missing = max - chosen.len();
        chosen.extend(fillers.into_iter().take(missing).map(str::to_string));
    }
    chosen
}

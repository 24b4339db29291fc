//! Answer grading for typed responses.

use serde::{Deserialize, Serialize};

/// How strictly a typed answer is compared to the accepted answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::CaseInsensitive
    }
}

/// Grading settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    pub matching_mode: MatchingMode,
    /// Minimum similarity accepted in fuzzy mode.
    pub fuzzy_threshold: f64,
    /// Minimum catalog coverage (percent) of a free-text answer.
    #[serde(default)]
    pub min_sentence_coverage: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            matching_mode: MatchingMode::default(),
            fuzzy_threshold: 0.8,
            min_sentence_coverage: 0.0,
        }
    }
}

/// Result of comparing a typed answer to the accepted answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Best similarity score between 0.0 and 1.0.
    pub similarity: f64,
    /// The matching mode used.
    pub matching_mode: MatchingMode,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// The accepted answer closest to the typed one.
    pub closest_answer: Option<String>,
}

/// Grade a typed answer against every accepted answer, keeping the best.
pub fn grade_answer(typed: &str, accepted: &[String], config: &GradingConfig) -> MatchResult {
    let typed_normalized = normalize_whitespace(typed);
    let mut best: Option<(f64, bool, &String)> = None;

    for answer in accepted {
        let (similarity, is_correct) =
            compare_normalized(&typed_normalized, &normalize_whitespace(answer), config);
        let better = match best {
            None => true,
            Some((best_sim, best_ok, _)) => {
                (is_correct && !best_ok) || (is_correct == best_ok && similarity > best_sim)
            }
        };
        if better {
            best = Some((similarity, is_correct, answer));
        }
    }

    match best {
        Some((similarity, is_correct, answer)) => MatchResult {
            is_correct,
            similarity,
            matching_mode: config.matching_mode,
            typed_normalized,
            closest_answer: Some(answer.clone()),
        },
        None => MatchResult {
            is_correct: false,
            similarity: 0.0,
            matching_mode: config.matching_mode,
            typed_normalized,
            closest_answer: None,
        },
    }
}

fn compare_normalized(typed: &str, correct: &str, config: &GradingConfig) -> (f64, bool) {
    if typed.is_empty() {
        return (0.0, false);
    }
    match config.matching_mode {
        MatchingMode::Exact => {
            let is_correct = typed == correct;
            (if is_correct { 1.0 } else { 0.0 }, is_correct)
        }
        MatchingMode::CaseInsensitive => {
            let is_correct = typed.to_lowercase() == correct.to_lowercase();
            (if is_correct { 1.0 } else { 0.0 }, is_correct)
        }
        MatchingMode::Fuzzy => {
            let similarity = normalized_similarity(&typed.to_lowercase(), &correct.to_lowercase());
            (similarity, similarity >= config.fuzzy_threshold)
        }
    }
}

/// Normalize whitespace in a string (trim and collapse multiple spaces).
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rolling rows
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Calculate normalized similarity (0.0 to 1.0) based on Levenshtein distance.
///
/// Lengths are counted in characters so accented letters weigh the same as
/// plain ones.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}

//! Lexical matching of free-text answers against the vocabulary catalog.
//!
//! Matching is longest-match-first: every window length is tried from the
//! longest catalog form down to single words, and a token claimed by one
//! match can never be credited again. This keeps "gusta" from being counted
//! separately inside "me gusta".
//!
//! With a [`LemmaIndex`], a second pass maps each remaining inflected word to
//! its base form ("prefiero" to "preferir") and credits the single-word item
//! for that base form.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::{ItemId, Language, VocabularyItem};

/// Characters stripped from token edges before comparison.
pub(crate) const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '“', '”', '\'', '‘', '’', '(', ')', '¡', '¿', '«', '»',
];

/// How a match was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Multi-word expression.
    Mwe,
    /// Single word, exact form.
    Exact,
    /// Single word, matched through its base form.
    BaseWord,
}

/// One catalog item found in the input, covering tokens `start..=end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyMatch {
    pub item_id: ItemId,
    pub surface_form: String,
    pub start: usize,
    pub end: usize,
    pub kind: MatchKind,
    /// Base form the word was reduced to, for base-word matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl VocabularyMatch {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Result of matching one input against a catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LexicalMatch {
    /// Non-overlapping matches in sentence order.
    pub matches: Vec<VocabularyMatch>,
    pub unmatched_words: Vec<String>,
    pub total_tokens: usize,
    pub matched_tokens: usize,
    /// Share of tokens consumed by matches, in [0, 100].
    pub coverage_percentage: f64,
}

impl LexicalMatch {
    /// Matches worth tracking: drops single function words.
    pub fn trackable(&self, language: Language) -> Vec<&VocabularyMatch> {
        self.matches
            .iter()
            .filter(|m| m.kind == MatchKind::Mwe || !is_basic_word(&m.surface_form, language))
            .collect()
    }
}

/// Aggregate statistics over several sentences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsingStats {
    pub total_sentences: usize,
    pub average_coverage: f64,
    pub total_mwes_found: usize,
}

/// Inflected forms mapped to their base form, per language.
#[derive(Debug, Clone, Default)]
pub struct LemmaIndex {
    lemmas: HashMap<(Language, String), String>,
}

impl LemmaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `form` as an inflection of `lemma`. The first lemma
    /// registered for a form is kept; identical and multi-word forms are
    /// skipped.
    pub fn insert(&mut self, language: Language, form: &str, lemma: &str) {
        let form = clean_token(form);
        let lemma = clean_token(lemma);
        if form.is_empty() || form.contains(char::is_whitespace) || form == lemma {
            return;
        }
        self.lemmas.entry((language, form)).or_insert(lemma);
    }

    pub fn lemma(&self, language: Language, word: &str) -> Option<&str> {
        self.lemmas
            .get(&(language, clean_token(word)))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// Split input into cleaned, lower-cased tokens. Tokens that are pure
/// punctuation are dropped.
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .collect()
}

pub(crate) fn clean_token(token: &str) -> String {
    token.trim_matches(EDGE_PUNCTUATION).to_lowercase()
}

/// Find the maximal longest-first, non-overlapping set of catalog matches
/// in `input`.
///
/// Only items of `language` take part. When two items share a form of the
/// same length at the same position, the one registered first wins.
pub fn match_vocabulary(
    input: &str,
    catalog: &[VocabularyItem],
    language: Language,
) -> LexicalMatch {
    match_tokens(input, catalog, language, None)
}

/// [`match_vocabulary`] followed by a base-word pass over the words left
/// unmatched. Basic words are never reduced.
pub fn match_with_lemmas(
    input: &str,
    catalog: &[VocabularyItem],
    language: Language,
    lemmas: &LemmaIndex,
) -> LexicalMatch {
    match_tokens(input, catalog, language, Some(lemmas))
}

fn match_tokens(
    input: &str,
    catalog: &[VocabularyItem],
    language: Language,
    lemmas: Option<&LemmaIndex>,
) -> LexicalMatch {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return LexicalMatch::default();
    }

    // Form (cleaned, space-joined) -> first registered item, grouped by token length.
    let mut forms_by_len: HashMap<usize, HashMap<String, &VocabularyItem>> = HashMap::new();
    for item in catalog.iter().filter(|i| i.language == language) {
        for form in &item.surface_forms {
            let form_tokens = tokenize(form);
            if form_tokens.is_empty() {
                continue;
            }
            forms_by_len
                .entry(form_tokens.len())
                .or_default()
                .entry(form_tokens.join(" "))
                .or_insert(item);
        }
    }

    let lengths: BTreeSet<usize> = forms_by_len.keys().copied().collect();
    let mut claimed = vec![false; tokens.len()];
    let mut matches = Vec::new();

    for &len in lengths.iter().rev() {
        if len > tokens.len() {
            continue;
        }
        let forms = &forms_by_len[&len];
        let mut start = 0;
        while start + len <= tokens.len() {
            if claimed[start..start + len].iter().any(|&c| c) {
                start += 1;
                continue;
            }
            let window = tokens[start..start + len].join(" ");
            match forms.get(&window) {
                Some(item) => {
                    claimed[start..start + len].iter_mut().for_each(|c| *c = true);
                    matches.push(VocabularyMatch {
                        item_id: item.id.clone(),
                        surface_form: window,
                        start,
                        end: start + len - 1,
                        kind: if len > 1 { MatchKind::Mwe } else { MatchKind::Exact },
                        lemma: None,
                    });
                    start += len;
                }
                None => start += 1,
            }
        }
    }

    if let (Some(lemmas), Some(words)) = (lemmas, forms_by_len.get(&1)) {
        for (idx, token) in tokens.iter().enumerate() {
            if claimed[idx] || is_basic_word(token, language) {
                continue;
            }
            let Some(lemma) = lemmas.lemma(language, token) else {
                continue;
            };
            if let Some(item) = words.get(lemma) {
                claimed[idx] = true;
                matches.push(VocabularyMatch {
                    item_id: item.id.clone(),
                    surface_form: token.clone(),
                    start: idx,
                    end: idx,
                    kind: MatchKind::BaseWord,
                    lemma: Some(lemma.to_string()),
                });
            }
        }
    }

    matches.sort_by_key(|m| m.start);

    let matched_tokens = claimed.iter().filter(|&&c| c).count();
    let unmatched_words = tokens
        .iter()
        .zip(&claimed)
        .filter(|(_, &c)| !c)
        .map(|(t, _)| t.clone())
        .collect();

    LexicalMatch {
        matches,
        unmatched_words,
        total_tokens: tokens.len(),
        matched_tokens,
        coverage_percentage: coverage(matched_tokens, tokens.len()),
    }
}

fn coverage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = matched as f64 / total as f64 * 100.0;
    ((pct * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

/// Coverage statistics over a batch of sentences.
pub fn parsing_stats<S: AsRef<str>>(
    sentences: &[S],
    catalog: &[VocabularyItem],
    language: Language,
) -> ParsingStats {
    if sentences.is_empty() {
        return ParsingStats::default();
    }

    let mut coverage_sum = 0.0;
    let mut total_mwes_found = 0;
    for sentence in sentences {
        let result = match_vocabulary(sentence.as_ref(), catalog, language);
        coverage_sum += result.coverage_percentage;
        total_mwes_found += result
            .matches
            .iter()
            .filter(|m| m.kind == MatchKind::Mwe)
            .count();
    }

    ParsingStats {
        total_sentences: sentences.len(),
        average_coverage: coverage_sum / sentences.len() as f64,
        total_mwes_found,
    }
}

/// Outcome of grading a free-text answer against the items it should use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceGrade {
    /// Target items found in the answer, in target order.
    pub credited: Vec<ItemId>,
    /// Target items the answer did not use.
    pub missing: Vec<ItemId>,
    /// Whether the answer reached the minimum coverage.
    pub coverage_met: bool,
    pub lexical: LexicalMatch,
}

impl SentenceGrade {
    /// Every target used and the coverage reached. Without targets, any
    /// non-empty answer at the coverage passes.
    pub fn is_correct(&self) -> bool {
        self.coverage_met && self.missing.is_empty() && self.lexical.total_tokens > 0
    }

    /// Whether this answer earns credit for one target.
    pub fn credits(&self, target_id: &ItemId) -> bool {
        self.coverage_met && self.credited.contains(target_id)
    }
}

/// Grade a free-text answer: match it against the whole catalog, then check
/// which `targets` were used and whether coverage reaches `min_coverage`
/// (a percentage).
pub fn grade_sentence(
    answer: &str,
    catalog: &Catalog,
    language: Language,
    targets: &[ItemId],
    min_coverage: f64,
) -> SentenceGrade {
    let lexical = catalog.match_text(answer, language);

    let mut credited = Vec::new();
    let mut missing = Vec::new();
    for target in targets {
        if credited.contains(target) || missing.contains(target) {
            continue;
        }
        if lexical.matches.iter().any(|m| &m.item_id == target) {
            credited.push(target.clone());
        } else {
            missing.push(target.clone());
        }
    }

    SentenceGrade {
        credited,
        missing,
        coverage_met: lexical.total_tokens > 0 && lexical.coverage_percentage >= min_coverage,
        lexical,
    }
}

/// Articles, pronouns, very common verbs and prepositions. Learners pick
/// these up implicitly, so they are not credited or gapped.
pub fn is_basic_word(word: &str, language: Language) -> bool {
    let word = clean_token(word);
    basic_words(language).contains(&word.as_str())
}

pub(crate) fn basic_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::Es => &[
            "el", "la", "los", "las", "un", "una", "unos", "unas", "yo", "tú", "él", "ella",
            "nosotros", "nosotras", "vosotros", "vosotras", "ellos", "ellas", "mi", "tu", "su",
            "nuestro", "nuestra", "vuestro", "vuestra", "me", "te", "se", "nos", "os", "le",
            "les", "lo", "es", "son", "está", "están", "hay", "tiene", "tienen", "ser", "estar",
            "tener", "haber", "y", "o", "pero", "de", "en", "a", "con", "por", "para", "sin",
            "qué", "quién", "cómo", "cuándo", "dónde",
        ],
        Language::Fr => &[
            "le", "la", "les", "un", "une", "des", "je", "tu", "il", "elle", "nous", "vous",
            "ils", "elles", "mon", "ma", "mes", "ton", "ta", "tes", "son", "sa", "ses", "me",
            "te", "se", "lui", "leur", "est", "sont", "a", "ont", "être", "avoir", "et", "ou",
            "mais", "de", "du", "à", "avec", "pour", "sans",
        ],
        Language::De => &[
            "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem", "einer",
            "ich", "du", "er", "sie", "es", "wir", "ihr", "mein", "meine", "dein", "deine",
            "sein", "seine", "ihre", "mir", "dir", "ihm", "uns", "euch", "ihnen", "ist", "sind",
            "hat", "haben", "und", "oder", "aber", "von", "zu", "mit", "für", "ohne",
        ],
    }
}

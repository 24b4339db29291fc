//! Validated vocabulary catalog.
//!
//! Items arrive from the content store shaped as [`VocabularyItem`]s. Each
//! one is normalized and validated again on the way in, the catalog enforces
//! the cross-item invariant that no surface form is shared by two items of
//! the same language, and it remembers registration order, which the matcher
//! and scheduler use to break ties.

use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::lexical::{match_with_lemmas, LemmaIndex, LexicalMatch};
use crate::types::{ItemId, Language, VocabularyItem};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<VocabularyItem>,
    by_id: HashMap<ItemId, usize>,
    lemmas: LemmaIndex,
}

impl Catalog {
    /// Build a catalog, rejecting invalid items and duplicate surface forms
    /// within a language.
    pub fn from_items(items: impl IntoIterator<Item = VocabularyItem>) -> Result<Self> {
        let mut catalog = Self::default();
        let mut seen_forms: HashMap<(Language, String), ItemId> = HashMap::new();

        for raw in items {
            let item =
                VocabularyItem::new(raw.id, raw.surface_forms, raw.language, raw.difficulty)?;
            for form in &item.surface_forms {
                let key = (item.language, form.clone());
                if let Some(existing) = seen_forms.get(&key) {
                    // Alternate forms of the same item are deduplicated on construction.
                    if existing != &item.id {
                        return Err(EngineError::DuplicateSurfaceForm {
                            form: form.clone(),
                            language: item.language,
                            existing: existing.to_string(),
                            duplicate: item.id.to_string(),
                        });
                    }
                }
                seen_forms.insert(key, item.id.clone());
            }

            catalog.by_id.entry(item.id.clone()).or_insert(catalog.items.len());
            catalog.items.push(item);
        }

        Ok(catalog)
    }

    /// Attach an inflected-form index used for base-word matching.
    pub fn with_lemmas(mut self, lemmas: LemmaIndex) -> Self {
        self.lemmas = lemmas;
        self
    }

    pub fn lemmas(&self) -> &LemmaIndex {
        &self.lemmas
    }

    /// Match learner text against this catalog, including base-word matches
    /// from the attached lemma index.
    pub fn match_text(&self, input: &str, language: Language) -> LexicalMatch {
        match_with_lemmas(input, &self.items, language, &self.lemmas)
    }

    /// Items of one language, in registration order.
    pub fn for_language(&self, language: Language) -> impl Iterator<Item = &VocabularyItem> {
        self.items.iter().filter(move |item| item.language == language)
    }

    pub fn get(&self, id: &ItemId) -> Option<&VocabularyItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &VocabularyItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Free-text challenges: write a sentence that uses given vocabulary.
//!
//! Answers are graded by the lexical matcher against the whole catalog, so
//! a target word hidden inside a longer expression is not credited.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{EngineError, Result};
use crate::types::{Difficulty, ItemId, Language};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextChallenge {
    pub language: Language,
    /// Items the answer should use, in prompt order.
    pub targets: Vec<ItemId>,
    /// Canonical form of each target.
    pub forms: Vec<String>,
}

impl FreeTextChallenge {
    pub fn prompt(&self) -> String {
        if self.forms.is_empty() {
            "Write a sentence".to_string()
        } else {
            format!("Write a sentence using: {}", self.forms.join(", "))
        }
    }
}

/// Resolve every target in the catalog. The difficulty is that of the
/// hardest target, beginner when there are none.
pub(crate) fn build(
    targets: &[ItemId],
    language: Language,
    catalog: &Catalog,
) -> Result<(FreeTextChallenge, Difficulty)> {
    let mut resolved = Vec::new();
    let mut forms = Vec::new();
    let mut difficulty = Difficulty::Beginner;

    for id in targets {
        if resolved.contains(id) {
            continue;
        }
        let item = catalog
            .get(id)
            .filter(|item| item.language == language)
            .ok_or_else(|| EngineError::UnknownItem {
                id: id.to_string(),
                language,
            })?;
        difficulty = difficulty.max(item.difficulty);
        resolved.push(id.clone());
        forms.push(item.canonical().to_string());
    }

    Ok((
        FreeTextChallenge {
            language,
            targets: resolved,
            forms,
        },
        difficulty,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VocabularyItem;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::from_items(vec![
            VocabularyItem::new("mg", ["me gusta"], Language::Es, Difficulty::Beginner).unwrap(),
            VocabularyItem::new("se", ["sin embargo"], Language::Es, Difficulty::Advanced)
                .unwrap(),
            VocabularyItem::new("ch", ["chat"], Language::Fr, Difficulty::Beginner).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn prompt_lists_target_forms() {
        let targets = [ItemId::from("mg"), ItemId::from("se"), ItemId::from("mg")];
        let (challenge, difficulty) = build(&targets, Language::Es, &catalog()).unwrap();

        assert_eq!(challenge.targets, vec![ItemId::from("mg"), ItemId::from("se")]);
        assert_eq!(challenge.prompt(), "Write a sentence using: me gusta, sin embargo");
        assert_eq!(difficulty, Difficulty::Advanced);
    }

    #[test]
    fn target_must_exist_in_language() {
        let result = build(&[ItemId::from("ch")], Language::Es, &catalog());
        assert_eq!(
            result,
            Err(EngineError::UnknownItem {
                id: "ch".to_string(),
                language: Language::Es,
            })
        );
    }

    #[test]
    fn no_targets_is_open_writing() {
        let (challenge, difficulty) = build(&[], Language::Es, &catalog()).unwrap();
        assert_eq!(challenge.prompt(), "Write a sentence");
        assert_eq!(difficulty, Difficulty::Beginner);
    }
}

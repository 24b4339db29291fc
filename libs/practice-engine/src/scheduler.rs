//! Review scheduling.
//!
//! Ranks catalog items by a weighted sum of three signals, each in [0, 1]:
//! - Staleness: time since the last attempt relative to a target interval
//!   that grows with mastery. Never-attempted items are maximally stale.
//! - Weakness: `1 - accuracy`. Never-attempted items are maximally weak.
//! - Difficulty fit: 1 for the session's tier, 0.5 for an adjacent tier.
//!
//! Ranking is a pure function of its inputs; exact ties keep catalog order.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, ItemId, MasteryState, VocabularyItem};

/// Ranking weights and intervals. These affect order only, never validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub stale_weight: f64,
    pub weakness_weight: f64,
    pub difficulty_fit_weight: f64,
    /// `None` is a mixed session: every tier fits.
    pub target_session_difficulty: Option<Difficulty>,
    /// Target review interval per mastery level (0-5), in hours.
    pub target_intervals_hours: [f64; 6],
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            stale_weight: 0.5,
            weakness_weight: 0.35,
            difficulty_fit_weight: 0.15,
            target_session_difficulty: None,
            target_intervals_hours: [4.0, 24.0, 72.0, 168.0, 336.0, 720.0],
        }
    }
}

/// Priority of one item with its signal breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item_id: ItemId,
    pub staleness: f64,
    pub weakness: f64,
    pub difficulty_fit: f64,
    pub priority: f64,
}

/// Pick the next `batch_size` distinct items to practice.
///
/// Returns fewer items when the catalog is smaller than the batch, and an
/// empty batch for an empty catalog.
pub fn select_next_batch(
    states: &HashMap<ItemId, MasteryState>,
    catalog: &[VocabularyItem],
    batch_size: usize,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Vec<ItemId> {
    if batch_size == 0 || catalog.is_empty() {
        return Vec::new();
    }

    let batch: Vec<ItemId> = rank_items(states, catalog, now, config)
        .into_iter()
        .take(batch_size)
        .map(|scored| scored.item_id)
        .collect();

    tracing::debug!(
        catalog_size = catalog.len(),
        requested = batch_size,
        selected = batch.len(),
        "selected practice batch"
    );

    batch
}

/// Score and sort every distinct catalog item, highest priority first.
pub fn rank_items(
    states: &HashMap<ItemId, MasteryState>,
    catalog: &[VocabularyItem],
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Vec<ScoredItem> {
    let mut seen = HashSet::new();
    let mut scored: Vec<ScoredItem> = catalog
        .iter()
        .filter(|item| seen.insert(item.id.clone()))
        .map(|item| score_item(item, states.get(&item.id), now, config))
        .collect();

    // Stable sort: ties stay in catalog order.
    scored.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    scored
}

/// Compute the priority of a single item.
pub fn score_item(
    item: &VocabularyItem,
    state: Option<&MasteryState>,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> ScoredItem {
    let staleness = staleness(state, now, config);
    let weakness = match state {
        Some(s) if s.attempts > 0 => 1.0 - s.accuracy(),
        _ => 1.0,
    };
    let difficulty_fit = difficulty_fit(item.difficulty, config.target_session_difficulty);

    let priority = config.stale_weight * staleness
        + config.weakness_weight * weakness
        + config.difficulty_fit_weight * difficulty_fit;

    ScoredItem {
        item_id: item.id.clone(),
        staleness,
        weakness,
        difficulty_fit,
        priority,
    }
}

fn staleness(state: Option<&MasteryState>, now: DateTime<Utc>, config: &SchedulerConfig) -> f64 {
    let (state, last) = match state {
        Some(s) if s.attempts > 0 => match s.last_attempt_at {
            Some(last) => (s, last),
            None => return 1.0,
        },
        _ => return 1.0,
    };

    let target_hours = config.target_intervals_hours[state.mastery_level.to_value() as usize];
    if target_hours <= 0.0 {
        return 1.0;
    }

    let elapsed_hours = now.signed_duration_since(last).num_seconds() as f64 / 3600.0;
    (elapsed_hours / target_hours).clamp(0.0, 1.0)
}

fn difficulty_fit(item: Difficulty, target: Option<Difficulty>) -> f64 {
    match target {
        None => 1.0,
        Some(target) => match item.distance(target) {
            0 => 1.0,
            1 => 0.5,
            _ => 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, MasteryLevel};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn item(id: &str, difficulty: Difficulty) -> VocabularyItem {
        VocabularyItem::new(id, [id], Language::Es, difficulty).unwrap()
    }

    fn state(attempts: u32, correct: u32, level: MasteryLevel, hours_ago: i64) -> MasteryState {
        MasteryState {
            attempts,
            correct_attempts: correct,
            last_attempt_at: Some(now() - Duration::hours(hours_ago)),
            mastery_level: level,
        }
    }

    fn ids(batch: &[ItemId]) -> Vec<&str> {
        batch.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn unattempted_items_come_first() {
        let catalog = vec![item("known", Difficulty::Beginner), item("new", Difficulty::Beginner)];
        let mut states = HashMap::new();
        states.insert(ItemId::from("known"), state(5, 5, MasteryLevel::Expert, 1));

        let batch = select_next_batch(&states, &catalog, 2, now(), &SchedulerConfig::default());
        assert_eq!(ids(&batch), vec!["new", "known"]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = vec![
            item("c", Difficulty::Beginner),
            item("a", Difficulty::Beginner),
            item("b", Difficulty::Beginner),
        ];
        let config = SchedulerConfig::default();
        let batch = select_next_batch(&HashMap::new(), &catalog, 3, now(), &config);
        assert_eq!(ids(&batch), vec!["c", "a", "b"]);
    }

    #[test]
    fn under_filled_batch_returns_everything() {
        let catalog = vec![item("a", Difficulty::Beginner), item("b", Difficulty::Advanced)];
        let config = SchedulerConfig::default();
        let batch = select_next_batch(&HashMap::new(), &catalog, 10, now(), &config);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn empty_catalog_gives_empty_batch() {
        let batch = select_next_batch(&HashMap::new(), &[], 5, now(), &SchedulerConfig::default());
        assert!(batch.is_empty());
    }

    #[test]
    fn duplicate_ids_are_selected_once() {
        let catalog = vec![item("a", Difficulty::Beginner), item("a", Difficulty::Beginner)];
        let config = SchedulerConfig::default();
        let batch = select_next_batch(&HashMap::new(), &catalog, 5, now(), &config);
        assert_eq!(ids(&batch), vec!["a"]);
    }

    #[test]
    fn low_mastery_goes_stale_faster() {
        let weak = state(4, 3, MasteryLevel::Seen, 12);
        let strong = state(4, 3, MasteryLevel::Mastered, 12);
        let config = SchedulerConfig::default();

        let weak_item = item("w", Difficulty::Beginner);
        let strong_item = item("s", Difficulty::Beginner);
        let weak_score = score_item(&weak_item, Some(&weak), now(), &config);
        let strong_score = score_item(&strong_item, Some(&strong), now(), &config);
        assert_eq!(weak_score.staleness, 0.5);
        assert!(weak_score.staleness > strong_score.staleness);
    }

    #[test]
    fn staleness_is_clamped() {
        let config = SchedulerConfig::default();
        let overdue = state(1, 1, MasteryLevel::Seen, 24 * 30);
        let future = MasteryState {
            last_attempt_at: Some(now() + Duration::hours(3)),
            ..overdue.clone()
        };
        let a = score_item(&item("a", Difficulty::Beginner), Some(&overdue), now(), &config);
        let b = score_item(&item("b", Difficulty::Beginner), Some(&future), now(), &config);
        assert_eq!(a.staleness, 1.0);
        assert_eq!(b.staleness, 0.0);
    }

    #[test]
    fn difficulty_fit_breaks_ties() {
        let catalog = vec![
            item("hard", Difficulty::Advanced),
            item("mid", Difficulty::Intermediate),
            item("easy", Difficulty::Beginner),
        ];
        let config = SchedulerConfig {
            target_session_difficulty: Some(Difficulty::Beginner),
            ..Default::default()
        };
        let ranked = rank_items(&HashMap::new(), &catalog, now(), &config);
        let fits: Vec<f64> = ranked.iter().map(|s| s.difficulty_fit).collect();
        assert_eq!(fits, vec![1.0, 0.5, 0.0]);
        assert_eq!(ranked[0].item_id, ItemId::from("easy"));
    }

    #[test]
    fn selection_is_deterministic() {
        let catalog: Vec<VocabularyItem> = (0..20)
            .map(|i| {
                let difficulty = match i % 3 {
                    0 => Difficulty::Beginner,
                    1 => Difficulty::Intermediate,
                    _ => Difficulty::Advanced,
                };
                item(&format!("w{i}"), difficulty)
            })
            .collect();
        let mut states = HashMap::new();
        for i in (0..20).step_by(2) {
            states.insert(
                ItemId::new(format!("w{i}")),
                state(4, (i % 5) as u32, MasteryLevel::Recognized, i as i64),
            );
        }
        let config = SchedulerConfig {
            target_session_difficulty: Some(Difficulty::Intermediate),
            ..Default::default()
        };

        let first = select_next_batch(&states, &catalog, 7, now(), &config);
        for _ in 0..5 {
            assert_eq!(select_next_batch(&states, &catalog, 7, now(), &config), first);
        }
    }
}

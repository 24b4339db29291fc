//! Mastery tracking.
//!
//! A [`MasteryState`] is updated only by folding [`AttemptRecord`]s into it,
//! in submission order. The level is derived from the counters on every
//! update, with one ordering rule: a miss never promotes.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{AttemptRecord, MasteryLevel, MasteryState};

/// Accuracy and minimum-attempt gate for one mastery level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelGate {
    pub min_accuracy: f64,
    pub min_attempts: u32,
}

impl LevelGate {
    fn admits(&self, accuracy: f64, attempts: u32) -> bool {
        accuracy >= self.min_accuracy && attempts >= self.min_attempts
    }
}

/// Gates for levels 2-5, evaluated from the top down. Level 1 needs a single
/// attempt and level 0 means none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MasteryThresholds {
    pub expert: LevelGate,
    pub mastered: LevelGate,
    pub practiced: LevelGate,
    pub recognized: LevelGate,
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        Self {
            expert: LevelGate {
                min_accuracy: 0.90,
                min_attempts: 5,
            },
            mastered: LevelGate {
                min_accuracy: 0.80,
                min_attempts: 4,
            },
            practiced: LevelGate {
                min_accuracy: 0.70,
                min_attempts: 3,
            },
            recognized: LevelGate {
                min_accuracy: 0.50,
                min_attempts: 2,
            },
        }
    }
}

/// Derive the mastery level from raw counters.
pub fn mastery_level_for(
    attempts: u32,
    correct_attempts: u32,
    thresholds: &MasteryThresholds,
) -> MasteryLevel {
    if attempts == 0 {
        return MasteryLevel::Unknown;
    }
    let accuracy = correct_attempts as f64 / attempts as f64;

    if thresholds.expert.admits(accuracy, attempts) {
        MasteryLevel::Expert
    } else if thresholds.mastered.admits(accuracy, attempts) {
        MasteryLevel::Mastered
    } else if thresholds.practiced.admits(accuracy, attempts) {
        MasteryLevel::Practiced
    } else if thresholds.recognized.admits(accuracy, attempts) {
        MasteryLevel::Recognized
    } else {
        MasteryLevel::Seen
    }
}

/// Apply one attempt to a learner's state, creating it on first attempt.
///
/// The input state is never modified; a state whose counters are
/// inconsistent is rejected rather than repaired.
///
/// An incorrect attempt never raises the level. The table alone would move
/// 1/1 to 1/2 from `Seen` to `Recognized`; that single case is held at the
/// previous level.
pub fn record_attempt(
    state: Option<&MasteryState>,
    attempt: &AttemptRecord,
    thresholds: &MasteryThresholds,
) -> Result<MasteryState> {
    let current = match state {
        Some(s) => {
            s.validate()?;
            s.clone()
        }
        None => MasteryState::default(),
    };

    let attempts = current.attempts.saturating_add(1);
    let correct_attempts = if attempt.is_correct {
        current.correct_attempts.saturating_add(1)
    } else {
        current.correct_attempts
    };

    let last_attempt_at = match current.last_attempt_at {
        Some(previous) if previous > attempt.timestamp => Some(previous),
        _ => Some(attempt.timestamp),
    };

    let mut mastery_level = mastery_level_for(attempts, correct_attempts, thresholds);
    if !attempt.is_correct {
        let previous =
            mastery_level_for(current.attempts, current.correct_attempts, thresholds);
        mastery_level = mastery_level.min(previous);
    }

    Ok(MasteryState {
        attempts,
        correct_attempts,
        last_attempt_at,
        mastery_level,
    })
}

/// Fold a sequence of attempts, in submission order.
pub fn record_attempts<'a>(
    state: Option<&MasteryState>,
    attempts: impl IntoIterator<Item = &'a AttemptRecord>,
    thresholds: &MasteryThresholds,
) -> Result<Option<MasteryState>> {
    let mut current = state.cloned();
    for attempt in attempts {
        current = Some(record_attempt(current.as_ref(), attempt, thresholds)?);
    }
    Ok(current)
}

/// Recompute the cached level of a stored state.
pub fn recompute_level(
    state: &MasteryState,
    thresholds: &MasteryThresholds,
) -> Result<MasteryState> {
    state.validate()?;
    Ok(MasteryState {
        mastery_level: mastery_level_for(state.attempts, state.correct_attempts, thresholds),
        ..state.clone()
    })
}

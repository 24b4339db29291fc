//! Engine configuration.
//!
//! [`EngineConfig`] holds the defaults for every component. A caller (one
//! game mode, one assignment) may override parts of it with
//! [`EngineOverrides`]; [`EngineConfig::merge`] resolves the effective values.

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeConfig;
use crate::mastery::MasteryThresholds;
use crate::matching::{GradingConfig, MatchingMode};
use crate::reward::{RarityThresholds, RewardConfig};
use crate::scheduler::SchedulerConfig;
use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scheduler: SchedulerConfig,
    pub mastery: MasteryThresholds,
    pub reward: RewardConfig,
    pub grading: GradingConfig,
    pub challenge: ChallengeConfig,
}

/// Per-caller overrides. Unset fields fall back to the global config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOverrides {
    pub target_session_difficulty: Option<Difficulty>,
    pub mastery: Option<MasteryThresholds>,
    pub rarity_thresholds: Option<RarityThresholds>,
    pub matching_mode: Option<MatchingMode>,
    pub fuzzy_threshold: Option<f64>,
    pub min_sentence_coverage: Option<f64>,
    pub max_distractors: Option<usize>,
}

impl EngineConfig {
    /// Effective config for one caller.
    pub fn merge(global: &EngineConfig, overrides: Option<&EngineOverrides>) -> Self {
        match overrides {
            Some(o) => Self {
                scheduler: SchedulerConfig {
                    target_session_difficulty: o
                        .target_session_difficulty
                        .or(global.scheduler.target_session_difficulty),
                    ..global.scheduler.clone()
                },
                mastery: o.mastery.unwrap_or(global.mastery),
                reward: RewardConfig {
                    rarity_thresholds: o
                        .rarity_thresholds
                        .unwrap_or(global.reward.rarity_thresholds),
                    ..global.reward.clone()
                },
                grading: GradingConfig {
                    matching_mode: o.matching_mode.unwrap_or(global.grading.matching_mode),
                    fuzzy_threshold: o.fuzzy_threshold.unwrap_or(global.grading.fuzzy_threshold),
                    min_sentence_coverage: o
                        .min_sentence_coverage
                        .unwrap_or(global.grading.min_sentence_coverage),
                },
                challenge: ChallengeConfig {
                    max_distractors: o.max_distractors.unwrap_or(global.challenge.max_distractors),
                },
            },
            None => global.clone(),
        }
    }
}

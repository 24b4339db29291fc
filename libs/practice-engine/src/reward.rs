//! XP and gem rewards for graded attempts.

use serde::{Deserialize, Serialize};

use crate::types::{AttemptRecord, Difficulty, GemRarity, RewardOutcome, VerbClass};

/// Minimum XP for each rarity above common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityThresholds {
    pub uncommon: u32,
    pub rare: u32,
    pub epic: u32,
    pub legendary: u32,
}

impl Default for RarityThresholds {
    fn default() -> Self {
        Self {
            uncommon: 8,
            rare: 15,
            epic: 25,
            legendary: 40,
        }
    }
}

impl RarityThresholds {
    pub fn rarity_for(&self, xp: u32) -> GemRarity {
        if xp >= self.legendary {
            GemRarity::Legendary
        } else if xp >= self.epic {
            GemRarity::Epic
        } else if xp >= self.rare {
            GemRarity::Rare
        } else if xp >= self.uncommon {
            GemRarity::Uncommon
        } else {
            GemRarity::Common
        }
    }
}

/// Streak length from which a multiplier applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakBonus {
    pub min_streak: u32,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    pub base_xp_beginner: u32,
    pub base_xp_intermediate: u32,
    pub base_xp_advanced: u32,
    /// The reached bonus with the highest `min_streak` applies.
    pub streak_bonuses: Vec<StreakBonus>,
    pub rarity_thresholds: RarityThresholds,
    /// Cap rarity by verb class and difficulty (see [`max_rarity_for`]).
    #[serde(default)]
    pub cap_by_target: bool,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            base_xp_beginner: 5,
            base_xp_intermediate: 8,
            base_xp_advanced: 12,
            streak_bonuses: vec![
                StreakBonus {
                    min_streak: 5,
                    multiplier: 1.5,
                },
                StreakBonus {
                    min_streak: 3,
                    multiplier: 1.2,
                },
            ],
            rarity_thresholds: RarityThresholds::default(),
            cap_by_target: false,
        }
    }
}

impl RewardConfig {
    pub fn base_xp(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Beginner => self.base_xp_beginner,
            Difficulty::Intermediate => self.base_xp_intermediate,
            Difficulty::Advanced => self.base_xp_advanced,
        }
    }

    pub fn streak_multiplier(&self, streak: u32) -> f64 {
        self.streak_bonuses
            .iter()
            .filter(|bonus| streak >= bonus.min_streak)
            .max_by_key(|bonus| bonus.min_streak)
            .map_or(1.0, |bonus| bonus.multiplier)
    }
}

/// What the reward depends on besides the attempt itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardContext {
    /// Consecutive correct answers before this attempt.
    pub current_streak: u32,
    pub item_difficulty: Difficulty,
    /// Highest rarity this target may award. `None` is uncapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rarity: Option<GemRarity>,
}

/// Compute the reward for one attempt. Incorrect attempts earn nothing.
pub fn compute_reward(
    attempt: &AttemptRecord,
    context: &RewardContext,
    config: &RewardConfig,
) -> RewardOutcome {
    if !attempt.is_correct {
        return RewardOutcome::none();
    }

    let base = config.base_xp(context.item_difficulty) as f64;
    let xp_awarded = (base * config.streak_multiplier(context.current_streak)).round() as u32;

    let mut rarity = config.rarity_thresholds.rarity_for(xp_awarded);
    if let Some(cap) = context.max_rarity {
        rarity = rarity.min(cap);
    }
    if attempt.hint_used {
        rarity = GemRarity::Common;
    }

    RewardOutcome {
        gem_rarity: Some(rarity),
        xp_awarded,
    }
}

/// Rarity cap for a target: the verb class when known, else its difficulty.
pub fn max_rarity_for(difficulty: Difficulty, verb_class: Option<VerbClass>) -> GemRarity {
    match (verb_class, difficulty) {
        (Some(VerbClass::Irregular), _) => GemRarity::Epic,
        (Some(VerbClass::StemChanging), _) => GemRarity::Rare,
        (_, Difficulty::Advanced) => GemRarity::Rare,
        (_, Difficulty::Intermediate) => GemRarity::Uncommon,
        (_, Difficulty::Beginner) => GemRarity::Common,
    }
}

/// Consecutive correct attempts at the end of `attempts`.
pub fn current_streak(attempts: &[AttemptRecord]) -> u32 {
    attempts.iter().rev().take_while(|a| a.is_correct).count() as u32
}

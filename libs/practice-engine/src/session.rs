//! Practice session: grade, track and reward a stream of answers.
//!
//! A [`PracticeSession`] owns one learner's mastery slice for the duration
//! of a session. The caller loads the slice, submits answers in order and
//! persists [`PracticeSession::into_states`] afterwards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::challenge::{Challenge, ChallengeKind, Grading};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::mastery::record_attempt;
use crate::reward::{compute_reward, max_rarity_for, RewardContext};
use crate::scheduler::select_next_batch;
use crate::types::{AttemptRecord, ItemId, MasteryState, RewardOutcome};

/// Everything produced by one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptOutcome {
    pub attempt: AttemptRecord,
    pub grading: Grading,
    pub mastery: MasteryState,
    pub reward: RewardOutcome,
}

#[derive(Debug, Clone)]
pub struct PracticeSession<'a> {
    config: EngineConfig,
    catalog: &'a Catalog,
    states: HashMap<ItemId, MasteryState>,
    attempts: Vec<AttemptRecord>,
    streak: u32,
}

impl<'a> PracticeSession<'a> {
    pub fn new(
        config: EngineConfig,
        catalog: &'a Catalog,
        states: HashMap<ItemId, MasteryState>,
    ) -> Self {
        Self {
            config,
            catalog,
            states,
            attempts: Vec::new(),
            streak: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self, target_id: &ItemId) -> Option<&MasteryState> {
        self.states.get(target_id)
    }

    pub fn states(&self) -> &HashMap<ItemId, MasteryState> {
        &self.states
    }

    /// Attempts submitted in this session, oldest first.
    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Grade `answer` against `challenge` and apply it to `target_id`.
    ///
    /// The reward follows the catalog difficulty of `target_id`, or the
    /// challenge difficulty for targets outside the catalog (conjugations).
    /// The session is left untouched when the stored state is invalid.
    pub fn submit(
        &mut self,
        challenge: &Challenge,
        target_id: &ItemId,
        answer: &str,
        response_time_ms: u64,
        hint_used: bool,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome> {
        let grading = challenge.grade(answer, self.catalog, &self.config.grading);
        let attempt = AttemptRecord {
            target_id: target_id.clone(),
            student_answer: answer.to_string(),
            is_correct: grading.credits(target_id),
            response_time_ms,
            hint_used,
            timestamp: now,
        };

        let (mastery, reward) = self.settle(challenge, &attempt)?;
        self.streak = if attempt.is_correct { self.streak + 1 } else { 0 };
        Ok(self.commit(challenge, attempt, grading, mastery, reward))
    }

    /// Grade a free-text answer once and record one attempt per target.
    ///
    /// Each target is correct when the answer used it. Every reward uses the
    /// streak from before the submission, and the streak then moves once:
    /// up when every target was used, otherwise back to zero. Nothing is
    /// recorded if any target's stored state is invalid.
    pub fn submit_sentence(
        &mut self,
        challenge: &Challenge,
        answer: &str,
        response_time_ms: u64,
        hint_used: bool,
        now: DateTime<Utc>,
    ) -> Result<Vec<AttemptOutcome>> {
        if !matches!(challenge.kind, ChallengeKind::FreeText(_)) {
            return Err(EngineError::NotFreeText {
                id: challenge.id.to_string(),
            });
        }

        let grading = challenge.grade(answer, self.catalog, &self.config.grading);
        let mut settled = Vec::new();
        for target_id in challenge.targets() {
            let attempt = AttemptRecord {
                target_id: target_id.clone(),
                student_answer: answer.to_string(),
                is_correct: grading.credits(target_id),
                response_time_ms,
                hint_used,
                timestamp: now,
            };
            let (mastery, reward) = self.settle(challenge, &attempt)?;
            settled.push((attempt, mastery, reward));
        }

        self.streak = if grading.is_correct() { self.streak + 1 } else { 0 };
        Ok(settled
            .into_iter()
            .map(|(attempt, mastery, reward)| {
                self.commit(challenge, attempt, grading.clone(), mastery, reward)
            })
            .collect())
    }

    /// Next items to practice given the session's current states.
    pub fn next_batch(&self, batch_size: usize, now: DateTime<Utc>) -> Vec<ItemId> {
        select_next_batch(
            &self.states,
            self.catalog.items(),
            batch_size,
            now,
            &self.config.scheduler,
        )
    }

    /// Hand the updated states back for persistence.
    pub fn into_states(self) -> HashMap<ItemId, MasteryState> {
        self.states
    }

    /// New mastery and reward for `attempt`, without touching the session.
    fn settle(
        &self,
        challenge: &Challenge,
        attempt: &AttemptRecord,
    ) -> Result<(MasteryState, RewardOutcome)> {
        let mastery = record_attempt(
            self.states.get(&attempt.target_id),
            attempt,
            &self.config.mastery,
        )?;

        let item_difficulty = self
            .catalog
            .get(&attempt.target_id)
            .map_or(challenge.difficulty, |item| item.difficulty);
        let verb_class = match &challenge.kind {
            ChallengeKind::Conjugation(c) => Some(c.verb_class),
            ChallengeKind::SentenceGap(_) | ChallengeKind::FreeText(_) => None,
        };
        let context = RewardContext {
            current_streak: self.streak,
            item_difficulty,
            max_rarity: self
                .config
                .reward
                .cap_by_target
                .then(|| max_rarity_for(item_difficulty, verb_class)),
        };
        let reward = compute_reward(attempt, &context, &self.config.reward);

        Ok((mastery, reward))
    }

    fn commit(
        &mut self,
        challenge: &Challenge,
        attempt: AttemptRecord,
        grading: Grading,
        mastery: MasteryState,
        reward: RewardOutcome,
    ) -> AttemptOutcome {
        self.states.insert(attempt.target_id.clone(), mastery.clone());
        self.attempts.push(attempt.clone());

        tracing::debug!(
            target_id = %attempt.target_id,
            challenge_id = %challenge.id,
            correct = attempt.is_correct,
            mastery_level = mastery.mastery_level.to_value(),
            xp = reward.xp_awarded,
            streak = self.streak,
            "attempt submitted"
        );

        AttemptOutcome {
            attempt,
            grading,
            mastery,
            reward,
        }
    }
}

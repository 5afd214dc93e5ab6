//! Per-floor scoring
//!
//! The goal only accepts the player once the required item has been picked
//! up. Finishing quickly earns a time bonus on top of the completion score.

use serde::{Deserialize, Serialize};

/// Point values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub required_item: u64,
    pub bonus_item: u64,
    pub level_complete: u64,
    /// Finishing under this many seconds earns a time bonus
    pub time_bonus_threshold_secs: f32,
    pub time_bonus_per_second: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            required_item: 100,
            bonus_item: 250,
            level_complete: 500,
            time_bonus_threshold_secs: 30.0,
            time_bonus_per_second: 10.0,
        }
    }
}

impl ScoreTuning {
    /// Time bonus for finishing in `elapsed_secs` (zero at or past the threshold)
    pub fn time_bonus(&self, elapsed_secs: f32) -> u64 {
        if elapsed_secs < self.time_bonus_threshold_secs {
            ((self.time_bonus_threshold_secs - elapsed_secs.max(0.0)) * self.time_bonus_per_second)
                .floor() as u64
        } else {
            0
        }
    }
}

/// Result of the player touching the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Goal refused: the required item has not been collected yet
    MissingRequiredItem,
    /// Floor cleared, `points` were added (completion plus time bonus)
    Completed { points: u64 },
    /// Floor was already cleared; nothing changes
    AlreadyCompleted,
}

/// Score and pickups for one floor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorProgress {
    /// Score carried in from earlier floors plus this floor's points
    pub score: u64,
    pub has_required_item: bool,
    pub bonus_collected: u32,
    pub completed: bool,
}

impl FloorProgress {
    /// Start a floor with the score carried over from the previous one
    pub fn new(carried_score: u64) -> Self {
        Self {
            score: carried_score,
            ..Default::default()
        }
    }

    /// Pick up the required item; only the first pickup scores
    pub fn collect_required(&mut self, tuning: &ScoreTuning) -> u64 {
        if self.has_required_item {
            return 0;
        }
        self.has_required_item = true;
        self.score += tuning.required_item;
        tuning.required_item
    }

    pub fn collect_bonus(&mut self, tuning: &ScoreTuning) -> u64 {
        self.bonus_collected += 1;
        self.score += tuning.bonus_item;
        tuning.bonus_item
    }

    pub fn reach_goal(&mut self, tuning: &ScoreTuning, elapsed_secs: f32) -> GoalOutcome {
        if self.completed {
            return GoalOutcome::AlreadyCompleted;
        }
        if !self.has_required_item {
            return GoalOutcome::MissingRequiredItem;
        }
        self.completed = true;
        let points = tuning.level_complete + tuning.time_bonus(elapsed_secs);
        self.score += points;
        GoalOutcome::Completed { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_requires_item() {
        let tuning = ScoreTuning::default();
        let mut floor = FloorProgress::new(0);
        assert_eq!(floor.reach_goal(&tuning, 10.0), GoalOutcome::MissingRequiredItem);
        assert_eq!(floor.score, 0);
        assert!(!floor.completed);
    }

    #[test]
    fn test_full_floor_with_time_bonus() {
        let tuning = ScoreTuning::default();
        let mut floor = FloorProgress::new(1000);
        assert_eq!(floor.collect_required(&tuning), 100);
        assert_eq!(floor.collect_required(&tuning), 0);
        floor.collect_bonus(&tuning);
        floor.collect_bonus(&tuning);
        assert_eq!(floor.bonus_collected, 2);

        // 500 + floor((30 - 12.25) * 10) = 500 + 177
        assert_eq!(
            floor.reach_goal(&tuning, 12.25),
            GoalOutcome::Completed { points: 677 }
        );
        assert_eq!(floor.score, 1000 + 100 + 2 * 250 + 677);
        assert_eq!(floor.reach_goal(&tuning, 13.0), GoalOutcome::AlreadyCompleted);
    }

    #[test]
    fn test_no_time_bonus_when_slow() {
        let tuning = ScoreTuning::default();
        assert_eq!(tuning.time_bonus(30.0), 0);
        assert_eq!(tuning.time_bonus(95.0), 0);
        assert_eq!(tuning.time_bonus(0.0), 300);
    }
}

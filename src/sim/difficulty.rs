//! Per-floor difficulty scaling
//!
//! Every knob grows linearly from floor 1 and stops at its cap. The table is
//! the only tuning surface the level generator reads its scaling from.

use serde::{Deserialize, Serialize};

/// Linear-with-cap scaling: `min(base + (floor - 1) * per_floor, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    pub base: f32,
    pub per_floor: f32,
    pub max: f32,
}

impl Scaling {
    pub const fn new(base: f32, per_floor: f32, max: f32) -> Self {
        Self {
            base,
            per_floor,
            max,
        }
    }

    /// Continuous value at `floor` (floors below 1 read as floor 1)
    pub fn value(&self, floor: u32) -> f32 {
        let steps = floor.max(1) - 1;
        (self.base + steps as f32 * self.per_floor).min(self.max)
    }

    /// Whole-number value at `floor`, rounded down and never negative
    pub fn count(&self, floor: u32) -> usize {
        self.value(floor).floor().max(0.0) as usize
    }
}

/// Independent scaling for every difficulty knob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub arena_width: Scaling,
    pub arena_height: Scaling,
    pub pursuer_count: Scaling,
    pub pursuer_speed: Scaling,
    pub obstacle_count: Scaling,
    /// Chance that an obstacle is a tall wall rather than a wide platform
    pub tall_chance: Scaling,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            arena_width: Scaling::new(850.0, 15.0, 980.0),
            arena_height: Scaling::new(600.0, 15.0, 720.0),
            // One more wolf every two floors
            pursuer_count: Scaling::new(3.0, 0.5, 8.0),
            pursuer_speed: Scaling::new(1.0, 0.02, 1.4),
            obstacle_count: Scaling::new(3.0, 0.5, 10.0),
            tall_chance: Scaling::new(0.3, 0.05, 0.6),
        }
    }
}

impl DifficultyTable {
    /// Evaluate every knob for one floor
    pub fn profile(&self, floor: u32) -> DifficultyProfile {
        DifficultyProfile {
            floor: floor.max(1),
            arena_width: self.arena_width.value(floor),
            arena_height: self.arena_height.value(floor),
            pursuer_count: self.pursuer_count.count(floor),
            pursuer_speed_multiplier: self.pursuer_speed.value(floor),
            obstacle_count: self.obstacle_count.count(floor),
            tall_chance: self.tall_chance.value(floor).clamp(0.0, 1.0),
        }
    }

    /// Named view of each scaling, for validation and reporting
    pub fn entries(&self) -> [(&'static str, &Scaling); 6] {
        [
            ("arena_width", &self.arena_width),
            ("arena_height", &self.arena_height),
            ("pursuer_count", &self.pursuer_count),
            ("pursuer_speed", &self.pursuer_speed),
            ("obstacle_count", &self.obstacle_count),
            ("tall_chance", &self.tall_chance),
        ]
    }
}

/// Difficulty knobs resolved for a single floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub floor: u32,
    pub arena_width: f32,
    pub arena_height: f32,
    pub pursuer_count: usize,
    pub pursuer_speed_multiplier: f32,
    pub obstacle_count: usize,
    pub tall_chance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pursuer_count_scenarios() {
        let table = DifficultyTable::default();
        assert_eq!(table.profile(1).pursuer_count, 3);
        assert_eq!(table.profile(2).pursuer_count, 3);
        assert_eq!(table.profile(3).pursuer_count, 4);
        assert_eq!(table.profile(5).pursuer_count, 5);
        assert_eq!(table.profile(11).pursuer_count, 8);
        assert_eq!(table.profile(500).pursuer_count, 8);
    }

    #[test]
    fn test_floor_one_is_base() {
        let p = DifficultyTable::default().profile(1);
        assert_eq!(p.arena_width, 850.0);
        assert_eq!(p.arena_height, 600.0);
        assert_eq!(p.obstacle_count, 3);
        assert!((p.pursuer_speed_multiplier - 1.0).abs() < f32::EPSILON);
        assert!((p.tall_chance - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_floor_zero_reads_as_floor_one() {
        let table = DifficultyTable::default();
        assert_eq!(table.profile(0), table.profile(1));
    }

    #[test]
    fn test_caps_reached() {
        let p = DifficultyTable::default().profile(100);
        assert_eq!(p.arena_width, 980.0);
        assert_eq!(p.arena_height, 720.0);
        assert_eq!(p.obstacle_count, 10);
        assert!((p.pursuer_speed_multiplier - 1.4).abs() < 1e-6);
        assert!((p.tall_chance - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_negative_base_count_clamps_to_zero() {
        let s = Scaling::new(-2.0, 0.5, 4.0);
        assert_eq!(s.count(1), 0);
        assert_eq!(s.count(9), 2);
    }

    proptest! {
        #[test]
        fn difficulty_is_monotone_and_capped(floor in 1u32..200) {
            let table = DifficultyTable::default();
            let a = table.profile(floor);
            let b = table.profile(floor + 1);

            prop_assert!(b.arena_width >= a.arena_width);
            prop_assert!(b.arena_height >= a.arena_height);
            prop_assert!(b.pursuer_count >= a.pursuer_count);
            prop_assert!(b.obstacle_count >= a.obstacle_count);
            prop_assert!(b.pursuer_speed_multiplier >= a.pursuer_speed_multiplier);
            prop_assert!(b.tall_chance >= a.tall_chance);

            prop_assert!(a.arena_width <= table.arena_width.max);
            prop_assert!(a.arena_height <= table.arena_height.max);
            prop_assert!(a.pursuer_count as f32 <= table.pursuer_count.max);
            prop_assert!(a.obstacle_count as f32 <= table.obstacle_count.max);
            prop_assert!(a.pursuer_speed_multiplier <= table.pursuer_speed.max);
            prop_assert!(a.tall_chance <= table.tall_chance.max);
        }
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic the host relies on lives here. This module must be pure
//! and deterministic:
//! - Randomness only through a caller-supplied `Rng`
//! - Time only through the `now_ms` the host passes to `tick`
//! - Stable iteration order (insertion order for the pack)
//! - No rendering, physics or platform dependencies

pub mod difficulty;
pub mod geometry;
pub mod level;
pub mod pack;
pub mod pursuit;
pub mod scoring;
pub mod steering;

pub use difficulty::{DifficultyProfile, DifficultyTable, Scaling};
pub use geometry::Rect;
pub use level::{
    BonusZone, LevelGenerator, LevelSpec, LevelTuning, Obstacle, Orientation, PlacementReport,
    level_name,
};
pub use pack::{AgentId, PursuerAgent, Role, assign_roles, chaser_count};
pub use pursuit::{PackTuning, PlayerState, PursuitCoordinator};
pub use scoring::{FloorProgress, GoalOutcome, ScoreTuning};
pub use steering::steer;

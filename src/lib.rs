//! Pack Run - procedural chase levels and wolf-pack pursuit
//!
//! Core modules:
//! - `sim`: Deterministic simulation core (level generation, pack AI, scoring)
//! - `tuning`: Data-driven game balance, loadable from JSON
//! - `error`: Configuration errors
//!
//! Rendering, input, audio and the physics step that actually moves bodies
//! belong to the host. This crate hands it level geometry and target points.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for headless runs (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Pack retargeting interval (milliseconds of simulation time)
    pub const RECALC_INTERVAL_MS: f64 = 500.0;
    /// Minimum distance pursuers try to keep between each other
    pub const MIN_PACK_SPACING: f32 = 80.0;
    /// Pursuer body size (square, pixels)
    pub const PURSUER_SIZE: f32 = 36.0;
    /// Pursuer base speed before the floor multiplier (pixels/s)
    pub const PURSUER_SPEED: f32 = 220.0;
    /// Distance at which a pursuer stops instead of jittering on its target
    pub const ARRIVE_THRESHOLD: f32 = 5.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 280.0;
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Player collects an item when its centre gets this close
    pub const PICKUP_RADIUS: f32 = 24.0;

    /// Bonus items per floor (one per bonus zone)
    pub const BONUS_ITEM_COUNT: usize = 3;

    /// Placement retry budgets
    pub const OBSTACLE_ATTEMPTS: u32 = 50;
    pub const ITEM_ATTEMPTS: u32 = 100;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_polar_roundtrip_heading() {
        let v = polar_to_cartesian(10.0, PI / 3.0);
        let (r, theta) = cartesian_to_polar(v);
        assert!((r - 10.0).abs() < 1e-4);
        assert!((theta - PI / 3.0).abs() < 1e-5);
    }
}

//! Wolf-pack pursuit coordination
//!
//! The coordinator owns the pack and, on a fixed interval, hands every agent
//! a target point: chasers run at the player, flankers fan out to cut the
//! player off. Targets are nudged apart so the pack does not bunch up and
//! are always clamped inside the arena. Moving the agents is the host's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::geometry::Rect;
use super::level::LevelSpec;
use super::pack::{AgentId, PursuerAgent, Role, assign_roles, chaser_count};
use super::steering::steer;
use crate::consts::*;
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Read-only view of the player, refreshed by the host every tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl PlayerState {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// Pack behaviour tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackTuning {
    /// Minimum simulation time between target recomputations
    pub recalc_interval_ms: f64,
    /// How far ahead flankers predict the player (seconds)
    pub prediction_horizon: f32,
    /// Lead applied to chaser targets (seconds)
    pub chase_lead: f32,
    /// Below this speed the player counts as standing still
    pub moving_threshold: f32,
    pub flank_distance: f32,
    /// Angle between the heading and each side flank (degrees)
    pub flank_spread_deg: f32,
    /// Far intercept distance as a multiple of `flank_distance`
    pub intercept_factor: f32,
    /// Retreat cut-off distance as a multiple of `flank_distance`
    pub cutoff_factor: f32,
    pub surround_radius: f32,
    pub surround_start_deg: f32,
    /// Ring radius for flankers beyond the four flank points
    pub extra_flanker_radius: f32,
    pub min_pack_spacing: f32,
    /// Agent body size; targets stay half of it away from the walls
    pub agent_size: f32,
    pub base_speed: f32,
    pub chaser_speed_scale: f32,
    pub flanker_speed_scale: f32,
    pub arrive_threshold: f32,
}

impl Default for PackTuning {
    fn default() -> Self {
        Self {
            recalc_interval_ms: RECALC_INTERVAL_MS,
            prediction_horizon: 0.5,
            chase_lead: 0.2,
            moving_threshold: 50.0,
            flank_distance: 200.0,
            flank_spread_deg: 60.0,
            intercept_factor: 1.5,
            cutoff_factor: 0.8,
            surround_radius: 180.0,
            surround_start_deg: 45.0,
            extra_flanker_radius: 150.0,
            min_pack_spacing: MIN_PACK_SPACING,
            agent_size: PURSUER_SIZE,
            base_speed: PURSUER_SPEED,
            chaser_speed_scale: 1.0,
            flanker_speed_scale: 1.0,
            arrive_threshold: ARRIVE_THRESHOLD,
        }
    }
}

impl PackTuning {
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.agent_size * 0.5
    }
}

/// The four flank points for one recomputation.
///
/// A moving player gets left and right flanks around the predicted position,
/// a far intercept straight ahead of it and a cut-off behind the current
/// position. A stationary player gets surrounded on a circle.
pub fn flank_targets(tuning: &PackTuning, player: &PlayerState, predicted: Vec2) -> [Vec2; 4] {
    let (speed, heading) = cartesian_to_polar(player.velocity);

    if speed > tuning.moving_threshold {
        let d = tuning.flank_distance;
        let spread = tuning.flank_spread_deg.to_radians();
        [
            predicted + polar_to_cartesian(d, heading + spread),
            predicted + polar_to_cartesian(d, heading - spread),
            predicted + polar_to_cartesian(d * tuning.intercept_factor, heading),
            player.position - polar_to_cartesian(d * tuning.cutoff_factor, heading),
        ]
    } else {
        let start = tuning.surround_start_deg.to_radians();
        let r = tuning.surround_radius;
        std::array::from_fn(|i| {
            player.position + polar_to_cartesian(r, start + i as f32 * FRAC_PI_2)
        })
    }
}

/// Owns the pack for one level and retargets it on a fixed cadence
#[derive(Debug, Clone)]
pub struct PursuitCoordinator {
    tuning: PackTuning,
    bounds: Rect,
    /// Insertion order; roles derive from it
    agents: Vec<PursuerAgent>,
    player: Option<PlayerState>,
    /// Simulation time of the last recompute; the clock starts at zero
    last_recalc_ms: f64,
    speed_multiplier: f32,
    next_id: AgentId,
}

impl PursuitCoordinator {
    pub fn new(tuning: PackTuning, bounds: Rect) -> Self {
        Self {
            tuning,
            bounds,
            agents: Vec::new(),
            player: None,
            last_recalc_ms: 0.0,
            speed_multiplier: 1.0,
            next_id: 1,
        }
    }

    /// Coordinator for a generated floor with the pack already spawned
    pub fn for_level(level: &LevelSpec, tuning: PackTuning) -> Self {
        let mut coordinator = Self::new(tuning, level.bounds());
        coordinator.speed_multiplier = level.pursuer_speed_multiplier;
        for &spawn in &level.pursuer_spawns {
            coordinator.add_agent(spawn);
        }
        coordinator
    }

    pub fn tuning(&self) -> &PackTuning {
        &self.tuning
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn agents(&self) -> &[PursuerAgent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&PursuerAgent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn player(&self) -> Option<&PlayerState> {
        self.player.as_ref()
    }

    pub fn last_recalc_ms(&self) -> f64 {
        self.last_recalc_ms
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
    }

    /// Add a pursuer at `spawn` and re-derive roles. Its initial target is the
    /// spawn clamped into the inset bounds.
    pub fn add_agent(&mut self, spawn: Vec2) -> AgentId {
        let id = self.next_id;
        self.next_id += 1;
        let mut agent = PursuerAgent::new(id, spawn);
        agent.target_position = self.bounds.clamp_inset(spawn, self.tuning.half_size());
        self.agents.push(agent);
        assign_roles(&mut self.agents);
        id
    }

    /// Remove a pursuer and re-derive roles for the rest of the pack
    pub fn remove_agent(&mut self, id: AgentId) -> Option<PursuerAgent> {
        let index = self.agents.iter().position(|a| a.id == id)?;
        let removed = self.agents.remove(index);
        assign_roles(&mut self.agents);
        Some(removed)
    }

    /// Record where the host's physics step put an agent
    pub fn set_agent_position(&mut self, id: AgentId, position: Vec2) -> bool {
        match self.agents.iter_mut().find(|a| a.id == id) {
            Some(agent) => {
                agent.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_player(&mut self, player: PlayerState) {
        self.player = Some(player);
    }

    pub fn clear_player(&mut self) {
        self.player = None;
    }

    /// Advance the coordinator to `now_ms`.
    ///
    /// Returns true when targets were recomputed. Without a player or with
    /// an empty pack this is a no-op and does not consume the interval.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        if self.agents.is_empty() {
            return false;
        }

        if now_ms - self.last_recalc_ms < self.tuning.recalc_interval_ms {
            return false;
        }

        self.recalculate(&player);
        self.last_recalc_ms = now_ms;
        true
    }

    fn recalculate(&mut self, player: &PlayerState) {
        let t = &self.tuning;
        let predicted = player.position + player.velocity * t.prediction_horizon;
        let flanks = flank_targets(t, player, predicted);
        let chase = player.position + player.velocity * t.chase_lead;

        let flanker_total = self.agents.len() - chaser_count(self.agents.len());
        let mut flanker_index = 0usize;

        for agent in &mut self.agents {
            agent.target_position = match agent.role {
                Role::Chaser => chase,
                Role::Flanker => {
                    let target = match flanks.get(flanker_index) {
                        Some(&flank) => flank,
                        None => {
                            // Spread the overflow evenly around the prediction
                            let angle = flanker_index as f32 / flanker_total as f32 * TAU;
                            predicted + polar_to_cartesian(t.extra_flanker_radius, angle)
                        }
                    };
                    flanker_index += 1;
                    target
                }
            };
        }

        self.apply_spacing();
        self.clamp_targets();

        log::trace!(
            "Pack retargeted: {} agents, player {:?} -> predicted {:?}",
            self.agents.len(),
            player.position,
            predicted
        );
    }

    /// Push targets of crowded pairs apart along the line between their
    /// current positions, half the spacing deficit each.
    fn apply_spacing(&mut self) {
        let min_spacing = self.tuning.min_pack_spacing;
        let mut pushes = vec![Vec2::ZERO; self.agents.len()];

        for i in 0..self.agents.len() {
            for j in (i + 1)..self.agents.len() {
                let delta = self.agents[j].position - self.agents[i].position;
                let distance = delta.length();
                if distance > 0.0 && distance < min_spacing {
                    let push = delta / distance * ((min_spacing - distance) / 2.0);
                    pushes[i] -= push;
                    pushes[j] += push;
                }
            }
        }

        for (agent, push) in self.agents.iter_mut().zip(pushes) {
            agent.target_position += push;
        }
    }

    fn clamp_targets(&mut self) {
        let inset = self.tuning.half_size();
        for agent in &mut self.agents {
            agent.target_position = self.bounds.clamp_inset(agent.target_position, inset);
        }
    }

    /// Movement speed for a role at the current floor multiplier
    pub fn agent_speed(&self, role: Role) -> f32 {
        let scale = match role {
            Role::Chaser => self.tuning.chaser_speed_scale,
            Role::Flanker => self.tuning.flanker_speed_scale,
        };
        self.tuning.base_speed * self.speed_multiplier * scale
    }

    /// Velocity each agent should be given this tick
    pub fn steering_commands(&self) -> Vec<(AgentId, Vec2)> {
        self.agents
            .iter()
            .map(|agent| {
                let speed = self.agent_speed(agent.role);
                (agent.id, steer(agent, speed, self.tuning.arrive_threshold))
            })
            .collect()
    }
}

//! Pack members and role assignment

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of pack members that chase directly; everyone else flanks
pub const MAX_CHASERS: usize = 2;

/// Stable identity of a pursuer within one level
pub type AgentId = u32;

/// Pursuer behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Runs at the player's (slightly led) position
    Chaser,
    /// Heads for an interception or surround point
    Flanker,
}

/// A pursuer as the coordinator sees it: plain data, no body attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuerAgent {
    pub id: AgentId,
    /// Last position reported by the host's physics step
    pub position: Vec2,
    pub role: Role,
    /// Where the agent is currently steering to
    pub target_position: Vec2,
}

impl PursuerAgent {
    /// New agent standing on its spawn point, targeting it
    pub fn new(id: AgentId, spawn: Vec2) -> Self {
        Self {
            id,
            position: spawn,
            role: Role::Chaser,
            target_position: spawn,
        }
    }

    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target_position)
    }
}

/// Re-derive every role from pack order: the first two chase, the rest flank
pub fn assign_roles(agents: &mut [PursuerAgent]) {
    for (index, agent) in agents.iter_mut().enumerate() {
        agent.role = if index < MAX_CHASERS {
            Role::Chaser
        } else {
            Role::Flanker
        };
    }
}

/// Chasers in a pack of `pack_size`
#[inline]
pub fn chaser_count(pack_size: usize) -> usize {
    pack_size.min(MAX_CHASERS)
}

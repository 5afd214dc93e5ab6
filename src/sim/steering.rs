//! Seek-and-stop steering for pursuers
//!
//! The host applies the returned velocity to the agent's body. Agents close
//! enough to their target are told to stop so they don't orbit it.

use glam::Vec2;

use super::pack::PursuerAgent;

/// Velocity that moves `agent` toward its target at `speed`, or zero once it
/// is within `arrive_threshold` of it.
pub fn steer(agent: &PursuerAgent, speed: f32, arrive_threshold: f32) -> Vec2 {
    let distance = agent.distance_to_target();
    if distance > arrive_threshold {
        (agent.target_position - agent.position) / distance * speed
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_at(position: Vec2, target: Vec2) -> PursuerAgent {
        let mut agent = PursuerAgent::new(1, position);
        agent.target_position = target;
        agent
    }

    #[test]
    fn test_seeks_at_full_speed() {
        let agent = agent_at(Vec2::ZERO, Vec2::new(300.0, 400.0));
        assert_eq!(agent.distance_to_target(), 500.0);
        let v = steer(&agent, 220.0, 5.0);
        assert!((v.length() - 220.0).abs() < 1e-3);
        assert!((v.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_stops_inside_arrival_threshold() {
        let agent = agent_at(Vec2::new(10.0, 10.0), Vec2::new(13.0, 14.0));
        assert_eq!(steer(&agent, 220.0, 5.0), Vec2::ZERO);
        let on_target = agent_at(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        assert_eq!(steer(&on_target, 220.0, 5.0), Vec2::ZERO);
    }

    #[test]
    fn test_just_outside_threshold_moves() {
        let agent = agent_at(Vec2::ZERO, Vec2::new(5.5, 0.0));
        assert_eq!(steer(&agent, 100.0, 5.0), Vec2::new(100.0, 0.0));
    }
}

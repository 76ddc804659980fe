//! Headless navigation stand-in.
//!
//! Реальный хост подменяет это своим path following (navmesh). Здесь -
//! прямая линия по XZ со скоростью `NavigationAgent::speed`.

use bevy::prelude::*;

use crate::components::{MovementCommand, NavigationAgent};
use crate::schedule::SimClock;

/// Один шаг к destination: (смещение, reported velocity)
///
/// Y не трогаем (плоская арена). Последний шаг не перелетает destination.
pub fn navigation_step(current: Vec3, destination: Vec3, agent: &NavigationAgent, delta: f32) -> (Vec3, Vec3) {
    let mut to_destination = destination - current;
    to_destination.y = 0.0;

    let distance = to_destination.length();
    if distance <= agent.arrive_distance || delta <= 0.0 || agent.speed <= 0.0 {
        return (Vec3::ZERO, Vec3::ZERO);
    }

    let step = (agent.speed * delta).min(distance);
    let offset = to_destination / distance * step;
    (offset, offset / delta)
}

/// Система: движение по MovementCommand (TickSet::Navigation)
pub fn follow_movement_commands(
    clock: Res<SimClock>,
    mut agents: Query<(&mut Transform, &MovementCommand, &mut NavigationAgent)>,
) {
    for (mut transform, command, mut agent) in agents.iter_mut() {
        let Some(destination) = command.destination() else {
            agent.velocity = Vec3::ZERO;
            continue;
        };

        let (offset, velocity) = navigation_step(transform.translation, destination, &agent, clock.delta);
        agent.velocity = velocity;
        if offset != Vec3::ZERO {
            transform.translation += offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_at_speed() {
        let agent = NavigationAgent::new(4.0);
        let (offset, velocity) =
            navigation_step(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), &agent, 0.25);

        assert_eq!(offset, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(velocity, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_last_step_does_not_overshoot() {
        let agent = NavigationAgent::new(4.0);
        let (offset, _) = navigation_step(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), &agent, 0.25);

        assert_eq!(offset, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_arrived_agent_reports_zero_velocity() {
        let agent = NavigationAgent::new(4.0);
        let (offset, velocity) =
            navigation_step(Vec3::ZERO, Vec3::new(0.01, 0.0, 0.0), &agent, 0.25);

        assert_eq!(offset, Vec3::ZERO);
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_vertical_offset_is_ignored() {
        let agent = NavigationAgent::new(4.0);
        let (offset, _) = navigation_step(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), &agent, 0.25);

        assert_eq!(offset, Vec3::ZERO);
    }
}

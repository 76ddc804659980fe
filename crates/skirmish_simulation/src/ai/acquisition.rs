//! TargetAcquisition для hostile агентов.

use bevy::prelude::*;

use crate::combat::CombatTarget;
use crate::components::{Dead, HostileAgent, Player};

/// Система: однократный резолв designated target по `Player` маркеру
///
/// Выполняется для hostile, заспавненных без явной цели. Если player нет
/// (или их несколько) - warning, агент остаётся без цели навсегда.
pub fn resolve_designated_targets(
    mut hostiles: Query<(Entity, &mut HostileAgent)>,
    players: Query<Entity, With<Player>>,
) {
    for (entity, mut hostile) in hostiles.iter_mut() {
        if hostile.resolved {
            continue;
        }
        hostile.resolved = true;

        match players.single() {
            Ok(player) => {
                hostile.designated = Some(player);
                crate::log(&format!(
                    "🎯 Hostile {:?} designated target: player {:?}",
                    entity, player
                ));
            }
            Err(error) => {
                crate::log_warning(&format!(
                    "Hostile {:?} has no designated target ({}), staying idle",
                    entity, error
                ));
            }
        }
    }
}

/// Система: CombatTarget hostile = designated target
///
/// Смерть/despawn цели не обрабатывается здесь: handle резолвится в "absent"
/// при каждом чтении.
pub fn acquire_hostile_targets(
    mut hostiles: Query<(&HostileAgent, &mut CombatTarget), Without<Dead>>,
) {
    for (hostile, mut target) in hostiles.iter_mut() {
        target.set_if_neq(CombatTarget(hostile.designated));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Health;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_hostile_resolves_player_once() {
        let mut world = World::new();
        let player = world.spawn((Player, Health::new(10))).id();
        let hostile = world
            .spawn((HostileAgent::new(None), Health::new(3), CombatTarget::default()))
            .id();

        world.run_system_once(resolve_designated_targets).unwrap();
        world.run_system_once(acquire_hostile_targets).unwrap();

        assert_eq!(world.get::<HostileAgent>(hostile).unwrap().designated, Some(player));
        assert!(world.get::<CombatTarget>(hostile).unwrap().is(player));

        // Второй player появился позже - резолв не повторяется
        world.spawn((Player, Health::new(10)));
        world.run_system_once(resolve_designated_targets).unwrap();
        assert_eq!(world.get::<HostileAgent>(hostile).unwrap().designated, Some(player));
    }

    #[test]
    fn test_hostile_without_player_stays_idle() {
        let mut world = World::new();
        let hostile = world
            .spawn((HostileAgent::new(None), Health::new(3), CombatTarget::default()))
            .id();

        world.run_system_once(resolve_designated_targets).unwrap();
        world.run_system_once(acquire_hostile_targets).unwrap();

        let agent = world.get::<HostileAgent>(hostile).unwrap();
        assert!(agent.resolved);
        assert_eq!(agent.designated, None);
        assert_eq!(world.get::<CombatTarget>(hostile).unwrap().get(), None);
    }

    #[test]
    fn test_injected_target_is_used_as_is() {
        let mut world = World::new();
        world.spawn((Player, Health::new(10)));
        let decoy = world.spawn(Health::new(5)).id();
        let hostile = world
            .spawn((HostileAgent::new(Some(decoy)), Health::new(3), CombatTarget::default()))
            .id();

        world.run_system_once(resolve_designated_targets).unwrap();
        world.run_system_once(acquire_hostile_targets).unwrap();

        assert!(world.get::<CombatTarget>(hostile).unwrap().is(decoy));
    }

    #[test]
    fn test_dead_hostile_is_not_retargeted() {
        let mut world = World::new();
        let player = world.spawn((Player, Health::new(10))).id();
        let hostile = world
            .spawn((HostileAgent::new(Some(player)), Dead, CombatTarget::default()))
            .id();

        world.run_system_once(acquire_hostile_targets).unwrap();

        assert_eq!(world.get::<CombatTarget>(hostile).unwrap().get(), None);
    }
}

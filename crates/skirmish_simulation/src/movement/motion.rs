//! MotionController: куда идти агенту в этот тик.

use bevy::prelude::*;

use crate::combat::engagement::engaged_target;
use crate::combat::systems::actor_lookup;
use crate::combat::{AttackProfile, CombatTarget};
use crate::components::{CombatAgent, Dead, Health, MovementCommand, Player};

/// Destination для агента
///
/// Цель есть и дальше engagement range → идём к цели.
/// Иначе (нет цели или уже в радиусе) → стоим на месте.
pub fn motion_destination(target: Option<Vec3>, engagement_range: f32, current: Vec3) -> Vec3 {
    match target {
        Some(position) if current.distance(position) > engagement_range => position,
        _ => current,
    }
}

/// Система: MotionController (TickSet::Motion)
///
/// - Мёртвые агенты всегда стоят
/// - Hostile без цели (или цель за detection range) стоит
/// - Player без цели не трогаем: последняя ground команда остаётся в силе
///
/// MovementCommand пишется только при изменении (change detection для navigation).
pub fn update_motion(
    mut agents: Query<
        (
            Entity,
            &AttackProfile,
            &CombatTarget,
            &mut MovementCommand,
            Has<Player>,
            Has<Dead>,
        ),
        With<CombatAgent>,
    >,
    actors: Query<(&Transform, Option<&Health>)>,
) {
    for (entity, profile, target, mut command, is_player, is_dead) in agents.iter_mut() {
        let Ok((transform, _)) = actors.get(entity) else {
            continue;
        };
        let current = transform.translation;

        if is_dead {
            command.set_if_neq(MovementCommand::hold(current));
            continue;
        }

        let view = engaged_target(target.get(), current, profile, |e| actor_lookup(&actors, e));
        if view.is_none() && is_player {
            continue;
        }

        let destination = motion_destination(
            view.map(|view| view.position),
            profile.attack_range,
            current,
        );
        command.set_if_neq(MovementCommand::MoveToPosition {
            target: destination,
        });
    }
}

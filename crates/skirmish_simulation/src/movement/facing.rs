//! FacingController: плавный поворот к цели.
//!
//! Forward = −Z. Вертикальная составляющая aim игнорируется (только yaw).

use bevy::prelude::*;

use crate::combat::engagement::engaged_target;
use crate::combat::{AttackProfile, CombatTarget};
use crate::components::{CombatAgent, Dead, Facing, Health, MoveDirectionMemory, NavigationAgent, Player};
use crate::schedule::SimClock;

/// Порог обновления MoveDirectionMemory (квадрат скорости)
const MOVE_DIRECTION_THRESHOLD_SQ: f32 = 0.1;

/// Yaw, смотрящий вдоль aim (None - нулевой aim в плоскости XZ)
pub fn yaw_towards(aim: Vec3) -> Option<Quat> {
    let flat = Vec3::new(aim.x, 0.0, aim.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Один шаг поворота: slerp к yaw(aim) с фактором clamp(dt · speed, 0, 1)
///
/// Нулевой aim → heading без изменений.
pub fn face_towards(aim: Vec3, heading: Quat, delta: f32, rotation_speed: f32) -> Quat {
    match yaw_towards(aim) {
        Some(goal) => heading.slerp(goal, (delta * rotation_speed).clamp(0.0, 1.0)),
        None => heading,
    }
}

/// Система: FacingController (TickSet::Facing)
///
/// - Цель есть (для hostile - в detection range) → смотрим на цель
/// - Player без цели → смотрим вдоль последнего направления движения
/// - Hostile без цели → heading не меняется
pub fn update_facing(
    clock: Res<SimClock>,
    agents: Query<
        (
            Entity,
            &AttackProfile,
            &CombatTarget,
            &NavigationAgent,
            &Facing,
            Has<Player>,
        ),
        (With<CombatAgent>, Without<Dead>),
    >,
    mut memories: Query<&mut MoveDirectionMemory>,
    mut actors: Query<(&mut Transform, Option<&Health>)>,
) {
    for (entity, profile, target, navigation, facing, is_player) in agents.iter() {
        let Ok((transform, _)) = actors.get(entity) else {
            continue;
        };
        let origin = transform.translation;

        if navigation.velocity.length_squared() > MOVE_DIRECTION_THRESHOLD_SQ {
            if let Ok(mut memory) = memories.get_mut(entity) {
                memory.direction = navigation.velocity.normalize();
            }
        }

        let view = engaged_target(target.get(), origin, profile, |e| {
            actors.get(e).ok().map(|(transform, health)| {
                (transform.translation, health.map_or(true, Health::is_alive))
            })
        });

        let aim = match view {
            Some(view) => view.position - origin,
            None if is_player => match memories.get(entity) {
                Ok(memory) => memory.direction,
                Err(_) => continue,
            },
            None => continue,
        };

        let Ok((mut transform, _)) = actors.get_mut(entity) else {
            continue;
        };
        let rotation = face_towards(aim, transform.rotation, clock.delta, facing.rotation_speed);
        if rotation != transform.rotation {
            transform.rotation = rotation;
        }
    }
}

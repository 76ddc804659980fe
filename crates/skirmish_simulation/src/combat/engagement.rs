//! Общий резолв цели для всех combat/movement систем.
//!
//! Каждое чтение CombatTarget проходит через `resolve_target`: despawned или
//! мёртвая цель → None. Detection гейт (hostile) применяется в `engaged_target`.

use bevy::prelude::*;

use crate::combat::AttackProfile;

/// Живая цель, увиденная из позиции агента в этот момент
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub entity: Entity,
    pub position: Vec3,
    pub distance: f32,
}

/// Резолв handle → живая цель
///
/// `lookup` возвращает (позиция, жив ли) или None если entity нет.
/// Entity без Health (предметы) считаются живыми пока существуют.
pub fn resolve_target(
    target: Option<Entity>,
    origin: Vec3,
    lookup: impl FnOnce(Entity) -> Option<(Vec3, bool)>,
) -> Option<TargetView> {
    let entity = target?;
    let (position, alive) = lookup(entity)?;
    if !alive {
        return None;
    }

    Some(TargetView {
        entity,
        position,
        distance: origin.distance(position),
    })
}

/// Цель с учётом detection гейта (за пределами detection range - как без цели)
pub fn engaged_target(
    target: Option<Entity>,
    origin: Vec3,
    profile: &AttackProfile,
    lookup: impl FnOnce(Entity) -> Option<(Vec3, bool)>,
) -> Option<TargetView> {
    resolve_target(target, origin, lookup).filter(|view| profile.in_detection_range(view.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;

    fn hostile_profile() -> AttackProfile {
        AttackProfile::from_config(&AgentConfig::hostile(), 1.0).unwrap()
    }

    #[test]
    fn test_absent_and_dead_targets_resolve_to_none() {
        let target = Entity::from_raw(7);

        assert_eq!(resolve_target(None, Vec3::ZERO, |_| Some((Vec3::X, true))), None);
        assert_eq!(resolve_target(Some(target), Vec3::ZERO, |_| None), None);
        assert_eq!(
            resolve_target(Some(target), Vec3::ZERO, |_| Some((Vec3::X, false))),
            None
        );
    }

    #[test]
    fn test_live_target_reports_distance() {
        let target = Entity::from_raw(7);
        let view = resolve_target(Some(target), Vec3::ZERO, |_| {
            Some((Vec3::new(3.0, 0.0, 4.0), true))
        })
        .unwrap();

        assert_eq!(view.entity, target);
        assert_eq!(view.distance, 5.0);
    }

    #[test]
    fn test_detection_gate() {
        let profile = hostile_profile();
        let target = Some(Entity::from_raw(1));

        let near = engaged_target(target, Vec3::ZERO, &profile, |_| {
            Some((Vec3::new(10.0, 0.0, 0.0), true))
        });
        let far = engaged_target(target, Vec3::ZERO, &profile, |_| {
            Some((Vec3::new(10.5, 0.0, 0.0), true))
        });

        assert!(near.is_some());
        assert!(far.is_none());
    }
}

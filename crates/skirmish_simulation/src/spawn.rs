//! Спавн агентов и сценария
//!
//! Единственное место, где AgentConfig резолвится в AttackProfile:
//! невалидный конфиг → ConfigError до появления entity в мире.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::combat::AttackProfile;
use crate::components::{
    AnimState, AnimationLibrary, CombatAgent, Facing, Health, HostileAgent, Interactable,
    MoveDirectionMemory, MovementCommand, NavigationAgent, Player, SelectController,
};
use crate::config::{AgentConfig, ConfigError, ScenarioConfig};
use crate::DeterministicRng;

/// Entities заспавненного сценария
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEntities {
    pub player: Entity,
    pub hostiles: Vec<Entity>,
}

fn resolve_agent(config: &AgentConfig, library: &AnimationLibrary) -> Result<AttackProfile, ConfigError> {
    if config.move_speed < 0.0 {
        return Err(ConfigError::NegativeValue {
            name: "move_speed",
            value: config.move_speed,
        });
    }
    AttackProfile::resolve(config, library)
}

/// Player: CombatAgent + Player + selection debounce + direction memory
pub fn spawn_player(
    world: &mut World,
    position: Vec3,
    config: &AgentConfig,
    library: AnimationLibrary,
) -> Result<Entity, ConfigError> {
    let profile = resolve_agent(config, &library)?;

    let entity = world
        .spawn((
            CombatAgent,
            Player,
            Health::new(config.max_health),
            profile,
            NavigationAgent::new(config.move_speed),
            Facing {
                rotation_speed: config.rotation_speed,
            },
            MoveDirectionMemory::default(),
            SelectController::default(),
            library,
            MovementCommand::hold(position),
            Transform::from_translation(position),
        ))
        .id();

    crate::log(&format!("🧍 Player spawned: {:?} at {:?}", entity, position));
    Ok(entity)
}

/// Hostile: CombatAgent + HostileAgent + Interactable (enemy)
///
/// `target` - injected designated target; None → резолв по `Player` в первом тике.
pub fn spawn_hostile(
    world: &mut World,
    position: Vec3,
    config: &AgentConfig,
    library: AnimationLibrary,
    target: Option<Entity>,
) -> Result<Entity, ConfigError> {
    let profile = resolve_agent(config, &library)?;

    let entity = world
        .spawn((
            CombatAgent,
            HostileAgent::new(target),
            Interactable::enemy(),
            Health::new(config.max_health),
            profile,
            NavigationAgent::new(config.move_speed),
            Facing {
                rotation_speed: config.rotation_speed,
            },
            library,
            MovementCommand::hold(position),
            Transform::from_translation(position),
        ))
        .id();

    crate::log(&format!("👹 Hostile spawned: {:?} at {:?}", entity, position));
    Ok(entity)
}

/// Item: Interactable без Health (жив, пока существует)
pub fn spawn_item(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((Interactable::item(), Transform::from_translation(position)))
        .id()
}

/// Библиотека клипов сценария (attack clip может отсутствовать)
pub fn scenario_library(config: &ScenarioConfig) -> AnimationLibrary {
    let library = AnimationLibrary::new()
        .with_clip(AnimState::Idle.as_str(), 1.0)
        .with_clip(AnimState::Walk.as_str(), 1.0);

    match config.attack_clip_length {
        Some(length) => library.with_clip(AnimState::Attack.as_str(), length),
        None => library,
    }
}

/// Player в начале координат + hostile в кольце [spawn_radius_min, spawn_radius_max]
///
/// Позиции hostile берутся из `DeterministicRng` (если ресурса нет - seed из конфига).
/// Невалидный сценарий (tick rate, кольцо спавна) → ConfigError, мир не трогаем.
pub fn spawn_scenario(world: &mut World, config: &ScenarioConfig) -> Result<ScenarioEntities, ConfigError> {
    config.validate()?;

    let positions = {
        if !world.contains_resource::<DeterministicRng>() {
            world.insert_resource(DeterministicRng::new(config.seed));
        }
        let mut rng = world.resource_mut::<DeterministicRng>();
        (0..config.hostile_count)
            .map(|_| ring_position(&mut rng.rng, config.spawn_radius_min, config.spawn_radius_max))
            .collect::<Vec<_>>()
    };

    let library = scenario_library(config);
    let player = spawn_player(world, Vec3::ZERO, &config.player, library.clone())?;

    let mut hostiles = Vec::with_capacity(positions.len());
    for position in positions {
        hostiles.push(spawn_hostile(
            world,
            position,
            &config.hostile,
            library.clone(),
            Some(player),
        )?);
    }

    crate::log_info(&format!(
        "🗺️ Scenario spawned: player {:?}, {} hostiles (seed {})",
        player,
        hostiles.len(),
        config.seed
    ));

    Ok(ScenarioEntities { player, hostiles })
}

fn ring_position(rng: &mut impl Rng, min_radius: f32, max_radius: f32) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = if max_radius > min_radius {
        rng.gen_range(min_radius..max_radius)
    } else {
        min_radius
    };
    Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{AttackCycle, CombatState, CombatTarget};
    use crate::components::Animator;

    #[test]
    fn test_player_gets_full_component_set() {
        let mut world = World::new();
        let library = AnimationLibrary::new().with_clip("Attack", 1.2);
        let player = spawn_player(&mut world, Vec3::X, &AgentConfig::player(), library).unwrap();

        let entity = world.entity(player);
        assert!(entity.contains::<Player>());
        assert!(entity.contains::<SelectController>());
        // Required components
        assert!(entity.contains::<CombatTarget>());
        assert!(entity.contains::<AttackCycle>());
        assert!(entity.contains::<CombatState>());
        assert!(entity.contains::<Animator>());

        let profile = entity.get::<AttackProfile>().unwrap();
        assert_eq!(profile.base_duration, 1.2);
        assert_eq!(profile.detection_range, None);
        assert_eq!(entity.get::<Health>().unwrap().current, 10);
    }

    #[test]
    fn test_invalid_config_spawns_nothing() {
        let mut world = World::new();
        let mut config = AgentConfig::hostile();
        config.attack_speed = 0.0;

        let result = spawn_hostile(&mut world, Vec3::ZERO, &config, AnimationLibrary::new(), None);

        assert!(matches!(result, Err(ConfigError::NonPositiveAttackSpeed(_))));
        assert_eq!(world.query::<&CombatAgent>().iter(&world).count(), 0);
    }

    #[test]
    fn test_missing_attack_clip_falls_back() {
        let mut world = World::new();
        let hostile = spawn_hostile(
            &mut world,
            Vec3::ZERO,
            &AgentConfig::hostile(),
            AnimationLibrary::new(),
            None,
        )
        .unwrap();

        let profile = world.get::<AttackProfile>(hostile).unwrap();
        assert_eq!(profile.base_duration, crate::components::FALLBACK_CLIP_LENGTH);
    }

    #[test]
    fn test_invalid_scenario_spawns_nothing() {
        let mut world = World::new();
        let config = ScenarioConfig {
            tick_rate: 0.0,
            ..Default::default()
        };

        let result = spawn_scenario(&mut world, &config);

        assert!(matches!(result, Err(ConfigError::NonPositiveTickRate(_))));
        assert_eq!(world.query::<&CombatAgent>().iter(&world).count(), 0);
    }

    #[test]
    fn test_scenario_hostiles_spawn_in_ring() {
        let mut world = World::new();
        let config = ScenarioConfig::default();
        let entities = spawn_scenario(&mut world, &config).unwrap();

        assert_eq!(entities.hostiles.len(), config.hostile_count as usize);
        for hostile in &entities.hostiles {
            let distance = world.get::<Transform>(*hostile).unwrap().translation.length();
            assert!(distance >= config.spawn_radius_min - 1e-4, "distance = {}", distance);
            assert!(distance <= config.spawn_radius_max + 1e-4, "distance = {}", distance);
            assert_eq!(
                world.get::<HostileAgent>(*hostile).unwrap().designated,
                Some(entities.player)
            );
        }
    }
}

//! Skirmish Simulation Core
//!
//! ECS-симуляция ближнего боя на Bevy 0.16: hostile агенты и player
//! с общим attack state machine (cooldown → WindUp → hit frame → recover).
//!
//! HEADLESS ARCHITECTURE:
//! - ECS = game state, targeting, combat rules, timing
//! - Хост = picking, path following, проигрывание анимаций, эффекты
//!   (через `PickingBackend`, `MovementCommand`, `Animator`, `EffectRequested`)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod animation;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod player;
pub mod schedule;
pub mod spawn;

// Re-export основных типов для удобства
pub use ai::AIPlugin;
pub use animation::AnimationPlugin;
pub use combat::{
    AttackCycle, AttackFinished, AttackProfile, AttackStarted, CombatPlugin, CombatState,
    CombatTarget, CombatTimers, DamageDealt, EffectKind, EffectRequested, EntityDied,
    ItemInteracted, TimerAction,
};
pub use components::*;
pub use config::{AgentConfig, ConfigError, ScenarioConfig};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    LogLevel, LogPrinter,
};
pub use movement::MovementPlugin;
pub use player::{PickHit, Picker, PickingBackend, PlayerPlugin, PointerInput};
pub use schedule::{run_simulation_tick, step_simulation, SimClock, SimulationTick, TickSet};
pub use spawn::{spawn_hostile, spawn_item, spawn_player, spawn_scenario, ScenarioEntities};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Schedule + порядок фаз ДО плагинов, которые добавляют в него системы
        schedule::init_simulation_schedule(app);

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Подсистемы
            .add_plugins((
                CombatPlugin,
                AIPlugin,
                PlayerPlugin,
                MovementPlugin,
                AnimationPlugin,
            ))
            // Реальное время: один SimulationTick на каждый FixedUpdate
            .add_systems(FixedUpdate, run_simulation_tick);

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Без MinimalPlugins: тики гоняются вручную через `step_simulation`.
/// Для real-time прогона хост добавляет `TimePlugin`, тогда SimulationTick
/// идёт из FixedUpdate (`run_simulation_tick`).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

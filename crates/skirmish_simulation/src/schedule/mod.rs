//! Simulation tick schedule and virtual clock
//!
//! Один логический тик = один прогон `SimulationTick`:
//!
//! ```text
//! Timers → Targeting → Motion → Navigation → Facing → Attack → Animation → Clock
//! ```
//!
//! # Почему отдельный schedule, а не FixedUpdate напрямую?
//!
//! - **Детерминизм:** `step_simulation(world, dt)` гоняет тик с фиксированным dt
//!   (тесты, headless прогон), без зависимости от wall-clock
//! - **Время:** отложенные действия привязаны к `SimClock`, а не к `Time<Real>`
//! - **Игра:** `run_simulation_tick` вызывает тот же schedule из FixedUpdate

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;

pub mod clock;

pub use clock::*;

/// Custom schedule: один логический тик симуляции
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationTick;

/// Фазы тика (выполняются строго по порядку, `.chain()`)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Отложенные combat действия (срабатывают "между тиками")
    Timers,
    /// TargetAcquisition: hostile designated target, player selection
    Targeting,
    /// MotionController: destination requests
    Motion,
    /// Navigation service stand-in (path following)
    Navigation,
    /// FacingController
    Facing,
    /// AttackExecutor: старт атак
    Attack,
    /// AnimationStateSync
    Animation,
    /// Продвижение SimClock
    Clock,
}

/// Создаёт SimulationTick schedule (single-threaded) и порядок фаз
///
/// Должен вызываться ДО плагинов, добавляющих системы в SimulationTick.
pub fn init_simulation_schedule(app: &mut App) {
    let mut schedule = Schedule::new(SimulationTick);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    app.add_schedule(schedule);

    app.init_resource::<SimClock>();
    app.configure_sets(
        SimulationTick,
        (
            TickSet::Timers,
            TickSet::Targeting,
            TickSet::Motion,
            TickSet::Navigation,
            TickSet::Facing,
            TickSet::Attack,
            TickSet::Animation,
            TickSet::Clock,
        )
            .chain(),
    );
    app.add_systems(SimulationTick, advance_clock.in_set(TickSet::Clock));
}

/// Прогнать один тик с заданным dt (детерминистично)
pub fn step_simulation(world: &mut World, delta: f32) {
    match world.get_resource_mut::<SimClock>() {
        Some(mut clock) => clock.delta = delta,
        None => {
            crate::log_error("step_simulation: SimClock missing (SimulationPlugin not added?)");
            return;
        }
    }

    if let Err(error) = world.try_run_schedule(SimulationTick) {
        crate::log_error(&format!("step_simulation: {}", error));
    }
}

/// System: один тик симуляции на каждый FixedUpdate
///
/// Exclusive system (требует &mut World для run_schedule).
/// FixedUpdate крутит `TimePlugin` (MinimalPlugins/DefaultPlugins) - его добавляет хост,
/// `create_headless_app` его не добавляет и тикает вручную через `step_simulation`.
pub fn run_simulation_tick(world: &mut World) {
    let delta = world
        .get_resource::<Time<Fixed>>()
        .map(|time| time.delta_secs())
        .unwrap_or(0.0);

    step_simulation(world, delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fixed_update_drives_simulation_tick() {
        let mut app = crate::create_headless_app(1);
        crate::set_log_level(crate::LogLevel::Warning);

        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_millis(250));
        app.world_mut().run_schedule(FixedUpdate);

        let clock = *app.world().resource::<SimClock>();
        assert_eq!(clock.tick, 1);
        assert_eq!(clock.elapsed, 0.25);
    }

    #[test]
    fn test_step_without_plugin_is_noop() {
        let mut world = World::new();
        step_simulation(&mut world, 0.5);
        assert!(!world.contains_resource::<SimClock>());
    }
}

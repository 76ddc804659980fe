//! Combat system module (attack state machine + timing model)
//!
//! ECS ответственность:
//! - Game state: Health, AttackProfile, AttackCycle, CombatState, CombatTarget
//! - Combat rules: cooldown, hit frame, range re-check на hit frame
//! - Events: AttackStarted, DamageDealt, EntityDied, AttackFinished, ItemInteracted
//!
//! # Attack Flow
//!
//! ```text
//! attempt_attacks: target в radius + cooldown готов + не busy
//!   ↓
//! WindUp: Attack анимация (speed = attack_speed)
//!   ├─ CombatTimers: DealDamage через attack_delay / attack_speed
//!   └─ CombatTimers: ResetAttack через base_duration / attack_speed
//!   ↓
//! fire_due_timers (начало следующих тиков):
//!   DealDamage → перепроверка → Health::take_damage → DamageDealt
//!   ResetAttack → attacking = false, speed = 1.0
//! ```

use bevy::prelude::*;

pub mod components;
pub mod engagement;
pub mod events;
pub mod systems;
pub mod timers;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use timers::{CombatTimers, TimerAction};

use crate::schedule::{SimulationTick, TickSet};

/// Combat Plugin
///
/// Регистрирует combat системы в SimulationTick.
///
/// Порядок выполнения:
/// 1. fire_due_timers - созревшие DealDamage / ResetAttack / ClearBusy (TickSet::Timers)
/// 2. detect_deaths - EntityDied для любого health == 0 (TickSet::Timers)
/// 3. handle_deaths - Dead маркер, сброс целей (TickSet::Timers)
/// 4. attempt_attacks - старт атак / item interaction (TickSet::Attack)
/// 5. update_combat_events - ротация буферов событий (TickSet::Clock)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<AttackStarted>()
            .add_event::<AttackFinished>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<ItemInteracted>()
            .add_event::<EffectRequested>();

        app.init_resource::<CombatTimers>();

        app.add_systems(
            SimulationTick,
            (
                systems::fire_due_timers,
                systems::detect_deaths,
                systems::handle_deaths,
            )
                .chain()
                .in_set(TickSet::Timers),
        )
        .add_systems(
            SimulationTick,
            systems::attempt_attacks.in_set(TickSet::Attack),
        )
        .add_systems(SimulationTick, update_combat_events.in_set(TickSet::Clock));
    }
}

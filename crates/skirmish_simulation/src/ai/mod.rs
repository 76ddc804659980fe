//! Hostile AI module
//!
//! Hostile агент не выбирает цели сам: его цель - designated target
//! (обычно player), заданная при спавне или найденная один раз по `Player`.
//! Всё остальное (сближение, facing, атака) делают общие movement/combat системы.

use bevy::prelude::*;

pub mod acquisition;

pub use acquisition::{acquire_hostile_targets, resolve_designated_targets};

use crate::schedule::{SimulationTick, TickSet};

/// AI Plugin
///
/// Порядок выполнения (TickSet::Targeting):
/// 1. resolve_designated_targets - однократный lookup player
/// 2. acquire_hostile_targets - CombatTarget := designated
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimulationTick,
            (resolve_designated_targets, acquire_hostile_targets)
                .chain()
                .in_set(TickSet::Targeting),
        );
    }
}

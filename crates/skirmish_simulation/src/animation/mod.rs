//! Animation state sync
//!
//! Симуляция не проигрывает клипы: она пишет желаемое состояние в `Animator`,
//! внешний animation driver читает его (state, speed, restarts).

use bevy::prelude::*;

pub mod sync;

pub use sync::{animation_for, sync_animation_states, WALK_SPEED_THRESHOLD};

use crate::schedule::{SimulationTick, TickSet};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            SimulationTick,
            sync_animation_states.in_set(TickSet::Animation),
        );
    }
}

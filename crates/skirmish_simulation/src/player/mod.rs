//! Player control module
//!
//! Player отличается от hostile только источником цели: её выбирает
//! внешний input через picking service (`PointerInput` + `PickingBackend`).

use bevy::prelude::*;

pub mod picking;
pub mod selection;

pub use picking::{PickHit, Picker, PickingBackend, PointerInput};
pub use selection::{player_select_input, select_at, Selection};

use crate::schedule::{SimulationTick, TickSet};

/// Player Plugin
///
/// PickingBackend НЕ регистрируется здесь: хост вставляет свой
/// (`app.insert_resource(PickingBackend::new(..))`). Без backend клики игнорируются.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerInput>();

        app.add_systems(
            SimulationTick,
            player_select_input.in_set(TickSet::Targeting),
        );
    }
}

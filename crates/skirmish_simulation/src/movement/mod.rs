//! Movement domain - motion requests, navigation stand-in, facing
//!
//! Содержит:
//! - MotionController: target + engagement range → MovementCommand
//! - Navigation stand-in: MovementCommand → Transform + reported velocity
//! - FacingController: slerp поворот к цели / направлению движения
//!
//! Компоненты (MovementCommand, NavigationAgent) живут в `crate::components`.

use bevy::prelude::*;

pub mod facing;
pub mod motion;
pub mod navigation;

pub use facing::{face_towards, update_facing, yaw_towards};
pub use motion::{motion_destination, update_motion};
pub use navigation::follow_movement_commands;

use crate::schedule::{SimulationTick, TickSet};

/// Movement Plugin
///
/// Порядок выполнения:
/// 1. update_motion (TickSet::Motion)
/// 2. follow_movement_commands (TickSet::Navigation)
/// 3. update_facing (TickSet::Facing)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimulationTick, update_motion.in_set(TickSet::Motion))
            .add_systems(
                SimulationTick,
                follow_movement_commands.in_set(TickSet::Navigation),
            )
            .add_systems(SimulationTick, update_facing.in_set(TickSet::Facing));
    }
}

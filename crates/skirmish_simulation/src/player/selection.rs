//! Player TargetAcquisition: select по клику (interactable → target, иначе ground move).

use bevy::prelude::*;

use crate::combat::{CombatTarget, EffectKind, EffectRequested};
use crate::components::{Dead, Interactable, MovementCommand, Player, SelectController};
use crate::player::picking::{PickHit, PickingBackend, PointerInput};
use crate::schedule::SimClock;

/// Высота click эффекта над точкой выбора
const CLICK_EFFECT_OFFSET: Vec3 = Vec3::new(0.0, 0.1, 0.0);

/// Результат выбора
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Interactable (enemy или item) - становится CombatTarget
    Target { entity: Entity, point: Vec3 },
    /// Точка на земле - прямая команда движения, target сбрасывается
    Ground(Vec3),
}

impl Selection {
    pub fn point(&self) -> Vec3 {
        match *self {
            Selection::Target { point, .. } => point,
            Selection::Ground(point) => point,
        }
    }
}

/// Pick hit → Selection
///
/// Object без `Interactable` (стена, декор) трактуется как земля в точке попадания.
pub fn select_at(hit: Option<PickHit>, is_interactable: impl Fn(Entity) -> bool) -> Option<Selection> {
    match hit? {
        PickHit::Object { entity, point } if is_interactable(entity) => {
            Some(Selection::Target { entity, point })
        }
        other => Some(Selection::Ground(other.point())),
    }
}

/// Система: player select input (TickSet::Targeting)
///
/// Свежий press → select сразу; удержание → не чаще click_interval.
/// Pick в пустоту ничего не меняет.
pub fn player_select_input(
    clock: Res<SimClock>,
    mut pointer: ResMut<PointerInput>,
    backend: Option<Res<PickingBackend>>,
    mut players: Query<
        (
            Entity,
            &mut SelectController,
            &mut CombatTarget,
            &mut MovementCommand,
        ),
        (With<Player>, Without<Dead>),
    >,
    interactables: Query<(), With<Interactable>>,
    mut effects: EventWriter<EffectRequested>,
) {
    let now = clock.elapsed;
    let pressed = pointer.pressed_this_frame;
    let held = pointer.held;
    // Press потребляется в любом случае
    pointer.pressed_this_frame = false;

    if !pressed && !held {
        return;
    }
    let Some(backend) = backend else {
        return;
    };

    for (entity, mut controller, mut target, mut command) in players.iter_mut() {
        if !controller.should_select(now, pressed, held) {
            continue;
        }
        controller.last_select = Some(now);

        let hit = backend.pick(pointer.screen_point);
        let Some(selection) = select_at(hit, |e| interactables.contains(e)) else {
            continue;
        };

        match selection {
            Selection::Target { entity: selected, .. } => {
                target.set(Some(selected));
                crate::log(&format!("🖱️ Player {:?} selected target {:?}", entity, selected));
            }
            Selection::Ground(point) => {
                target.clear();
                *command = MovementCommand::MoveToPosition { target: point };
                crate::log(&format!(
                    "🖱️ Player {:?} move to ({:.2}, {:.2}, {:.2})",
                    entity, point.x, point.y, point.z
                ));
            }
        }

        effects.write(EffectRequested {
            kind: EffectKind::Click,
            position: selection.point() + CLICK_EFFECT_OFFSET,
        });
    }
}

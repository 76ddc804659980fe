//! AnimationStateSync: Idle/Walk по скорости, Attack не перебиваем.

use bevy::prelude::*;

use crate::combat::AttackCycle;
use crate::components::{AnimState, Animator, Dead, NavigationAgent};

/// Скорость, выше которой играем Walk
pub const WALK_SPEED_THRESHOLD: f32 = 0.1;

/// Какую анимацию включить (None - busy, анимацию ведёт attack/interaction)
pub fn animation_for(busy: bool, speed: f32) -> Option<AnimState> {
    if busy {
        return None;
    }
    if speed > WALK_SPEED_THRESHOLD {
        Some(AnimState::Walk)
    } else {
        Some(AnimState::Idle)
    }
}

/// Система: AnimationStateSync (TickSet::Animation)
///
/// Idempotent: `play` того же состояния не перезапускает клип.
/// Мёртвых не трогаем - последний state остаётся.
pub fn sync_animation_states(
    mut agents: Query<(&AttackCycle, &NavigationAgent, &mut Animator), Without<Dead>>,
) {
    for (cycle, navigation, mut animator) in agents.iter_mut() {
        let Some(state) = animation_for(cycle.is_busy(), navigation.velocity.length()) else {
            continue;
        };
        if animator.state != state {
            animator.play(state);
        }
    }
}

//! Attack initiation: cooldown gate → WindUp (или item interaction у player).

use bevy::prelude::*;

use crate::combat::engagement::{engaged_target, TargetView};
use crate::combat::{
    AttackCycle, AttackProfile, AttackStarted, CombatState, CombatTarget, CombatTimers,
    ItemInteracted, TimerAction,
};
use crate::components::{AnimState, Animator, CombatAgent, Dead, Health, Interactable};
use crate::schedule::SimClock;

/// Busy state после item interaction (секунды)
pub const ITEM_INTERACTION_BUSY: f32 = 0.5;

/// Lookup (позиция, жив) для любого актора/interactable
pub fn actor_lookup(actors: &Query<(&Transform, Option<&Health>)>, entity: Entity) -> Option<(Vec3, bool)> {
    actors
        .get(entity)
        .ok()
        .map(|(transform, health)| (transform.translation, health.map_or(true, Health::is_alive)))
}

/// Система: попытка атаки (TickSet::Attack)
///
/// Для каждого живого (без `Dead`) агента с целью в attack range (≤, граница включительно):
/// - Item target (player) → interact + busy на ITEM_INTERACTION_BUSY
/// - иначе, если не busy и cooldown прошёл → WindUp:
///   Attack анимация с начала на attack_speed, DealDamage через hit_delay,
///   ResetAttack через attack_duration
///
/// Пока `attacking == true` состояние (WindUp/Recovering) ведут таймеры.
pub fn attempt_attacks(
    clock: Res<SimClock>,
    mut timers: ResMut<CombatTimers>,
    mut agents: Query<
        (
            Entity,
            &Transform,
            &AttackProfile,
            &mut AttackCycle,
            &mut CombatState,
            &mut CombatTarget,
            &mut Animator,
        ),
        (With<CombatAgent>, Without<Dead>),
    >,
    actors: Query<(&Transform, Option<&Health>)>,
    interactables: Query<&Interactable>,
    mut started_events: EventWriter<AttackStarted>,
    mut item_events: EventWriter<ItemInteracted>,
) {
    let now = clock.elapsed;

    for (entity, transform, profile, mut cycle, mut state, mut target, mut animator) in
        agents.iter_mut()
    {
        // Атака в процессе - фазу ведут DealDamage/ResetAttack
        if cycle.attacking {
            continue;
        }

        let view = engaged_target(target.get(), transform.translation, profile, |e| {
            actor_lookup(&actors, e)
        });
        let Some(view) = view else {
            state.set_if_neq(CombatState::Idle);
            continue;
        };

        let in_range = profile.in_attack_range(view.distance);
        state.set_if_neq(CombatState::classify(true, in_range));
        if !in_range {
            continue;
        }

        let is_item = interactables
            .get(view.entity)
            .is_ok_and(Interactable::is_item);

        if is_item {
            if cycle.is_busy() {
                continue;
            }
            interact_with_item(entity, view, now, &mut cycle, &mut target, &mut timers);
            state.set_if_neq(CombatState::Idle);
            item_events.write(ItemInteracted {
                item: view.entity,
                invoker: entity,
            });
            continue;
        }

        if !cycle.can_start_attack(now, profile.attack_duration()) {
            continue;
        }

        let started = start_attack(entity, view, now, profile, &mut cycle, &mut animator, &mut timers);
        *state = CombatState::InRangeWindUp;
        started_events.write(started);
    }
}

/// WindUp: фиксируем старт, запускаем анимацию и планируем hit + reset
fn start_attack(
    attacker: Entity,
    view: TargetView,
    now: f32,
    profile: &AttackProfile,
    cycle: &mut AttackCycle,
    animator: &mut Animator,
    timers: &mut CombatTimers,
) -> AttackStarted {
    let hit_at = now + profile.hit_delay();
    let recover_at = now + profile.attack_duration();

    cycle.begin_attack(now);

    // Wall-clock длительность клипа = base_duration / attack_speed
    animator.speed = profile.attack_speed;
    animator.play_from_start(AnimState::Attack);

    timers.schedule(
        hit_at,
        TimerAction::DealDamage {
            attacker,
            target: view.entity,
        },
    );
    timers.schedule(recover_at, TimerAction::ResetAttack { attacker });

    crate::log(&format!(
        "⚔️ Attack started (attacker: {:?}, target: {:?}, distance: {:.2}, hit at {:.3}s, reset at {:.3}s)",
        attacker, view.entity, view.distance, hit_at, recover_at
    ));

    AttackStarted {
        attacker,
        target: view.entity,
        at: now,
        hit_at,
        recover_at,
    }
}

/// Item: interact сразу, target := None, короткий busy без hit/recover пары
fn interact_with_item(
    agent: Entity,
    view: TargetView,
    now: f32,
    cycle: &mut AttackCycle,
    target: &mut CombatTarget,
    timers: &mut CombatTimers,
) {
    cycle.interacting = true;
    target.clear();
    timers.schedule(now + ITEM_INTERACTION_BUSY, TimerAction::ClearBusy { agent });

    crate::log(&format!(
        "📦 Item interaction (agent: {:?}, item: {:?})",
        agent, view.entity
    ));
}

//! Срабатывание отложенных combat действий (TickSet::Timers).
//!
//! DealDamage перепроверяет всё в момент hit frame:
//! - атакующий жив
//! - цель та же (player мог переключиться)
//! - цель существует и жива
//! - дистанция ≤ attack_range по ТЕКУЩИМ позициям (mobile-target combat)
//!
//! ResetAttack / ClearBusy срабатывают всегда - attacking флаг не залипает.

use bevy::prelude::*;

use crate::combat::{
    AttackCycle, AttackFinished, AttackProfile, CombatState, CombatTarget, CombatTimers,
    DamageDealt, EffectKind, EffectRequested, TimerAction,
};
use crate::components::{Animator, Health};
use crate::schedule::SimClock;

/// Высота hit эффекта над позицией цели
const HIT_EFFECT_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

type AgentTimerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static AttackProfile,
        &'static mut AttackCycle,
        &'static mut CombatState,
        &'static mut CombatTarget,
        &'static mut Animator,
    ),
>;

type ActorQuery<'w, 's> = Query<'w, 's, (&'static Transform, Option<&'static mut Health>)>;

/// Система: вынуть и выполнить все действия с fire_at ≤ now
///
/// Смертельный hit только помечается в DamageDealt (`target_died`),
/// EntityDied пишет `detect_deaths`.
pub fn fire_due_timers(
    clock: Res<SimClock>,
    mut timers: ResMut<CombatTimers>,
    mut agents: AgentTimerQuery,
    mut actors: ActorQuery,
    mut damage_events: EventWriter<DamageDealt>,
    mut finished_events: EventWriter<AttackFinished>,
    mut effects: EventWriter<EffectRequested>,
) {
    let now = clock.elapsed;

    while let Some((_fire_at, action)) = timers.pop_due(now) {
        match action {
            TimerAction::DealDamage { attacker, target } => {
                let Some(hit) = deal_damage(attacker, target, now, &mut agents, &mut actors) else {
                    continue;
                };

                effects.write(EffectRequested {
                    kind: EffectKind::Hit,
                    position: hit.position + HIT_EFFECT_OFFSET,
                });
                damage_events.write(hit.event);
            }
            TimerAction::ResetAttack { attacker } => {
                if reset_attack(attacker, &mut agents) {
                    finished_events.write(AttackFinished { attacker, at: now });
                }
            }
            TimerAction::ClearBusy { agent } => {
                clear_busy(agent, &mut agents);
            }
        }
    }
}

struct AppliedHit {
    event: DamageDealt,
    position: Vec3,
}

/// Hit frame. None - урон не применён (no-op по одной из причин выше)
fn deal_damage(
    attacker: Entity,
    target: Entity,
    now: f32,
    agents: &mut AgentTimerQuery,
    actors: &mut ActorQuery,
) -> Option<AppliedHit> {
    let Ok((profile, _cycle, mut state, mut current_target, _animator)) = agents.get_mut(attacker)
    else {
        return None;
    };

    // Hit frame прошёл в любом случае
    state.set_if_neq(CombatState::InRangeRecovering);

    let Ok((attacker_transform, attacker_health)) = actors.get(attacker) else {
        return None;
    };
    if !attacker_health.is_some_and(|health| health.is_alive()) {
        crate::log(&format!("💀 Hit skipped: attacker {:?} is dead", attacker));
        return None;
    }
    let attacker_position = attacker_transform.translation;

    if !current_target.is(target) {
        crate::log(&format!(
            "🔄 Hit skipped: attacker {:?} switched target from {:?}",
            attacker, target
        ));
        return None;
    }

    let Ok((target_transform, target_health)) = actors.get_mut(target) else {
        current_target.clear();
        return None;
    };
    let Some(mut target_health) = target_health else {
        return None;
    };
    if !target_health.is_alive() {
        current_target.clear();
        crate::log(&format!("💀 Hit skipped: target {:?} is already dead", target));
        return None;
    }

    let target_position = target_transform.translation;
    let distance = attacker_position.distance(target_position);
    if !profile.in_attack_range(distance) {
        crate::log(&format!(
            "💨 Hit missed (attacker: {:?}, target: {:?}, distance: {:.2} > {:.2})",
            attacker, target, distance, profile.attack_range
        ));
        return None;
    }

    target_health.take_damage(profile.attack_damage);
    let target_died = !target_health.is_alive();

    crate::log(&format!(
        "💥 Hit (attacker: {:?}, target: {:?}, damage: {}, HP: {}/{})",
        attacker, target, profile.attack_damage, target_health.current, target_health.max
    ));

    Some(AppliedHit {
        event: DamageDealt {
            attacker,
            target,
            damage: profile.attack_damage,
            at: now,
            target_died,
        },
        position: target_position,
    })
}

/// Конец attack cycle. Возвращает true если цикл действительно был активен.
fn reset_attack(attacker: Entity, agents: &mut AgentTimerQuery) -> bool {
    let Ok((_profile, mut cycle, mut state, _target, mut animator)) = agents.get_mut(attacker) else {
        return false;
    };

    animator.speed = 1.0;
    if !cycle.attacking {
        return false;
    }

    cycle.finish_attack();
    state.set_if_neq(CombatState::Idle);

    crate::log(&format!("✅ Attack cycle completed (attacker: {:?})", attacker));
    true
}

fn clear_busy(agent: Entity, agents: &mut AgentTimerQuery) {
    let Ok((_profile, mut cycle, _state, _target, mut animator)) = agents.get_mut(agent) else {
        return;
    };

    cycle.interacting = false;
    animator.speed = 1.0;
}

//! Deferred combat actions (hit frame, reset, item busy)
//!
//! Вместо one-shot callback'ов - очередь (fire_at, seq, action) с минимальным
//! fire_at наверху. `fire_due_timers` вынимает созревшие действия в начале тика.
//!
//! Действия - plain data (только Entity handles): при срабатывании всё
//! перепроверяется (жива ли цель, жив ли атакующий, дистанция).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bevy::prelude::*;

/// Отложенное действие
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Hit frame: попытка нанести урон цели
    DealDamage { attacker: Entity, target: Entity },
    /// Конец attack cycle: attacking = false, speed = 1.0
    ResetAttack { attacker: Entity },
    /// Конец item interaction busy state
    ClearBusy { agent: Entity },
}

#[derive(Debug, Clone, Copy)]
struct ScheduledAction {
    fire_at: f32,
    /// Порядок постановки (tie-break при равном fire_at)
    seq: u64,
    action: TimerAction,
}

impl PartialEq for ScheduledAction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledAction {}

impl PartialOrd for ScheduledAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledAction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fire_at
            .total_cmp(&other.fire_at)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Очередь отложенных combat действий (один экземпляр на мир)
#[derive(Resource, Debug, Default)]
pub struct CombatTimers {
    queue: BinaryHeap<Reverse<ScheduledAction>>,
    next_seq: u64,
}

impl CombatTimers {
    pub fn schedule(&mut self, fire_at: f32, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(ScheduledAction {
            fire_at,
            seq,
            action,
        }));
    }

    /// Вынуть следующее действие с fire_at ≤ now
    pub fn pop_due(&mut self, now: f32) -> Option<(f32, TimerAction)> {
        let Reverse(next) = self.queue.peek()?;
        if next.fire_at > now {
            return None;
        }
        self.queue
            .pop()
            .map(|Reverse(scheduled)| (scheduled.fire_at, scheduled.action))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn test_pop_due_respects_fire_time() {
        let mut timers = CombatTimers::default();
        timers.schedule(1.0, TimerAction::ResetAttack { attacker: entity(1) });
        timers.schedule(0.3, TimerAction::DealDamage { attacker: entity(1), target: entity(2) });

        assert_eq!(timers.pop_due(0.2), None);
        assert_eq!(
            timers.pop_due(0.3),
            Some((0.3, TimerAction::DealDamage { attacker: entity(1), target: entity(2) }))
        );
        assert_eq!(timers.pop_due(0.9), None);
        assert_eq!(
            timers.pop_due(5.0),
            Some((1.0, TimerAction::ResetAttack { attacker: entity(1) }))
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn test_equal_fire_times_keep_schedule_order() {
        let mut timers = CombatTimers::default();
        timers.schedule(0.5, TimerAction::ClearBusy { agent: entity(3) });
        timers.schedule(0.5, TimerAction::ResetAttack { attacker: entity(4) });
        timers.schedule(0.5, TimerAction::ClearBusy { agent: entity(5) });

        let order: Vec<TimerAction> = std::iter::from_fn(|| timers.pop_due(0.5))
            .map(|(_, action)| action)
            .collect();
        assert_eq!(
            order,
            vec![
                TimerAction::ClearBusy { agent: entity(3) },
                TimerAction::ResetAttack { attacker: entity(4) },
                TimerAction::ClearBusy { agent: entity(5) },
            ]
        );
    }
}

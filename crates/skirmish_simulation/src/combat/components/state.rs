//! Runtime combat state: CombatTarget, AttackCycle, CombatState.

use bevy::prelude::*;

/// Текущая цель агента (weak handle, может быть None)
///
/// Handle не владеет целью: despawn или смерть цели резолвится в "absent"
/// при каждом чтении (см. `combat::engagement::resolve_target`).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CombatTarget(pub Option<Entity>);

impl CombatTarget {
    pub fn get(&self) -> Option<Entity> {
        self.0
    }

    pub fn set(&mut self, target: Option<Entity>) {
        self.0 = target;
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn is(&self, entity: Entity) -> bool {
        self.0 == Some(entity)
    }
}

/// Attack cycle bookkeeping (cooldown + re-entrancy guard)
///
/// Инварианты:
/// - `attacking == true` между стартом атаки и ResetAttack
/// - `interacting == true` между item interaction и ClearBusy
/// - новая атака не стартует пока `is_busy()`
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackCycle {
    pub attacking: bool,
    pub interacting: bool,
    /// Время старта последней атаки (None - ещё не атаковали)
    pub last_attack_start: Option<f32>,
    /// Сколько циклов завершено через ResetAttack
    pub completed: u32,
}

impl AttackCycle {
    pub fn is_busy(&self) -> bool {
        self.attacking || self.interacting
    }

    /// Cooldown: (now - last_attack_start) ≥ cooldown
    pub fn cooldown_ready(&self, now: f32, cooldown: f32) -> bool {
        self.last_attack_start
            .map_or(true, |started| now - started >= cooldown)
    }

    pub fn can_start_attack(&self, now: f32, cooldown: f32) -> bool {
        !self.is_busy() && self.cooldown_ready(now, cooldown)
    }

    pub fn begin_attack(&mut self, now: f32) {
        self.attacking = true;
        self.last_attack_start = Some(now);
    }

    pub fn finish_attack(&mut self) {
        self.attacking = false;
        self.completed += 1;
    }
}

/// Combat FSM состояние (ровно одно на агента)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum CombatState {
    /// Нет цели
    #[default]
    Idle,
    /// Цель есть, но дальше attack range (сближаемся)
    Seeking,
    /// В радиусе, ждём cooldown
    InRangeCooldown,
    /// Атака стартовала, hit ещё не применён
    InRangeWindUp,
    /// Hit прошёл, ждём ResetAttack
    InRangeRecovering,
}

impl CombatState {
    /// Классификация для агента без атаки в процессе
    pub fn classify(has_target: bool, in_range: bool) -> Self {
        match (has_target, in_range) {
            (false, _) => CombatState::Idle,
            (true, false) => CombatState::Seeking,
            (true, true) => CombatState::InRangeCooldown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attack_has_no_cooldown() {
        let cycle = AttackCycle::default();
        assert!(cycle.can_start_attack(0.0, 1.0));
    }

    #[test]
    fn test_cooldown_from_last_start() {
        let mut cycle = AttackCycle::default();
        cycle.begin_attack(2.0);
        cycle.finish_attack();

        assert!(!cycle.can_start_attack(2.5, 1.0));
        assert!(cycle.can_start_attack(3.0, 1.0));
        assert_eq!(cycle.completed, 1);
    }

    #[test]
    fn test_busy_blocks_even_when_cooldown_passed() {
        let mut cycle = AttackCycle::default();
        cycle.begin_attack(0.0);
        assert!(cycle.cooldown_ready(10.0, 1.0));
        assert!(!cycle.can_start_attack(10.0, 1.0));

        let item_busy = AttackCycle {
            interacting: true,
            ..Default::default()
        };
        assert!(!item_busy.can_start_attack(0.0, 1.0));
    }

    #[test]
    fn test_classify() {
        assert_eq!(CombatState::classify(false, true), CombatState::Idle);
        assert_eq!(CombatState::classify(true, false), CombatState::Seeking);
        assert_eq!(CombatState::classify(true, true), CombatState::InRangeCooldown);
    }
}

//! Базовые компоненты акторов: CombatAgent, Health, Dead

use bevy::prelude::*;

use crate::combat::{AttackCycle, CombatState, CombatTarget};
use crate::components::{Animator, MovementCommand, NavigationAgent};

/// Боевой агент (hostile или player) - общий каркас для combat/movement систем
///
/// Автоматически добавляет runtime-состояние через Required Components.
/// `AttackProfile` и `Health` вставляются явно при спавне (см. `spawn`).
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    Health,
    CombatTarget,
    AttackCycle,
    CombatState,
    MovementCommand,
    NavigationAgent,
    Animator,
    Transform
)]
pub struct CombatAgent;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. `current == 0` - смерть (терминально).
/// Меняется только через `take_damage`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Вешается `handle_deaths` после EntityDied. Трупы остаются на месте,
/// per-agent системы (targeting, motion, facing, attack, animation) их пропускают.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

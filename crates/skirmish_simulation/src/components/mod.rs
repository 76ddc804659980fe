//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (CombatAgent, Health, Dead)
//! - agent: hostile/player маркеры, facing, selection debounce
//! - movement: навигация (MovementCommand, NavigationAgent)
//! - animation: animation driver (Animator, AnimationLibrary)
//! - interaction: кликабельные объекты (Interactable)
//!
//! Боевые компоненты (AttackProfile, AttackCycle, CombatState, CombatTarget)
//! живут в `crate::combat::components`.

pub mod actor;
pub mod agent;
pub mod animation;
pub mod interaction;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use agent::*;
pub use animation::*;
pub use interaction::*;
pub use movement::*;

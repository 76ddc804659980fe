//! Interactable: то, что player может выбрать кликом

use bevy::prelude::*;

/// Тип взаимодействия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum InteractionKind {
    /// Враг: entity сам является боевым актором (несёт Health)
    Enemy,
    /// Предмет: `interact` при подходе, без атаки
    Item,
}

/// Interactable entity (read-only для combat систем)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Interactable {
    pub kind: InteractionKind,
}

impl Interactable {
    pub fn enemy() -> Self {
        Self {
            kind: InteractionKind::Enemy,
        }
    }

    pub fn item() -> Self {
        Self {
            kind: InteractionKind::Item,
        }
    }

    pub fn is_item(&self) -> bool {
        self.kind == InteractionKind::Item
    }
}

//! Agent-specific компоненты: Player / HostileAgent маркеры, facing параметры

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Акторы БЕЗ этого компонента управляются AI systems.
/// Акторы С этим компонентом получают target от player selection systems.
///
/// # Архитектурная заметка
/// - Hostile AI резолвит свою designated target через `With<Player>` (один раз)
/// - Selection systems используют `With<Player>` filter
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Hostile AI агент
///
/// `designated` - цель, заданная при спавне (dependency injection).
/// Если None - резолвится один раз по `Player` маркеру (`resolve_designated_targets`).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HostileAgent {
    pub designated: Option<Entity>,
    pub resolved: bool,
}

impl HostileAgent {
    pub fn new(designated: Option<Entity>) -> Self {
        Self {
            designated,
            resolved: designated.is_some(),
        }
    }
}

/// Facing параметры (скорость slerp поворота)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    pub rotation_speed: f32,
}

impl Default for Facing {
    fn default() -> Self {
        Self { rotation_speed: 5.0 }
    }
}

/// Последнее ненулевое направление движения (player facing fallback без target)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveDirectionMemory {
    pub direction: Vec3,
}

/// Debounce для удерживаемой кнопки выбора
///
/// Свежий press → select сразу; удержание → не чаще `click_interval`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SelectController {
    pub click_interval: f32,
    pub last_select: Option<f32>,
}

impl Default for SelectController {
    fn default() -> Self {
        Self {
            click_interval: 0.2,
            last_select: None,
        }
    }
}

impl SelectController {
    /// Нужно ли выполнить select в этот тик
    pub fn should_select(&self, now: f32, pressed_this_frame: bool, held: bool) -> bool {
        if pressed_this_frame {
            return true;
        }
        if !held {
            return false;
        }
        match self.last_select {
            Some(last) => now - last >= self.click_interval,
            None => true,
        }
    }
}

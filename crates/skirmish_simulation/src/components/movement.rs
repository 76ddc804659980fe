//! Movement компоненты: команды навигации и отчёт навигационного агента

use bevy::prelude::*;

/// Команда движения для актора (выполняется navigation service)
///
/// Архитектура:
/// - combat/movement системы пишут MovementCommand (high-level intent)
/// - navigation service читает и ведёт актора по пути
/// - "Стоять" = `MoveToPosition` в собственную позицию (агент останавливается
///   ровно на engagement range, без overshoot)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum MovementCommand {
    /// Нет активной цели (начальное состояние после спавна)
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveToPosition { target: Vec3 },
}

impl Default for MovementCommand {
    fn default() -> Self {
        Self::Idle
    }
}

impl MovementCommand {
    /// Hold: destination = текущая позиция
    pub fn hold(position: Vec3) -> Self {
        Self::MoveToPosition { target: position }
    }

    pub fn destination(&self) -> Option<Vec3> {
        match self {
            Self::Idle => None,
            Self::MoveToPosition { target } => Some(*target),
        }
    }
}

/// Состояние navigation service для актора
///
/// `velocity` - отчёт сервиса (magnitude → Walk/Idle, direction → facing fallback).
/// `speed` и `arrive_distance` - параметры path following.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct NavigationAgent {
    pub velocity: Vec3,
    pub speed: f32,
    pub arrive_distance: f32,
}

impl Default for NavigationAgent {
    fn default() -> Self {
        Self::new(3.5)
    }
}

impl NavigationAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            speed,
            arrive_distance: 0.05,
        }
    }
}

//! Animation компоненты: состояние аниматора и библиотека клипов

use std::collections::HashMap;

use bevy::prelude::*;

/// Длительность по умолчанию, если attack clip не найден
pub const FALLBACK_CLIP_LENGTH: f32 = 1.0;

/// Именованные animation states (layer 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Attack,
}

impl AnimState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimState::Idle => "Idle",
            AnimState::Walk => "Walk",
            AnimState::Attack => "Attack",
        }
    }
}

/// Animation driver актора (воспроизведение клипов - внешний слой)
///
/// ECS пишет только запросы: какой state играть и с какой скоростью.
/// `restarts` считает `play_from_start` вызовы (для тестов и визуального слоя).
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Animator {
    pub state: AnimState,
    pub speed: f32,
    pub restarts: u32,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            state: AnimState::Idle,
            speed: 1.0,
            restarts: 0,
        }
    }
}

impl Animator {
    /// Запросить state (идемпотентно: повтор того же state ничего не меняет)
    ///
    /// Возвращает true если state сменился.
    pub fn play(&mut self, state: AnimState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        true
    }

    /// Проиграть state с начала (normalized time = 0)
    pub fn play_from_start(&mut self, state: AnimState) {
        self.state = state;
        self.restarts += 1;
    }
}

/// Длительности известных клипов (резолвятся один раз при спавне по имени)
#[derive(Component, Debug, Clone, Default)]
pub struct AnimationLibrary {
    clips: HashMap<String, f32>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip(mut self, name: impl Into<String>, length: f32) -> Self {
        self.clips.insert(name.into(), length);
        self
    }

    pub fn clip_length(&self, name: &str) -> Option<f32> {
        self.clips.get(name).copied()
    }

    /// Длительность клипа или FALLBACK_CLIP_LENGTH
    ///
    /// Отсутствующий клип и клип нулевой/отрицательной длины - recoverable,
    /// логируем warning и используем fallback.
    pub fn resolve_clip_length(&self, name: &str) -> f32 {
        match self.clip_length(name) {
            Some(length) if length > 0.0 => length,
            Some(length) => {
                crate::log_warning(&format!(
                    "Animation clip '{}' has invalid length {}, using fallback {}",
                    name, length, FALLBACK_CLIP_LENGTH
                ));
                FALLBACK_CLIP_LENGTH
            }
            None => {
                crate::log_warning(&format!(
                    "Animation clip '{}' not found, using fallback {}",
                    name, FALLBACK_CLIP_LENGTH
                ));
                FALLBACK_CLIP_LENGTH
            }
        }
    }
}

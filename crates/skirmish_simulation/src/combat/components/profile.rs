//! AttackProfile: неизменяемые боевые параметры агента.

use bevy::prelude::*;

use crate::components::{AnimState, AnimationLibrary};
use crate::config::{AgentConfig, ConfigError};

/// Верхняя граница attack delay (в единицах базовой длительности)
pub const MAX_ATTACK_DELAY: f32 = 1.0;

/// Боевые параметры агента (резолвятся один раз при спавне)
///
/// Все временные величины масштабируются `attack_speed`:
/// - cooldown / длительность атаки = `base_duration / attack_speed`
/// - hit frame = `attack_delay / attack_speed` от начала атаки
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackProfile {
    /// Радиус обнаружения (None - без detection гейта, player)
    pub detection_range: Option<f32>,
    pub attack_range: f32,
    pub attack_damage: u32,
    pub attack_speed: f32,
    pub attack_delay: f32,
    /// Длительность attack clip при speed = 1.0
    pub base_duration: f32,
}

impl AttackProfile {
    /// Резолв из конфига + библиотеки клипов агента
    ///
    /// Отсутствующий "Attack" clip → fallback 1.0 (warning, не ошибка).
    pub fn resolve(config: &AgentConfig, library: &AnimationLibrary) -> Result<Self, ConfigError> {
        let base_duration = library.resolve_clip_length(AnimState::Attack.as_str());
        Self::from_config(config, base_duration)
    }

    pub fn from_config(config: &AgentConfig, base_duration: f32) -> Result<Self, ConfigError> {
        let profile = Self {
            detection_range: config.detection_range,
            attack_range: config.attack_range,
            attack_damage: config.attack_damage,
            attack_speed: config.attack_speed,
            attack_delay: config.attack_delay,
            base_duration,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Проверка конфигурационных инвариантов
    ///
    /// - attack_speed > 0
    /// - ranges ≥ 0
    /// - 0 ≤ attack_delay ≤ min(1.0, base_duration): hit всегда раньше reset
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.attack_speed > 0.0) {
            return Err(ConfigError::NonPositiveAttackSpeed(self.attack_speed));
        }
        if !(self.attack_range >= 0.0) {
            return Err(ConfigError::NegativeValue {
                name: "attack_range",
                value: self.attack_range,
            });
        }
        if let Some(detection) = self.detection_range {
            if !(detection >= 0.0) {
                return Err(ConfigError::NegativeValue {
                    name: "detection_range",
                    value: detection,
                });
            }
        }
        if !(self.base_duration > 0.0) {
            return Err(ConfigError::NegativeValue {
                name: "base_duration",
                value: self.base_duration,
            });
        }

        let limit = MAX_ATTACK_DELAY.min(self.base_duration);
        if !(0.0..=limit).contains(&self.attack_delay) {
            return Err(ConfigError::AttackDelayOutOfRange {
                delay: self.attack_delay,
                limit,
            });
        }

        Ok(())
    }

    /// Полная длительность атаки = cooldown между стартами атак
    pub fn attack_duration(&self) -> f32 {
        self.base_duration / self.attack_speed
    }

    /// Время от старта атаки до hit frame
    pub fn hit_delay(&self) -> f32 {
        self.attack_delay / self.attack_speed
    }

    /// Граница включительная: distance == attack_range - в радиусе
    pub fn in_attack_range(&self, distance: f32) -> bool {
        distance <= self.attack_range
    }

    pub fn in_detection_range(&self, distance: f32) -> bool {
        self.detection_range.map_or(true, |range| distance <= range)
    }
}

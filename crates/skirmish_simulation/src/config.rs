//! Конфигурация агентов и headless сценария (RON)
//!
//! `AgentConfig` - persisted per-agent значения (ranges, damage, speed, delay).
//! Валидация происходит при резолве в `AttackProfile` (см. `combat::components::profile`).
//! `ScenarioConfig` - параметры headless прогона (`assets/skirmish.ron`).

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ошибки конфигурации (невалидные значения или файл)
///
/// Обнаруживаются при старте, в runtime не восстанавливаются.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("attack speed must be positive, got {0}")]
    NonPositiveAttackSpeed(f32),

    #[error("{name} must be non-negative, got {value}")]
    NegativeValue { name: &'static str, value: f32 },

    #[error("tick rate must be positive and finite, got {0}")]
    NonPositiveTickRate(f32),

    #[error("spawn ring is inverted: max radius {max} < min radius {min}")]
    InvertedSpawnRing { min: f32, max: f32 },

    #[error("attack delay {delay} must be within [0, {limit}] so the hit lands before the attack ends")]
    AttackDelayOutOfRange { delay: f32, limit: f32 },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Per-agent боевые и movement параметры
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Радиус обнаружения (только hostile; None = без гейта)
    #[serde(default)]
    pub detection_range: Option<f32>,
    /// Engagement/attack range
    pub attack_range: f32,
    pub attack_damage: u32,
    /// Множитель скорости атаки (> 0)
    pub attack_speed: f32,
    /// Задержка до hit frame (в единицах базовой длительности клипа)
    pub attack_delay: f32,
    /// Скорость facing slerp
    pub rotation_speed: f32,
    /// Скорость navigation agent (м/с)
    pub move_speed: f32,
    pub max_health: u32,
}

impl AgentConfig {
    /// Hostile preset (EnemyAI defaults)
    pub fn hostile() -> Self {
        Self {
            detection_range: Some(10.0),
            attack_range: 1.5,
            attack_damage: 1,
            attack_speed: 1.0,
            attack_delay: 0.3,
            rotation_speed: 5.0,
            move_speed: 3.5,
            max_health: 3,
        }
    }

    /// Player preset
    pub fn player() -> Self {
        Self {
            detection_range: None,
            attack_range: 1.5,
            attack_damage: 1,
            attack_speed: 1.5,
            attack_delay: 0.3,
            rotation_speed: 8.0,
            move_speed: 3.5,
            max_health: 10,
        }
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }
}

/// Параметры headless прогона
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub seed: u64,
    /// Частота симуляции (Hz)
    pub tick_rate: f32,
    pub ticks: u32,
    pub hostile_count: u32,
    /// Hostile спавнятся в кольце [min, max] вокруг player
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
    /// Длина attack clip (None - клип "не найден", используется fallback)
    #[serde(default)]
    pub attack_clip_length: Option<f32>,
    pub player: AgentConfig,
    pub hostile: AgentConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: 64.0,
            ticks: 1280,
            hostile_count: 3,
            spawn_radius_min: 4.0,
            spawn_radius_max: 9.0,
            attack_clip_length: Some(1.0),
            player: AgentConfig::player(),
            hostile: AgentConfig::hostile(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_ron_str(&source)?;
        config.validate()?;
        Ok(config)
    }

    /// Проверка параметров прогона (per-agent значения проверяются при спавне)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::NonPositiveTickRate(self.tick_rate));
        }
        if self.spawn_radius_min < 0.0 {
            return Err(ConfigError::NegativeValue {
                name: "spawn_radius_min",
                value: self.spawn_radius_min,
            });
        }
        if self.spawn_radius_max < self.spawn_radius_min {
            return Err(ConfigError::InvertedSpawnRing {
                min: self.spawn_radius_min,
                max: self.spawn_radius_max,
            });
        }
        Ok(())
    }

    /// Длительность одного тика (секунды). Валидна после `validate`
    pub fn tick_delta(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_config_from_ron() {
        let config = AgentConfig::from_ron_str(
            r#"(
                detection_range: Some(12.0),
                attack_range: 2.0,
                attack_damage: 3,
                attack_speed: 1.25,
                attack_delay: 0.4,
                rotation_speed: 6.0,
                move_speed: 4.0,
                max_health: 20,
            )"#,
        )
        .expect("valid RON");

        assert_eq!(config.detection_range, Some(12.0));
        assert_eq!(config.attack_damage, 3);
        assert_eq!(config.attack_speed, 1.25);
    }

    #[test]
    fn test_missing_detection_range_defaults_to_none() {
        let config = AgentConfig::from_ron_str(
            r#"(
                attack_range: 1.5,
                attack_damage: 1,
                attack_speed: 1.5,
                attack_delay: 0.3,
                rotation_speed: 8.0,
                move_speed: 3.5,
                max_health: 10,
            )"#,
        )
        .expect("valid RON");

        assert_eq!(config, AgentConfig::player());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let result = AgentConfig::from_ron_str("(attack_range: \"far\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_scenario_roundtrip_through_ron() {
        let scenario = ScenarioConfig::default();
        let text = ron::to_string(&scenario).expect("serializable");
        let parsed = ScenarioConfig::from_ron_str(&text).expect("parsable");
        assert_eq!(parsed, scenario);
        assert_eq!(parsed.tick_delta(), 1.0 / 64.0);
    }

    #[test]
    fn test_shipped_scenario_matches_defaults() {
        let parsed = ScenarioConfig::from_ron_str(include_str!("../assets/skirmish.ron"))
            .expect("assets/skirmish.ron is valid");
        assert_eq!(parsed, ScenarioConfig::default());
    }

    #[test]
    fn test_non_positive_tick_rate_is_rejected() {
        for tick_rate in [0.0, -64.0, f32::NAN] {
            let config = ScenarioConfig {
                tick_rate,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::NonPositiveTickRate(_))),
                "tick_rate = {}",
                tick_rate
            );
        }
    }

    #[test]
    fn test_inverted_spawn_ring_is_rejected() {
        let config = ScenarioConfig {
            spawn_radius_min: 9.0,
            spawn_radius_max: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedSpawnRing { .. })
        ));

        // Вырожденное кольцо (min == max) - валидно
        let config = ScenarioConfig {
            spawn_radius_min: 5.0,
            spawn_radius_max: 5.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ScenarioConfig::load("definitely/not/here.ron");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

//! ArenaConfig — все тюнинг-константы симуляции
//!
//! Default значения = финальная версия геймплея (goblin/player/spawn).
//! Host может переопределить через JSON (`from_json_str` / `from_json_file`).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::Thresholds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Корневой конфиг (Resource)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArenaConfig {
    pub simulation: SimulationConfig,
    pub goblin: GoblinConfig,
    pub spawn: SpawnConfig,
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    /// Частота host render loop (кадров/сек)
    pub frame_rate_hz: f32,
    /// AI тикает каждый N-й кадр
    pub ai_throttle_interval: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_rate_hz: 60.0,
            ai_throttle_interval: 2,
        }
    }
}

impl SimulationConfig {
    /// Частота AI тиков (Hz) после throttle
    pub fn ai_tick_hz(&self) -> f32 {
        self.frame_rate_hz / self.ai_throttle_interval.max(1) as f32
    }
}

/// Параметры гоблина
///
/// Скорости — смещение за один AI тик (units/tick), не m/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoblinConfig {
    pub look_distance: f32,
    pub sens_distance: f32,
    pub attack_range: f32,
    pub normal_speed: f32,
    pub sprint_speed: f32,
    pub health: u32,
    pub damage: u32,
    pub attack_interval_secs: f32,
    pub wander_interval_secs: f32,
    /// Половина стороны квадрата wander точек вокруг home
    pub wander_extent: f32,
    /// Боковой разброс при Search
    pub search_jitter: f32,
    /// Дистанция центров, при которой тела считаются касающимися
    pub contact_radius: f32,
    pub gravity: f32,
    pub probe_length: f32,
    pub ground_offset: f32,
}

impl Default for GoblinConfig {
    fn default() -> Self {
        Self {
            look_distance: 6.0,
            sens_distance: 20.0,
            attack_range: 1.5,
            normal_speed: 0.1,
            sprint_speed: 0.2,
            health: 50,
            damage: 10,
            attack_interval_secs: 1.57,
            wander_interval_secs: 5.0,
            wander_extent: 5.0,
            search_jitter: 2.0,
            contact_radius: 0.65, // ellipsoid гоблина 0.25 + capsule игрока 0.4
            gravity: -10.0,
            probe_length: 3.0,
            ground_offset: 0.1,
        }
    }
}

impl GoblinConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            look_distance: self.look_distance,
            sens_distance: self.sens_distance,
            attack_range: self.attack_range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_enemies: u32,
    pub max_enemies: u32,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_enemies: 1,
            max_enemies: 5,
            inner_radius: 10.0,
            outer_radius: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: [f32; 3],
    pub health: u32,
    pub damage: u32,
    pub normal_speed: f32,
    pub sprint_speed: f32,
    pub gravity: f32,
    pub probe_length: f32,
    /// Скорость slerp поворота (доля за секунду)
    pub turn_rate: f32,
    pub attack_reach: f32,
    pub attack_cooldown_frames: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 0.0, 0.0],
            health: 100,
            damage: 20,
            normal_speed: 0.17,
            sprint_speed: 0.35,
            gravity: -10.0,
            probe_length: 2.0,
            turn_rate: 5.0,
            attack_reach: 2.0,
            attack_cooldown_frames: 40,
        }
    }
}

impl PlayerConfig {
    pub fn spawn_position(&self) -> Vec3 {
        Vec3::from_array(self.spawn)
    }
}

impl ArenaConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Проверка согласованности порогов/радиусов
    pub fn validate(&self) -> Result<(), ConfigError> {
        let goblin = &self.goblin;
        if goblin.look_distance >= goblin.sens_distance {
            return Err(ConfigError::Invalid(format!(
                "look_distance ({}) must be below sens_distance ({})",
                goblin.look_distance, goblin.sens_distance
            )));
        }
        if goblin.attack_range > goblin.look_distance {
            return Err(ConfigError::Invalid(format!(
                "attack_range ({}) must not exceed look_distance ({})",
                goblin.attack_range, goblin.look_distance
            )));
        }
        if self.spawn.inner_radius > self.spawn.outer_radius {
            return Err(ConfigError::Invalid(format!(
                "inner_radius ({}) must not exceed outer_radius ({})",
                self.spawn.inner_radius, self.spawn.outer_radius
            )));
        }
        if self.spawn.min_enemies == 0 || self.spawn.min_enemies > self.spawn.max_enemies {
            return Err(ConfigError::Invalid(format!(
                "enemy count range {}..={} is empty",
                self.spawn.min_enemies, self.spawn.max_enemies
            )));
        }
        if self.simulation.ai_throttle_interval == 0 {
            return Err(ConfigError::Invalid("ai_throttle_interval must be >= 1".into()));
        }

        // gen_range паникует на пустом диапазоне, cooldown/скорости ≤ 0 бессмысленны
        require_positive("simulation.frame_rate_hz", self.simulation.frame_rate_hz)?;
        require_positive("goblin.normal_speed", goblin.normal_speed)?;
        require_positive("goblin.sprint_speed", goblin.sprint_speed)?;
        require_positive("goblin.attack_interval_secs", goblin.attack_interval_secs)?;
        require_positive("goblin.wander_interval_secs", goblin.wander_interval_secs)?;
        require_non_negative("goblin.wander_extent", goblin.wander_extent)?;
        require_non_negative("goblin.search_jitter", goblin.search_jitter)?;
        require_non_negative("goblin.contact_radius", goblin.contact_radius)?;
        require_non_negative("spawn.inner_radius", self.spawn.inner_radius)?;
        require_positive("player.normal_speed", self.player.normal_speed)?;
        require_positive("player.sprint_speed", self.player.sprint_speed)?;
        require_non_negative("player.turn_rate", self.player.turn_rate)?;
        require_non_negative("player.attack_reach", self.player.attack_reach)?;
        Ok(())
    }
}

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be finite and > 0 (got {})", name, value)))
    }
}

fn require_non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be finite and >= 0 (got {})", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ArenaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.goblin.sens_distance, 20.0);
        assert_eq!(config.spawn.max_enemies, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ArenaConfig::from_json_str(r#"{ "goblin": { "health": 80 } }"#)
            .expect("valid json");

        assert_eq!(config.goblin.health, 80);
        assert_eq!(config.goblin.look_distance, 6.0);
        assert_eq!(config.player.damage, 20);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let json = r#"{ "goblin": { "look_distance": 25.0 } }"#;
        let err = ArenaConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "err = {err}");
    }

    #[test]
    fn test_zero_throttle_rejected() {
        let json = r#"{ "simulation": { "ai_throttle_interval": 0 } }"#;
        assert!(ArenaConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_negative_wander_extent_rejected() {
        let json = r#"{ "goblin": { "wander_extent": -5.0, "search_jitter": -2.0 } }"#;
        assert!(matches!(
            ArenaConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));

        let json = r#"{ "goblin": { "search_jitter": -2.0 } }"#;
        assert!(matches!(
            ArenaConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_degenerate_speeds_and_intervals_rejected() {
        let cases = [
            r#"{ "goblin": { "attack_interval_secs": 0.0 } }"#,
            r#"{ "goblin": { "normal_speed": -0.1 } }"#,
            r#"{ "goblin": { "sprint_speed": 0.0 } }"#,
            r#"{ "player": { "sprint_speed": -1.0 } }"#,
            r#"{ "spawn": { "inner_radius": -1.0 } }"#,
        ];
        for json in cases {
            assert!(
                matches!(ArenaConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{} must be rejected",
                json
            );
        }

        let mut config = ArenaConfig::default();
        config.goblin.attack_interval_secs = f32::NAN;
        assert!(config.validate().is_err());
        config.goblin.attack_interval_secs = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_wander_extent_is_allowed() {
        // Пустой квадрат wander = стоим на home, диапазон -0..=0 не пустой
        let json = r#"{ "goblin": { "wander_extent": 0.0, "search_jitter": 0.0 } }"#;
        assert!(ArenaConfig::from_json_str(json).is_ok());
    }

    #[test]
    fn test_garbage_json_is_parse_error() {
        let err = ArenaConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_ai_tick_hz() {
        let sim = SimulationConfig::default();
        assert_eq!(sim.ai_tick_hz(), 30.0);
    }
}

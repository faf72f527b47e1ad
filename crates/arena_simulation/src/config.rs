//! ArenaConfig - все tuning-константы арены в одном resource
//!
//! Загружается из TOML (все поля опциональны, недостающие берутся из Default).
//! Вектора хранятся как `[f32; 3]`, чтобы не тянуть serde-фичу glam.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::logger::LogLevel;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
    /// Seed для DeterministicRng
    pub seed: u64,
    /// Минимальный уровень логов ("debug", "info", "warning", "error")
    pub log_level: String,

    /// Центр ринга (бойцы)
    pub ring_center: [f32; 3],
    /// Радиус ринга (бойцы)
    pub ring_radius: f32,
    /// Радиус ринга рефери (шире, чем у бойцов)
    pub referee_ring_radius: f32,

    /// Ближе этого бот стоит на месте (анти-jitter)
    pub contact_threshold: f32,
    /// Дистанция, в которой бот стоит и атакует
    pub stopping_distance: f32,
    /// Скорость поворота (slerp factor в секунду)
    pub turn_rate: f32,

    /// Начальная задержка AttackScheduler: [min, max] секунд
    pub initial_attack_delay: [f32; 2],
    /// Разброс cadence (0.2 → [0.8c, 1.2c])
    pub cadence_jitter: f32,

    /// Пауза между смертью и рестартом раунда (секунды)
    pub round_restart_delay: f32,
    /// Длительность knock-out анимации (секунды)
    pub knockout_duration: f32,

    /// Количество генерируемых уровней
    pub level_count: usize,
    /// Max HP всех бойцов
    pub max_health: u32,

    pub player_spawn: [f32; 3],
    pub bot_spawn: [f32; 3],
    pub extra_bot_spawns: Vec<[f32; 3]>,
    /// Случайный сдвиг extra ботов по x/z (±)
    pub extra_spawn_jitter: f32,

    /// Рефери на ринге (опционально)
    pub spawn_referee: bool,
    pub referee_spawn: [f32; 3],
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 60.0,
            seed: 42,
            log_level: "debug".to_string(),
            ring_center: [0.0, 0.0, 0.0],
            ring_radius: 5.0,
            referee_ring_radius: 7.0,
            contact_threshold: 0.5,
            stopping_distance: 2.0,
            turn_rate: 5.0,
            initial_attack_delay: [0.5, 2.0],
            cadence_jitter: 0.2,
            round_restart_delay: 5.0,
            knockout_duration: 2.0,
            level_count: 10,
            max_health: 100,
            player_spawn: [0.0, 0.0, -3.0],
            bot_spawn: [0.0, 0.0, 3.0],
            extra_bot_spawns: vec![[3.0, 0.0, 2.0], [-3.0, 0.0, 2.0], [0.0, 0.0, 4.0]],
            extra_spawn_jitter: 1.5,
            spawn_referee: true,
            referee_spawn: [4.0, 0.0, 0.0],
        }
    }
}

impl ArenaConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid { field, reason: reason.into() }
        }

        if !(self.fixed_hz > 0.0) {
            return Err(invalid("fixed_hz", "must be positive"));
        }
        if !(self.ring_radius > 0.0) {
            return Err(invalid("ring_radius", "must be positive"));
        }
        if !(self.referee_ring_radius > 0.0) {
            return Err(invalid("referee_ring_radius", "must be positive"));
        }
        let [delay_min, delay_max] = self.initial_attack_delay;
        if delay_min < 0.0 || delay_min > delay_max {
            return Err(invalid(
                "initial_attack_delay",
                format!("expected 0 <= min <= max, got [{delay_min}, {delay_max}]"),
            ));
        }
        if !(0.0..1.0).contains(&self.cadence_jitter) {
            return Err(invalid("cadence_jitter", "must be in [0, 1)"));
        }
        if self.round_restart_delay < self.knockout_duration {
            // Смерть должна быть показана до ресета раунда
            return Err(invalid(
                "round_restart_delay",
                format!(
                    "{} is shorter than knockout_duration {}",
                    self.round_restart_delay, self.knockout_duration
                ),
            ));
        }
        if self.level_count == 0 {
            return Err(invalid("level_count", "at least one level is required"));
        }
        if self.max_health == 0 {
            return Err(invalid("max_health", "must be at least 1"));
        }
        if self.contact_threshold < 0.0 || self.stopping_distance < self.contact_threshold {
            return Err(invalid(
                "stopping_distance",
                "must be >= contact_threshold >= 0",
            ));
        }
        if LogLevel::parse(&self.log_level).is_none() {
            return Err(invalid("log_level", format!("unknown level `{}`", self.log_level)));
        }
        Ok(())
    }

    pub fn ring_center(&self) -> Vec3 {
        Vec3::from_array(self.ring_center)
    }

    pub fn player_spawn(&self) -> Vec3 {
        Vec3::from_array(self.player_spawn)
    }

    pub fn bot_spawn(&self) -> Vec3 {
        Vec3::from_array(self.bot_spawn)
    }

    pub fn extra_bot_spawns(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.extra_bot_spawns.iter().copied().map(Vec3::from_array)
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.log_level).unwrap_or(LogLevel::Debug)
    }
}

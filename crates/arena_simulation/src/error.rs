//! Ошибки симуляции
//!
//! Все ошибки обрабатываются на границе системы, где обнаружены (лог + no-op),
//! до верхнего уровня ничего не доходит.

use bevy::prelude::Entity;
use thiserror::Error;

/// Ошибки combat/AI/round слоя
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    /// Обязательный collaborator отсутствует (target, spawn points, ...)
    #[error("missing collaborator for {entity:?}: {what}")]
    MissingCollaborator { entity: Option<Entity>, what: &'static str },

    /// Отрицательный урон - отклоняем, здоровье не трогаем
    #[error("invalid damage amount {amount} (must be non-negative)")]
    InvalidDamage { amount: i32 },

    /// Старт раунда невозможен (пустая таблица уровней, курсор за концом таблицы)
    #[error("invalid round state: {0}")]
    InvalidRoundState(String),

    /// Повторный start() у уже запущенного AttackScheduler
    #[error("attack scheduler already running (run {run_id})")]
    SchedulerAlreadyRunning { run_id: u64 },
}

/// Ошибки загрузки/валидации ArenaConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

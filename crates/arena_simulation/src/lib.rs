//! Arena Simulation Core
//!
//! ECS-симуляция боёв на ринге на Bevy 0.16 (headless)
//!
//! Разделение ответственности:
//! - ECS = game state, AI, combat rules, раунды/уровни
//! - Движок = physics, rendering, animation clips, hitbox collision

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod director;
pub mod error;
pub mod logger;
pub mod ring;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, Bot, BotBehavior, BotState, BotTuning, Referee, TierApplied};
pub use combat::{
    AnimTrigger, AnimationTrigger, AttackKind, AttackScheduler, CombatPlugin, CombatantDied, CombatantHit,
    HitDetector, HitWindow, HitboxContact, KnockedOut, PlayerCombo,
};
pub use components::*;
pub use config::ArenaConfig;
pub use director::{DirectorPlugin, GameMode, LevelTable, MatchPhase, MatchRequest, MatchState, Roster};
pub use error::{CombatError, ConfigError};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel, LogPrinter};
pub use ring::RingBounds;

/// Фазы одного fixed tick (строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaSet {
    /// Hit windows + contacts
    Hits,
    /// Damage + knock-out wait
    Damage,
    /// MatchDirector: requests, deaths, round restart
    Match,
    /// Bot FSM + attack schedulers
    Behavior,
    /// Player combo
    Attacks,
    Referee,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: ArenaConfig,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;
        set_log_level(config.log_level());

        app
            // Fixed timestep для simulation tick (60Hz по умолчанию)
            .insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(RingBounds::new(config.ring_center(), config.ring_radius))
            .insert_resource(combat::SchedulerTiming::from_config(config))
            .insert_resource(config.clone())
            .configure_sets(
                FixedUpdate,
                (
                    ArenaSet::Hits,
                    ArenaSet::Damage,
                    ArenaSet::Match,
                    ArenaSet::Behavior,
                    ArenaSet::Attacks,
                    ArenaSet::Referee,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            )
            // Подсистемы
            .add_plugins((CombatPlugin, DirectorPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(config: ArenaConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin { config });

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

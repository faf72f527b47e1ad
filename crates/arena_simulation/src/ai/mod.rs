//! AI decision-making module
//!
//! Bot FSM (Approach/Evade/Engage/Holding) + attack scheduling + referee.

use bevy::prelude::*;

use crate::ArenaSet;

pub mod bot;
pub mod referee;
pub mod tier;


// Re-export основных типов
pub use bot::{
    apply_tier, bot_behavior, decide, drive_attack_schedulers, Bot, BotBehavior, BotState, BotTuning,
    Situation, TierApplied,
};
pub use referee::{referee_follow, Referee};
pub use tier::{TierStats, MAX_TIER, STOPPING_DISTANCE};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. bot_behavior - FSM transitions + движение + scheduler start/stop
/// 2. drive_attack_schedulers - resumption AttackScheduler (после stop() этого tick)
/// 3. referee_follow - рефери (после всех перемещений бойцов)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TierApplied>();

        app.add_systems(
            FixedUpdate,
            (
                (bot_behavior, drive_attack_schedulers)
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(ArenaSet::Behavior),
                referee_follow.in_set(ArenaSet::Referee),
            ),
        );
    }
}

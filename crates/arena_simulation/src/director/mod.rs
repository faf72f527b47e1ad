//! MatchDirector: раунды, уровни, спавн бойцов
//!
//! Menu → InRound → RoundEnding → InRound (next level) → … → Complete
//!
//! MatchState и курсор уровня меняются только системами этого модуля.

use bevy::prelude::*;

use crate::ArenaSet;

pub mod levels;
pub mod roster;
pub mod spawn;
pub mod state;
pub mod systems;

// Re-export основных типов
pub use levels::{LevelConfig, LevelTable};
pub use roster::Roster;
pub use spawn::{jittered, spawn_bot, spawn_player, spawn_referee, CombatantTemplate};
pub use state::{GameMode, MatchPhase, MatchRequest, MatchState, RoundAdvance};
pub use systems::{
    handle_match_requests, on_death, round_reset, setup_arena, tick_round_restart, RoundMember,
};

/// Director Plugin
///
/// Порядок выполнения (FixedUpdate, после damage):
/// 1. handle_match_requests - SelectMode/StartGame
/// 2. on_death - первая смерть раунда → game over + countdown
/// 3. tick_round_restart - countdown → round reset
pub struct DirectorPlugin;

impl Plugin for DirectorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MatchRequest>()
            .init_resource::<MatchState>()
            .init_resource::<LevelTable>()
            .init_resource::<Roster>();

        app.add_systems(Startup, setup_arena);

        app.add_systems(
            FixedUpdate,
            (handle_match_requests, on_death, tick_round_restart)
                .chain()
                .in_set(ArenaSet::Match),
        );
    }
}

//! MatchState - round/level state machine
//!
//! ```text
//! Menu ──start──▶ InRound ──first death──▶ RoundEnding ──delay──▶ InRound (next level)
//!                                                        └──past last level──▶ Complete
//! ```
//!
//! Чистая логика без ECS queries: системы director'а только двигают её по событиям.

use std::time::Duration;

use bevy::prelude::*;

use crate::error::CombatError;

/// Режим матча: сколько extra ботов спавнить
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum GameMode {
    #[default]
    OneVsOne,
    OneVsMany,
    ManyVsMany,
}

impl GameMode {
    pub fn extra_opponents(self) -> usize {
        match self {
            GameMode::OneVsOne => 0,
            GameMode::OneVsMany => 2,
            GameMode::ManyVsMany => 3,
        }
    }
}

/// Запросы от меню (UI слой)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum MatchRequest {
    /// Выбор режима в меню → сразу старт
    SelectMode(GameMode),
    StartGame(GameMode),
}

#[derive(Debug, Clone, Default)]
pub enum MatchPhase {
    #[default]
    Menu,
    InRound,
    /// Пауза после смерти, потом round reset
    RoundEnding { restart: Timer },
    /// Таблица уровней пройдена
    Complete,
}

/// Результат перехода к следующему уровню
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    /// Новый курсор уровня
    Next(usize),
    Complete,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct MatchState {
    phase: MatchPhase,
    /// 0-based курсор в LevelTable
    current_level: usize,
    /// Global game over: подавляет весь урон до явного сброса
    game_over: bool,
    mode: Option<GameMode>,
    rounds_played: u32,
    /// Активные extra боты (despawn/respawn на каждом старте)
    pub extra_bots: Vec<Entity>,
}

impl MatchState {
    pub fn phase(&self) -> &MatchPhase {
        &self.phase
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn is_in_round(&self) -> bool {
        matches!(self.phase, MatchPhase::InRound)
    }

    pub fn is_round_ending(&self) -> bool {
        matches!(self.phase, MatchPhase::RoundEnding { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, MatchPhase::Complete)
    }

    /// Можно ли стартовать игру с таблицей из `level_count` уровней
    pub fn check_can_start(&self, level_count: usize) -> Result<(), CombatError> {
        if self.is_round_ending() {
            return Err(CombatError::InvalidRoundState(
                "cannot start while the round is ending".to_string(),
            ));
        }
        if level_count == 0 {
            return Err(CombatError::InvalidRoundState("level table is empty".to_string()));
        }
        if self.current_level >= level_count {
            return Err(CombatError::InvalidRoundState(format!(
                "level cursor {} is past the table ({} levels)",
                self.current_level, level_count
            )));
        }
        Ok(())
    }

    /// Старт (после `check_can_start`): InRound, game over сброшен
    pub fn begin(&mut self, mode: GameMode) {
        self.mode = Some(mode);
        self.game_over = false;
        self.phase = MatchPhase::InRound;
    }

    /// Первая смерть раунда: game over + countdown до reset
    ///
    /// Возвращает false, если раунд уже заканчивается (повторная смерть игнорируется).
    pub fn begin_round_end(&mut self, restart_delay: f32) -> bool {
        if !self.is_in_round() || self.game_over {
            return false;
        }

        self.game_over = true;
        self.phase = MatchPhase::RoundEnding {
            restart: Timer::from_seconds(restart_delay, TimerMode::Once),
        };
        true
    }

    /// Tick countdown; true - пора делать round reset
    pub fn tick_restart(&mut self, delta: Duration) -> bool {
        let MatchPhase::RoundEnding { restart } = &mut self.phase else {
            return false;
        };

        restart.tick(delta);
        restart.just_finished()
    }

    /// Курсор вперёд. За концом таблицы → Complete (game over остаётся).
    pub fn advance_level(&mut self, level_count: usize) -> RoundAdvance {
        self.current_level += 1;
        self.rounds_played += 1;

        if self.current_level >= level_count {
            self.phase = MatchPhase::Complete;
            return RoundAdvance::Complete;
        }

        self.game_over = false;
        self.phase = MatchPhase::InRound;
        RoundAdvance::Next(self.current_level)
    }
}

//! PlayerCombo - автоматическая серия ударов игрока
//!
//! Фиксированная последовательность: Punch1 (0.8s) → Hit1 (0.8s) → Punch1 (1.2s) → повтор.
//! Trigger стреляет сразу на шаге, потом ждём паузу шага.
//! MatchDirector перезапускает серию в начале каждого раунда.

use std::time::Duration;

use bevy::prelude::*;

use crate::combat::animation::{play_trigger, AnimationTrigger};
use crate::combat::attacker::PLAYER_HIT_DAMAGE;
use crate::combat::{AttackKind, HitDetector};
use crate::components::{Capabilities, Health, Sidelined};

/// Шаг серии: атака + пауза после неё
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboStep {
    pub attack: AttackKind,
    pub pause: Duration,
}

pub const PLAYER_COMBO: [ComboStep; 3] = [
    ComboStep { attack: AttackKind::PrimaryPunch, pause: Duration::from_millis(800) },
    ComboStep { attack: AttackKind::SecondaryHit, pause: Duration::from_millis(800) },
    ComboStep { attack: AttackKind::PrimaryPunch, pause: Duration::from_millis(1200) },
];

#[derive(Component, Debug, Clone)]
pub struct PlayerCombo {
    steps: Vec<ComboStep>,
    cursor: usize,
    /// None - серия остановлена
    wait: Option<Timer>,
    current_attack: Option<AttackKind>,
}

impl Default for PlayerCombo {
    fn default() -> Self {
        Self::new(PLAYER_COMBO.to_vec())
    }
}

impl PlayerCombo {
    pub fn new(steps: Vec<ComboStep>) -> Self {
        Self {
            steps,
            cursor: 0,
            wait: None,
            current_attack: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.wait.is_some()
    }

    pub fn current_attack(&self) -> Option<AttackKind> {
        self.current_attack
    }

    /// Остановить текущую серию (если есть) и начать с шага 0
    ///
    /// Первый trigger стреляет на следующем tick.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.wait = Some(Timer::new(Duration::ZERO, TimerMode::Once));
    }

    pub fn stop(&mut self) {
        self.wait = None;
    }

    /// Tick серии. Возвращает атаку, если шаг сработал.
    ///
    /// Мертвый игрок выходит из серии (yield break), до следующего `restart()`.
    pub fn tick(&mut self, delta: Duration, self_dead: bool) -> Option<AttackKind> {
        let wait = self.wait.as_mut()?;
        wait.tick(delta);
        if !wait.finished() {
            return None;
        }

        if self_dead || self.steps.is_empty() {
            self.wait = None;
            return None;
        }

        let step = self.steps[self.cursor % self.steps.len()];
        self.cursor = (self.cursor + 1) % self.steps.len();
        self.current_attack = Some(step.attack);
        self.wait = Some(Timer::new(step.pause, TimerMode::Once));

        Some(step.attack)
    }
}

/// Система: tick серии игрока
///
/// Сработавший шаг → Punch1/Hit1 trigger + урон detector'а = PLAYER_HIT_DAMAGE.
pub fn drive_player_combo(
    mut players: Query<
        (Entity, &mut PlayerCombo, &Health, Option<&mut HitDetector>, Option<&Capabilities>),
        Without<Sidelined>,
    >,
    mut animations: EventWriter<AnimationTrigger>,
    time: Res<Time<Fixed>>,
) {
    for (entity, mut combo, health, detector, capabilities) in players.iter_mut() {
        let Some(attack) = combo.tick(time.delta(), health.is_dead()) else {
            continue;
        };

        if let Some(mut detector) = detector {
            detector.damage = PLAYER_HIT_DAMAGE;
        }

        play_trigger(&mut animations, entity, capabilities, attack.into());
        crate::log(&format!("{:?}: combo step {:?}", entity, attack));
    }
}

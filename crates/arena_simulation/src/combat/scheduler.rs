//! AttackScheduler: cancellable timed attack loop (one per combatant).
//!
//! # States
//!
//! ```text
//! Idle ──start()──▶ Scheduled ──stop() / termination──▶ Idle
//! ```
//!
//! A run waits an initial random delay, then on every resumption checks the
//! termination conditions (self dead, target dead/unreachable), picks an attack
//! uniformly from [`AttackKind::ROTATION`], reports it to the caller and waits a
//! jittered cadence interval.
//!
//! Suspension is an explicit [`Timer`] inside the component. `stop()` drops the timer
//! together with its run id, so a cancelled run can never resume.

use std::time::Duration;

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::combat::AttackKind;
use crate::config::ArenaConfig;
use crate::error::CombatError;

/// Timing bounds shared by all schedulers.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SchedulerTiming {
    /// Initial delay lower bound (seconds).
    pub initial_delay_min: f32,
    /// Initial delay upper bound (seconds).
    pub initial_delay_max: f32,
    /// Cadence jitter: interval is drawn from `[cadence × (1 - j), cadence × (1 + j)]`.
    pub jitter: f32,
}

impl Default for SchedulerTiming {
    fn default() -> Self {
        Self {
            initial_delay_min: 0.5,
            initial_delay_max: 2.0,
            jitter: 0.2,
        }
    }
}

impl SchedulerTiming {
    pub fn from_config(config: &ArenaConfig) -> Self {
        let [initial_delay_min, initial_delay_max] = config.initial_attack_delay;
        Self {
            initial_delay_min,
            initial_delay_max,
            jitter: config.cadence_jitter,
        }
    }

    fn initial_delay(&self, rng: &mut impl Rng) -> f32 {
        if self.initial_delay_max <= self.initial_delay_min {
            return self.initial_delay_min;
        }
        rng.gen_range(self.initial_delay_min..=self.initial_delay_max)
    }

    /// Jittered wait for the given cadence.
    pub fn interval(&self, cadence: f32, rng: &mut impl Rng) -> f32 {
        let low = cadence * (1.0 - self.jitter);
        let high = cadence * (1.0 + self.jitter);
        if high <= low {
            return low;
        }
        rng.gen_range(low..=high)
    }
}

/// What a resumption needs to know about the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeContext {
    pub self_dead: bool,
    /// Target resolved and alive.
    pub target_available: bool,
}

/// One in-flight loop.
#[derive(Debug, Clone)]
pub struct ScheduledRun {
    /// Cancellation token: identifies the run that armed `wait`.
    pub run_id: u64,
    /// Cadence captured at start (seconds).
    pub cadence: f32,
    /// Current suspension (initial delay or cadence interval).
    pub wait: Timer,
}

/// Scheduler state per combatant.
#[derive(Debug, Clone, Default)]
pub enum SchedulerPhase {
    #[default]
    Idle,
    Scheduled(ScheduledRun),
}

/// Attack loop component.
#[derive(Component, Debug, Clone, Default)]
pub struct AttackScheduler {
    phase: SchedulerPhase,
    /// Single "currently selected attack" slot, overwritten every cycle.
    current_attack: Option<AttackKind>,
    next_run_id: u64,
    /// Total attacks fired across all runs (diagnostics).
    attacks_fired: u32,
}

impl AttackScheduler {
    pub fn is_scheduled(&self) -> bool {
        matches!(self.phase, SchedulerPhase::Scheduled(_))
    }

    pub fn phase(&self) -> &SchedulerPhase {
        &self.phase
    }

    pub fn current_attack(&self) -> Option<AttackKind> {
        self.current_attack
    }

    pub fn attacks_fired(&self) -> u32 {
        self.attacks_fired
    }

    /// Id of the active run, if any.
    pub fn run_id(&self) -> Option<u64> {
        match &self.phase {
            SchedulerPhase::Scheduled(run) => Some(run.run_id),
            SchedulerPhase::Idle => None,
        }
    }

    /// Idle → Scheduled. Starting an already scheduled loop is a caller bug.
    pub fn start(
        &mut self,
        cadence: f32,
        timing: &SchedulerTiming,
        rng: &mut impl Rng,
    ) -> Result<u64, CombatError> {
        if let SchedulerPhase::Scheduled(run) = &self.phase {
            return Err(CombatError::SchedulerAlreadyRunning { run_id: run.run_id });
        }

        self.next_run_id += 1;
        let run_id = self.next_run_id;
        let delay = timing.initial_delay(rng);

        self.phase = SchedulerPhase::Scheduled(ScheduledRun {
            run_id,
            cadence,
            wait: Timer::from_seconds(delay, TimerMode::Once),
        });

        Ok(run_id)
    }

    /// Cancel the in-flight wait. Idempotent; returns true if a run was cancelled.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.phase) {
            SchedulerPhase::Scheduled(_) => true,
            SchedulerPhase::Idle => false,
        }
    }

    /// Advance the active wait; returns the attack fired by this resumption, if any.
    ///
    /// A run that meets a termination condition returns to Idle without firing.
    pub fn tick(
        &mut self,
        delta: Duration,
        context: ResumeContext,
        timing: &SchedulerTiming,
        rng: &mut impl Rng,
    ) -> Option<AttackKind> {
        let SchedulerPhase::Scheduled(run) = &mut self.phase else {
            return None;
        };

        run.wait.tick(delta);
        if !run.wait.finished() {
            return None;
        }

        if context.self_dead || !context.target_available {
            self.phase = SchedulerPhase::Idle;
            return None;
        }

        let attack = *AttackKind::ROTATION.choose(rng)?;
        let interval = timing.interval(run.cadence, rng);

        run.wait = Timer::from_seconds(interval, TimerMode::Once);
        self.current_attack = Some(attack);
        self.attacks_fired += 1;

        Some(attack)
    }

    /// Round reset: cancel and forget the selected attack.
    pub fn reset(&mut self) {
        self.stop();
        self.current_attack = None;
    }
}

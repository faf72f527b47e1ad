//! Bot behavior state machine
//!
//! Состояния: Approach, Evade, Engage, Holding (пересчёт каждый fixed tick).
//!
//! Приоритет переходов:
//! 1. свой/target dead или global game over → Holding (scheduler stop)
//! 2. distance < contact threshold → Holding (анти-jitter вплотную)
//! 3. distance ≤ evade → Evade (вбок, сторона случайная каждый tick)
//! 4. distance ≤ stopping → Engage (стоим, scheduler start один раз на входе)
//! 5. иначе → Approach
//!
//! Движение всегда проходит через RingBounds::clamp.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::tier::{TierStats, STOPPING_DISTANCE};
use crate::combat::{
    play_trigger, AnimationTrigger, AttackDamage, AttackScheduler, HitDetector, ResumeContext,
    SchedulerTiming,
};
use crate::components::{Capabilities, Health, Role, Sidelined};
use crate::config::ArenaConfig;
use crate::director::{MatchState, Roster};
use crate::error::CombatError;
use crate::ring::RingBounds;
use crate::DeterministicRng;

/// Состояние бота
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum BotState {
    Approach,
    Evade,
    Engage,
    #[default]
    Holding,
}

/// Маркер бота (opponent под управлением AI)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(BotBehavior, BotTuning, AttackScheduler)]
pub struct Bot;

/// Runtime state AI
#[derive(Component, Debug, Clone, Default)]
pub struct BotBehavior {
    pub state: BotState,
    /// MissingCollaborator warning уже залогирован
    target_warned: bool,
}

impl BotBehavior {
    /// Сброс между раундами
    pub fn hold(&mut self) {
        self.state = BotState::Holding;
    }
}

/// Tuning бота - меняется только через tier (`set_tier` / `apply_stats`)
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BotTuning {
    tier: u8,
    move_speed: f32,
    cadence: f32,
    evade_distance: f32,
    stopping_distance: f32,
    damage: AttackDamage,
}

impl Default for BotTuning {
    fn default() -> Self {
        Self::from_stats(TierStats::for_tier(0), STOPPING_DISTANCE)
    }
}

impl BotTuning {
    fn from_stats(stats: TierStats, stopping_distance: f32) -> Self {
        Self {
            tier: stats.tier,
            move_speed: stats.move_speed,
            cadence: stats.cadence,
            evade_distance: stats.evade_distance,
            stopping_distance,
            damage: AttackDamage::uniform(stats.damage),
        }
    }

    /// Tuning бота с нужным tier и stopping distance из конфига
    pub fn with_tier(tier: i32, stopping_distance: f32) -> Self {
        Self::from_stats(TierStats::for_tier(tier), stopping_distance)
    }

    /// Пересчитать tuning по tier (вне [0, 9] → clamp + warning)
    pub fn set_tier(&mut self, tier: i32) -> TierStats {
        let stats = TierStats::for_tier(tier);
        self.apply_stats(stats);
        stats
    }

    /// Tuning из готовых stats уровня (stopping distance не меняется)
    pub fn apply_stats(&mut self, stats: TierStats) {
        *self = Self::from_stats(stats, self.stopping_distance);
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn cadence(&self) -> f32 {
        self.cadence
    }

    pub fn evade_distance(&self) -> f32 {
        self.evade_distance
    }

    pub fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    pub fn damage(&self) -> AttackDamage {
        self.damage
    }

    /// Ручной tuning для сценариев, которые tier-формула не даёт
    #[cfg(test)]
    pub(crate) fn custom(move_speed: f32, cadence: f32, evade_distance: f32, stopping_distance: f32) -> Self {
        Self {
            tier: 0,
            move_speed,
            cadence,
            evade_distance,
            stopping_distance,
            damage: AttackDamage::default(),
        }
    }
}

/// Событие: tier применён к боту (для HUD/тестов)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TierApplied {
    pub entity: Entity,
    pub tier: u8,
}

/// Применить stats уровня к боту + обновить урон hit detector'а
pub fn apply_tier(
    entity: Entity,
    stats: TierStats,
    tuning: &mut BotTuning,
    scheduler: Option<&AttackScheduler>,
    detector: Option<&mut HitDetector>,
    events: &mut EventWriter<TierApplied>,
) {
    tuning.apply_stats(stats);

    if let Some(detector) = detector {
        let slot = scheduler.and_then(AttackScheduler::current_attack);
        detector.damage = tuning.damage().for_slot(slot);
    }

    events.write(TierApplied {
        entity,
        tier: stats.tier,
    });
    crate::log(&format!(
        "{:?}: tier {} (speed {:.2}, cadence {:.2}, damage {}, evade {:.2})",
        entity, stats.tier, stats.move_speed, stats.cadence, stats.damage, stats.evade_distance
    ));
}

/// Входные данные одного решения
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Situation {
    /// Planar distance до target
    pub distance: f32,
    pub self_dead: bool,
    pub target_dead: bool,
    pub game_over: bool,
}

/// Чистая функция перехода (приоритет сверху вниз)
pub fn decide(situation: Situation, tuning: &BotTuning, contact_threshold: f32) -> BotState {
    if situation.self_dead || situation.target_dead || situation.game_over {
        return BotState::Holding;
    }

    if situation.distance < contact_threshold {
        return BotState::Holding;
    }

    if situation.distance <= tuning.evade_distance() {
        return BotState::Evade;
    }

    if situation.distance <= tuning.stopping_distance() {
        return BotState::Engage;
    }

    BotState::Approach
}

fn planar(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Система: bot behavior (state machine + движение + scheduler start/stop)
pub fn bot_behavior(
    mut bots: Query<
        (Entity, &mut Transform, &mut BotBehavior, &mut AttackScheduler, &BotTuning, &Health),
        (With<Bot>, Without<Sidelined>),
    >,
    targets: Query<(&Transform, &Health), Without<Bot>>,
    roster: Res<Roster>,
    match_state: Res<MatchState>,
    ring: Res<RingBounds>,
    timing: Res<SchedulerTiming>,
    config: Res<ArenaConfig>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut behavior, mut scheduler, tuning, health) in bots.iter_mut() {
        let target = roster
            .target_for(Role::Opponent)
            .and_then(|player| targets.get(player).ok());

        let Some((target_transform, target_health)) = target else {
            if !behavior.target_warned {
                let err = CombatError::MissingCollaborator {
                    entity: Some(entity),
                    what: "player target",
                };
                crate::log_warning(&format!("Bot inert: {}", err));
                behavior.target_warned = true;
            }
            scheduler.stop();
            behavior.state = BotState::Holding;
            continue;
        };
        behavior.target_warned = false;

        let own = transform.translation;
        let to_target = planar(target_transform.translation - own);

        let situation = Situation {
            distance: to_target.length(),
            self_dead: health.is_dead(),
            target_dead: target_health.is_dead(),
            game_over: match_state.is_game_over(),
        };

        let previous = behavior.state;
        let next = decide(situation, tuning, config.contact_threshold);

        if next != previous {
            crate::log(&format!(
                "Bot {:?}: {:?} → {:?} (distance {:.2})",
                entity, previous, next, situation.distance
            ));
        }

        let direction = to_target.normalize_or_zero();
        let step = tuning.move_speed() * dt;

        let candidate = match next {
            BotState::Holding => {
                scheduler.stop();
                None
            }
            BotState::Evade => {
                scheduler.stop();
                // Перпендикуляр к направлению на target, сторона случайная
                let side = if rng.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let sideways = Vec3::new(-direction.z, 0.0, direction.x) * side;
                Some(own + sideways * step)
            }
            BotState::Engage => {
                if previous != BotState::Engage {
                    if let Err(err) = scheduler.start(tuning.cadence(), &timing, &mut rng.rng) {
                        crate::log_error(&format!("Bot {:?}: {}", entity, err));
                    }
                }
                None
            }
            BotState::Approach => {
                scheduler.stop();
                Some(own + direction * step)
            }
        };

        behavior.state = next;

        let Some(candidate) = candidate else {
            continue;
        };

        let moved = ring.clamp(candidate, own);
        transform.translation = moved;

        // Clamp скорректировал ход → смотрим на центр ринга, иначе по ходу движения
        let heading = if moved != candidate {
            planar(ring.center - own)
        } else {
            planar(moved - own)
        };
        if heading.length_squared() > f32::EPSILON {
            let desired = Transform::IDENTITY.looking_to(heading, Vec3::Y).rotation;
            let factor = (config.turn_rate * dt).min(1.0);
            transform.rotation = transform.rotation.slerp(desired, factor);
        }
    }
}

/// Система: tick AttackScheduler ботов
///
/// Сработавшая атака → Punch1/Hit1 trigger + урон hit detector'а из таблицы бота.
pub fn drive_attack_schedulers(
    mut bots: Query<
        (
            Entity,
            &mut AttackScheduler,
            &BotTuning,
            &Health,
            Option<&mut HitDetector>,
            Option<&Capabilities>,
        ),
        (With<Bot>, Without<Sidelined>),
    >,
    targets: Query<&Health, Without<Bot>>,
    roster: Res<Roster>,
    timing: Res<SchedulerTiming>,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<AnimationTrigger>,
    time: Res<Time<Fixed>>,
) {
    let target_available = roster
        .target_for(Role::Opponent)
        .and_then(|player| targets.get(player).ok())
        .is_some_and(Health::is_alive);

    for (entity, mut scheduler, tuning, health, detector, capabilities) in bots.iter_mut() {
        let context = ResumeContext {
            self_dead: health.is_dead(),
            target_available,
        };

        let Some(attack) = scheduler.tick(time.delta(), context, &timing, &mut rng.rng) else {
            continue;
        };

        if let Some(mut detector) = detector {
            detector.damage = tuning.damage().for_attack(attack);
        }

        play_trigger(&mut animations, entity, capabilities, attack.into());
        crate::log(&format!("Bot {:?}: attack {:?}", entity, attack));
    }
}

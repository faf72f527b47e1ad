//! Damage application + death lifecycle
//!
//! HitLanded → Health::apply_damage → CombatantHit / CombatantDied
//! - global game over gate (MatchState) подавляет весь урон
//! - после смерти в этом tick гейт закрывается сразу (до того как MatchDirector
//!   увидит CombatantDied), второй смерти в том же tick быть не может
//! - смерть запускает KnockedOut wait (death animation), потом лог "knock-out finished"

use bevy::prelude::*;

use crate::combat::animation::{play_trigger, AnimTrigger, AnimationTrigger};
use crate::combat::hitbox::HitLanded;
use crate::components::{Capabilities, DamageOutcome, Health};
use crate::config::ArenaConfig;
use crate::director::MatchState;

/// Событие: попадание по живому бойцу (для анимаций/VFX)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CombatantHit {
    pub entity: Entity,
    pub attacker: Entity,
    pub damage: u32,
    pub remaining: u32,
}

/// Событие: боец умер (health дошёл до 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CombatantDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Death animation wait (knock-out)
///
/// Удаляется по окончании таймера или при ресете раунда.
#[derive(Component, Debug, Clone)]
pub struct KnockedOut {
    pub timer: Timer,
}

impl KnockedOut {
    pub fn new(duration: f32) -> Self {
        Self {
            timer: Timer::from_seconds(duration, TimerMode::Once),
        }
    }
}

/// Система: apply damage от HitLanded событий
///
/// 1. Читаем HitLanded
/// 2. Health::apply_damage (gate: MatchState game over + смерть в этом tick)
/// 3. Hit → CombatantHit + StomachHit trigger
/// 4. Killed → CombatantDied + KnockOut trigger + KnockedOut wait
pub fn apply_damage(
    mut commands: Commands,
    mut hits: EventReader<HitLanded>,
    mut hit_events: EventWriter<CombatantHit>,
    mut died_events: EventWriter<CombatantDied>,
    mut animations: EventWriter<AnimationTrigger>,
    mut targets: Query<(&mut Health, Option<&Capabilities>)>,
    match_state: Res<MatchState>,
    config: Res<ArenaConfig>,
) {
    let mut gate_closed = match_state.is_game_over();

    for hit in hits.read() {
        let Ok((mut health, capabilities)) = targets.get_mut(hit.target) else {
            crate::log_warning(&format!("HitLanded: target {:?} has no Health component", hit.target));
            continue;
        };

        let outcome = match health.apply_damage(hit.damage, gate_closed) {
            Ok(outcome) => outcome,
            Err(err) => {
                crate::log_error(&format!("{:?} → {:?}: {}", hit.attacker, hit.target, err));
                continue;
            }
        };

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hit { remaining } => {
                crate::log(&format!(
                    "{:?} took {} damage from {:?}. Current HP: {}",
                    hit.target, hit.damage, hit.attacker, remaining
                ));

                hit_events.write(CombatantHit {
                    entity: hit.target,
                    attacker: hit.attacker,
                    damage: hit.damage.unsigned_abs(),
                    remaining,
                });
                play_trigger(&mut animations, hit.target, capabilities, AnimTrigger::StomachHit);
            }
            DamageOutcome::Killed => {
                gate_closed = true;
                crate::log_info(&format!("{:?} is DEAD (killed by {:?})", hit.target, hit.attacker));

                died_events.write(CombatantDied {
                    entity: hit.target,
                    killer: Some(hit.attacker),
                });

                if play_trigger(&mut animations, hit.target, capabilities, AnimTrigger::KnockOut) {
                    commands
                        .entity(hit.target)
                        .insert(KnockedOut::new(config.knockout_duration));
                } else {
                    crate::log_warning(&format!(
                        "{:?}: no animator, skipping knock-out animation",
                        hit.target
                    ));
                }
            }
        }
    }
}

/// Система: tick knock-out wait
pub fn tick_knockouts(
    mut commands: Commands,
    mut knocked_out: Query<(Entity, &mut KnockedOut)>,
    time: Res<Time<Fixed>>,
) {
    for (entity, mut knockout) in knocked_out.iter_mut() {
        knockout.timer.tick(time.delta());

        if knockout.timer.finished() {
            crate::log(&format!("{:?}: knock-out finished", entity));
            commands.entity(entity).remove::<KnockedOut>();
        }
    }
}

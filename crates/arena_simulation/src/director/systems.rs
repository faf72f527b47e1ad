//! MatchDirector systems: setup, start game, death → round end → reset

use bevy::ecs::query::QueryItem;
use bevy::prelude::*;

use crate::ai::tier::TierStats;
use crate::ai::{apply_tier, BotBehavior, BotTuning, TierApplied};
use crate::combat::{
    play_trigger, AnimTrigger, AnimationTrigger, AttackScheduler, CombatantDied, HitDetector, KnockedOut,
    PlayerCombo,
};
use crate::components::{Capabilities, Combatant, Health, Role, Sidelined, SpawnAnchor};
use crate::config::ArenaConfig;
use crate::director::levels::{LevelConfig, LevelTable};
use crate::director::roster::Roster;
use crate::director::spawn::{jittered, spawn_bot, spawn_player, spawn_referee, CombatantTemplate};
use crate::director::state::{GameMode, MatchRequest, MatchState, RoundAdvance};
use crate::DeterministicRng;

/// Всё, что round reset трогает у бойца
pub type RoundMember = (
    Entity,
    &'static mut Transform,
    &'static mut Health,
    &'static SpawnAnchor,
    Option<&'static mut AttackScheduler>,
    Option<&'static mut BotBehavior>,
    Option<&'static mut BotTuning>,
    Option<&'static mut HitDetector>,
    Option<&'static mut PlayerCombo>,
    Option<&'static Capabilities>,
);

/// Startup: level table + игрок + основной бот (sidelined до старта) + рефери
pub fn setup_arena(
    mut commands: Commands,
    config: Res<ArenaConfig>,
    state: Res<MatchState>,
    mut levels: ResMut<LevelTable>,
    mut roster: ResMut<Roster>,
) {
    levels.ensure_generated(config.level_count);

    let player_template = CombatantTemplate::from_config(Role::Player, &config);
    let bot_template = CombatantTemplate::from_config(Role::Opponent, &config);

    let tier = levels.get(state.current_level()).map_or(0, LevelConfig::tier);

    let player = spawn_player(&mut commands, &player_template, config.player_spawn());
    let opponent = spawn_bot(
        &mut commands,
        &bot_template,
        config.bot_spawn(),
        BotTuning::with_tier(tier, config.stopping_distance),
        "Opponent",
    );
    commands.entity(opponent).insert(Sidelined);

    roster.player = Some(player);
    roster.opponent = Some(opponent);

    if config.spawn_referee {
        roster.referee = Some(spawn_referee(&mut commands, &config));
    }

    crate::log_info(&format!(
        "Arena ready: player {:?}, opponent {:?}, {} levels",
        player,
        opponent,
        levels.len()
    ));
}

/// Система: запросы меню (SelectMode / StartGame)
pub fn handle_match_requests(
    mut commands: Commands,
    mut requests: EventReader<MatchRequest>,
    mut state: ResMut<MatchState>,
    levels: Res<LevelTable>,
    roster: Res<Roster>,
    config: Res<ArenaConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut members: Query<RoundMember, With<Combatant>>,
    mut animations: EventWriter<AnimationTrigger>,
    mut tier_events: EventWriter<TierApplied>,
) {
    for request in requests.read() {
        let mode = match *request {
            MatchRequest::SelectMode(mode) => {
                crate::log_info(&format!("Mode selected: {:?}", mode));
                mode
            }
            MatchRequest::StartGame(mode) => mode,
        };

        start_game(
            mode,
            &mut commands,
            &mut state,
            &levels,
            &roster,
            &config,
            &mut rng,
            &mut members,
            &mut animations,
            &mut tier_events,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn start_game(
    mode: GameMode,
    commands: &mut Commands,
    state: &mut MatchState,
    levels: &LevelTable,
    roster: &Roster,
    config: &ArenaConfig,
    rng: &mut DeterministicRng,
    members: &mut Query<RoundMember, With<Combatant>>,
    animations: &mut EventWriter<AnimationTrigger>,
    tier_events: &mut EventWriter<TierApplied>,
) {
    if let Err(err) = state.check_can_start(levels.len()) {
        crate::log_error(&format!("startGame({:?}) rejected: {}", mode, err));
        return;
    }
    let Some(level) = levels.get(state.current_level()).copied() else {
        return;
    };

    // Extra боты прошлого старта
    let removed: Vec<Entity> = state.extra_bots.drain(..).collect();
    for &entity in &removed {
        commands.entity(entity).despawn();
    }

    for entity in [roster.player, roster.opponent].into_iter().flatten() {
        commands.entity(entity).remove::<Sidelined>();
    }

    for member in members.iter_mut() {
        if removed.contains(&member.0) {
            continue;
        }
        reset_member(member, commands, animations, false, Some((level.stats, &mut *tier_events)));
    }

    // Extra боты по режиму (не больше, чем есть spawn points)
    let wanted = mode.extra_opponents();
    let spawn_points: Vec<Vec3> = config.extra_bot_spawns().take(wanted).collect();
    if spawn_points.len() < wanted {
        crate::log_warning(&format!(
            "{:?}: {} extra opponents wanted, only {} spawn points",
            mode,
            wanted,
            spawn_points.len()
        ));
    }

    let template = CombatantTemplate::from_config(Role::Opponent, config);
    for (index, point) in spawn_points.into_iter().enumerate() {
        let anchor = jittered(point, config.extra_spawn_jitter, &mut rng.rng);
        let mut tuning = BotTuning::with_tier(0, config.stopping_distance);
        let entity = spawn_bot(commands, &template, anchor, tuning.clone(), &format!("Opponent {}", index + 2));

        // Tier как у остальных ботов: через apply_tier (tuning + detector + TierApplied)
        let mut detector = HitDetector::new(template.role.opposing());
        apply_tier(entity, level.stats, &mut tuning, None, Some(&mut detector), tier_events);
        commands.entity(entity).insert((tuning, detector));

        state.extra_bots.push(entity);
    }

    state.begin(mode);
    crate::log_info(&format!(
        "Game started: {:?}, level {} (tier {}), {} extra opponents",
        mode,
        level.level_index,
        level.tier(),
        state.extra_bots.len()
    ));
}

/// Сброс одного бойца: anchor, health, scheduler, FSM, hit window, combo
///
/// `tier` - stats уровня для ботов (None - боты остаются на текущем tuning).
fn reset_member(
    member: QueryItem<'_, RoundMember>,
    commands: &mut Commands,
    animations: &mut EventWriter<AnimationTrigger>,
    rebind: bool,
    tier: Option<(TierStats, &mut EventWriter<TierApplied>)>,
) {
    let (
        entity,
        mut transform,
        mut health,
        anchor,
        mut scheduler,
        behavior,
        tuning,
        mut detector,
        combo,
        capabilities,
    ) = member;

    transform.translation = anchor.0;
    health.reset();

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.reset();
    }
    if let Some(mut behavior) = behavior {
        behavior.hold();
    }
    if let Some(detector) = detector.as_mut() {
        detector.enabled = false;
    }
    if let Some(mut combo) = combo {
        combo.restart();
    }

    commands.entity(entity).remove::<KnockedOut>();

    if rebind {
        play_trigger(animations, entity, capabilities, AnimTrigger::Rebind);
    }

    if let (Some((stats, events)), Some(mut tuning)) = (tier, tuning) {
        apply_tier(
            entity,
            stats,
            &mut tuning,
            scheduler.as_deref(),
            detector.as_deref_mut(),
            events,
        );
    }
}

/// Система: смерть бойца → game over + countdown до round reset
pub fn on_death(
    mut deaths: EventReader<CombatantDied>,
    mut state: ResMut<MatchState>,
    config: Res<ArenaConfig>,
) {
    for death in deaths.read() {
        if state.begin_round_end(config.round_restart_delay) {
            crate::log_info(&format!(
                "Round over: {:?} died (killer {:?}), restart in {:.1}s",
                death.entity, death.killer, config.round_restart_delay
            ));
        } else {
            crate::log(&format!("Death of {:?} ignored (round already ending)", death.entity));
        }
    }
}

/// Система: countdown RoundEnding → round reset
pub fn tick_round_restart(
    mut commands: Commands,
    mut state: ResMut<MatchState>,
    levels: Res<LevelTable>,
    mut members: Query<RoundMember, With<Combatant>>,
    mut animations: EventWriter<AnimationTrigger>,
    mut tier_events: EventWriter<TierApplied>,
    time: Res<Time<Fixed>>,
) {
    if !state.tick_restart(time.delta()) {
        return;
    }

    round_reset(
        &mut commands,
        &mut state,
        &levels,
        &mut members,
        &mut animations,
        &mut tier_events,
    );
}

/// Round reset: все бойцы на anchor'ы, health reset, курсор уровня вперёд
///
/// За концом таблицы → Complete, tier не применяется.
pub fn round_reset(
    commands: &mut Commands,
    state: &mut MatchState,
    levels: &LevelTable,
    members: &mut Query<RoundMember, With<Combatant>>,
    animations: &mut EventWriter<AnimationTrigger>,
    tier_events: &mut EventWriter<TierApplied>,
) {
    let advance = state.advance_level(levels.len());

    let tier = match advance {
        RoundAdvance::Next(cursor) => levels.get(cursor).map(|level| level.stats),
        RoundAdvance::Complete => None,
    };

    for member in members.iter_mut() {
        let apply = match tier {
            Some(stats) => Some((stats, &mut *tier_events)),
            None => None,
        };
        reset_member(member, commands, animations, true, apply);
    }

    match (advance, tier) {
        (RoundAdvance::Complete, _) => {
            crate::log_info(&format!(
                "All {} levels complete after {} rounds",
                levels.len(),
                state.rounds_played()
            ));
        }
        (RoundAdvance::Next(cursor), Some(stats)) => {
            crate::log_info(&format!("Round reset: level {} (tier {})", cursor + 1, stats.tier));
        }
        (RoundAdvance::Next(cursor), None) => {
            crate::log_error(&format!("Round reset: no level config at cursor {}", cursor));
        }
    }
}

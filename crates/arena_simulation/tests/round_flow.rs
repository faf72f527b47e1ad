//! Round/level flow integration tests
//!
//! Menu → InRound → RoundEnding → InRound (next level) → … → Complete

mod common;

use arena_simulation::*;
use bevy::prelude::*;
use common::*;

/// Бот убивает игрока (max_health 20, урон 10)
fn knock_out_player(app: &mut App) {
    let (bot, player) = (opponent(app), player(app));
    strike(app, bot, player, 2);
    app.update();
    assert!(health(app, player).is_dead());
}

fn small_config() -> ArenaConfig {
    ArenaConfig {
        max_health: 20,
        ..test_config()
    }
}

#[test]
fn test_startup_in_menu() {
    let app = arena_app(test_config());

    let state = match_state(&app);
    assert!(matches!(state.phase(), MatchPhase::Menu));
    assert_eq!(state.current_level(), 0);
    assert_eq!(app.world().resource::<LevelTable>().len(), 10);

    // Бойцы сняты с ринга до старта
    assert!(app.world().get::<Sidelined>(player(&app)).is_some());
    assert!(app.world().get::<Sidelined>(opponent(&app)).is_some());
    assert!(roster(&app).referee.is_some());
}

#[test]
fn test_select_mode_starts_round() {
    let mut app = arena_app(test_config());
    app.world_mut().send_event(MatchRequest::SelectMode(GameMode::OneVsOne));
    run_ticks(&mut app, 2);

    let state = match_state(&app);
    assert!(state.is_in_round());
    assert!(!state.is_game_over());
    assert_eq!(state.mode(), Some(GameMode::OneVsOne));
    assert!(state.extra_bots.is_empty());

    assert!(app.world().get::<Sidelined>(player(&app)).is_none());
    assert!(app.world().get::<Sidelined>(opponent(&app)).is_none());

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(
        recorded.tiers,
        vec![TierApplied {
            entity: opponent(&app),
            tier: 0
        }]
    );
}

#[test]
fn test_death_ends_round_and_advances_level() {
    let mut app = arena_app(small_config());
    start(&mut app, GameMode::OneVsOne);
    let (bot, player_entity) = (opponent(&app), player(&app));

    // Сдвигаем игрока - reset вернёт его на anchor
    app.world_mut().get_mut::<Transform>(player_entity).unwrap().translation = Vec3::new(1.0, 0.0, 1.0);

    knock_out_player(&mut app);

    let state = match_state(&app);
    assert!(state.is_game_over());
    assert!(state.is_round_ending());
    assert_eq!(app.world().resource::<Recorded>().deaths.len(), 1);

    // Пока game over - урон подавлен
    strike(&mut app, player_entity, bot, 3);
    app.update();
    assert_eq!(health(&app, bot).current(), 20);

    run_ticks(&mut app, ticks_for(0.5));

    let state = match_state(&app);
    assert_eq!(state.current_level(), 1);
    assert_eq!(state.rounds_played(), 1);
    assert!(state.is_in_round());
    assert!(!state.is_game_over());

    assert_eq!(health(&app, player_entity), Health::new(20));
    assert_eq!(
        app.world().get::<Transform>(player_entity).unwrap().translation,
        app.world().get::<SpawnAnchor>(player_entity).unwrap().0
    );
    assert!(app.world().get::<HitDetector>(bot).is_some_and(|detector| !detector.enabled));
    assert_eq!(app.world().get::<BotTuning>(bot).unwrap().tier(), 1);

    let recorded = app.world().resource::<Recorded>();
    assert!(recorded.triggers_for(player_entity).contains(&AnimTrigger::Rebind));
    assert!(recorded.triggers_for(bot).contains(&AnimTrigger::Rebind));
    assert_eq!(recorded.tiers.last(), Some(&TierApplied { entity: bot, tier: 1 }));
}

#[test]
fn test_reset_returns_combatants_to_anchors() {
    let mut app = arena_app(small_config());
    start(&mut app, GameMode::OneVsOne);
    let player_entity = player(&app);

    app.world_mut().get_mut::<Transform>(player_entity).unwrap().translation = Vec3::new(2.0, 0.0, 0.0);
    knock_out_player(&mut app);
    run_ticks(&mut app, ticks_for(0.5));

    let position = app.world().get::<Transform>(player_entity).unwrap().translation;
    assert_eq!(position, ArenaConfig::default().player_spawn());
}

#[test]
fn test_only_first_death_of_round_counts() {
    let mut app = arena_app(ArenaConfig {
        max_health: 10,
        ..test_config()
    });
    start(&mut app, GameMode::OneVsOne);
    let (bot, player_entity) = (opponent(&app), player(&app));

    // Оба удара смертельные и приходят в один tick
    strike(&mut app, bot, player_entity, 1);
    strike(&mut app, player_entity, bot, 1);
    app.update();

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.deaths.len(), 1);
    assert_eq!(recorded.deaths[0].entity, player_entity);
    assert!(health(&app, bot).is_alive());
    assert_eq!(health(&app, bot).current(), 10);
}

#[test]
fn test_start_rejected_while_round_ending() {
    let mut app = arena_app(small_config());
    start(&mut app, GameMode::OneVsOne);
    knock_out_player(&mut app);

    start(&mut app, GameMode::ManyVsMany);

    let state = match_state(&app);
    assert!(state.is_round_ending());
    assert_eq!(state.mode(), Some(GameMode::OneVsOne));
    assert!(state.extra_bots.is_empty());
}

#[test]
fn test_past_last_level_completes_without_tier() {
    let mut app = arena_app(ArenaConfig {
        level_count: 2,
        ..small_config()
    });
    start(&mut app, GameMode::OneVsOne);
    let bot = opponent(&app);

    knock_out_player(&mut app);
    run_ticks(&mut app, ticks_for(0.5));
    assert_eq!(match_state(&app).current_level(), 1);

    knock_out_player(&mut app);
    let tiers_before = app.world().resource::<Recorded>().tiers.len();
    run_ticks(&mut app, ticks_for(0.5));

    let state = match_state(&app);
    assert!(state.is_complete());
    assert!(state.is_game_over());
    assert_eq!(state.rounds_played(), 2);
    assert_eq!(app.world().resource::<Recorded>().tiers.len(), tiers_before);
    assert_eq!(app.world().get::<BotTuning>(bot).unwrap().tier(), 1);

    // После Complete старт отклоняется
    start(&mut app, GameMode::OneVsOne);
    assert!(match_state(&app).is_complete());
}

#[test]
fn test_one_vs_many_spawns_extras_with_jitter() {
    let mut app = arena_app(test_config());
    start(&mut app, GameMode::OneVsMany);
    app.update();

    let extras = match_state(&app).extra_bots.clone();
    assert_eq!(extras.len(), 2);

    let config = test_config();
    for (entity, point) in extras.iter().zip(config.extra_bot_spawns()) {
        let anchor = app.world().get::<SpawnAnchor>(*entity).unwrap().0;
        assert!((anchor.x - point.x).abs() <= config.extra_spawn_jitter);
        assert!((anchor.z - point.z).abs() <= config.extra_spawn_jitter);
        assert!(app.world().get::<Bot>(*entity).is_some());
    }

    // Рестарт в другом режиме: старые extra боты удалены
    start(&mut app, GameMode::ManyVsMany);
    app.update();

    let new_extras = match_state(&app).extra_bots.clone();
    assert_eq!(new_extras.len(), 3);
    for entity in extras {
        assert!(app.world().get_entity(entity).is_err());
    }

    let bots = app
        .world_mut()
        .query_filtered::<Entity, With<Bot>>()
        .iter(app.world())
        .count();
    assert_eq!(bots, 4);
}

#[test]
fn test_extras_capped_by_spawn_points() {
    let mut app = arena_app(ArenaConfig {
        extra_bot_spawns: vec![[3.0, 0.0, 2.0]],
        ..test_config()
    });
    start(&mut app, GameMode::ManyVsMany);

    assert_eq!(match_state(&app).extra_bots.len(), 1);
    assert!(match_state(&app).is_in_round());
}

#[test]
fn test_extras_on_later_level_carry_tier_damage() {
    let mut app = arena_app(small_config());
    start(&mut app, GameMode::OneVsOne);

    knock_out_player(&mut app);
    run_ticks(&mut app, ticks_for(0.5));
    assert_eq!(match_state(&app).current_level(), 1);

    start(&mut app, GameMode::OneVsMany);
    app.update();

    let extras = match_state(&app).extra_bots.clone();
    assert_eq!(extras.len(), 2);

    let primary = opponent(&app);
    let tiers = app.world().resource::<Recorded>().tiers.clone();
    for entity in extras.iter().copied().chain([primary]) {
        let tuning = app.world().get::<BotTuning>(entity).unwrap();
        assert_eq!(tuning.tier(), 1);

        let expected = tuning.damage().primary_punch;
        assert_eq!(expected, 15);
        assert_eq!(app.world().get::<HitDetector>(entity).unwrap().damage, expected);
        assert!(tiers.contains(&TierApplied { entity, tier: 1 }));
    }
}

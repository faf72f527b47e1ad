//! Общие helpers для integration тестов (headless App, ручное время, запись событий)

#![allow(dead_code)]

use std::time::Duration;

use arena_simulation::*;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

/// Конфиг для тестов: тихий лог, короткие паузы
pub fn test_config() -> ArenaConfig {
    ArenaConfig {
        log_level: "warning".to_string(),
        round_restart_delay: 0.5,
        knockout_duration: 0.2,
        ..ArenaConfig::default()
    }
}

/// Headless App: один `app.update()` = один fixed tick, Startup уже прошёл
pub fn arena_app(config: ArenaConfig) -> App {
    let step = Duration::from_secs_f64(1.0 / config.fixed_hz);

    let mut app = create_headless_app(config);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .init_resource::<Recorded>()
        .add_systems(Update, record_events);

    // Startup, нулевой delta
    app.update();
    app
}

pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Ticks для `seconds` при 60Hz (с запасом в один tick)
pub fn ticks_for(seconds: f32) -> usize {
    (seconds * 60.0).ceil() as usize + 1
}

/// Все события симуляции, накопленные с начала теста
#[derive(Resource, Default, Debug)]
pub struct Recorded {
    pub hits: Vec<CombatantHit>,
    pub deaths: Vec<CombatantDied>,
    pub triggers: Vec<AnimationTrigger>,
    pub tiers: Vec<TierApplied>,
}

impl Recorded {
    pub fn triggers_for(&self, entity: Entity) -> Vec<AnimTrigger> {
        self.triggers
            .iter()
            .filter(|event| event.entity == entity)
            .map(|event| event.trigger)
            .collect()
    }
}

fn record_events(
    mut recorded: ResMut<Recorded>,
    mut hits: EventReader<CombatantHit>,
    mut deaths: EventReader<CombatantDied>,
    mut triggers: EventReader<AnimationTrigger>,
    mut tiers: EventReader<TierApplied>,
) {
    recorded.hits.extend(hits.read().copied());
    recorded.deaths.extend(deaths.read().copied());
    recorded.triggers.extend(triggers.read().copied());
    recorded.tiers.extend(tiers.read().copied());
}

pub fn roster(app: &App) -> Roster {
    app.world().resource::<Roster>().clone()
}

pub fn player(app: &App) -> Entity {
    roster(app).player.expect("player spawned at startup")
}

pub fn opponent(app: &App) -> Entity {
    roster(app).opponent.expect("opponent spawned at startup")
}

pub fn match_state(app: &App) -> &MatchState {
    app.world().resource::<MatchState>()
}

pub fn health(app: &App, entity: Entity) -> Health {
    *app.world().get::<Health>(entity).expect("combatant has Health")
}

/// Старт матча (request обрабатывается на следующем tick)
pub fn start(app: &mut App, mode: GameMode) {
    app.world_mut().send_event(MatchRequest::StartGame(mode));
    app.update();
}

/// Движок: открыть окно `source` и прислать contacts в `target`
pub fn strike(app: &mut App, source: Entity, target: Entity, contacts: usize) {
    let world = app.world_mut();
    world.send_event(HitWindow { entity: source, open: true });
    for _ in 0..contacts {
        world.send_event(HitboxContact { source, target });
    }
}

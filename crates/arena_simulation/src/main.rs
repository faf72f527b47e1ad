//! Headless симуляция арены
//!
//! `arena_simulation [config.toml]` - OneVsOne матч без рендера, лог раундов.
//!
//! Движка нет, поэтому удары "попадают" через заглушку: каждый Punch1/Hit1
//! открывает hit window и шлёт contact в цель, если та в пределах досягаемости.

use std::time::Duration;

use arena_simulation::{
    create_headless_app, log_error, log_info, AnimTrigger, AnimationTrigger, ArenaConfig, ArenaSet,
    Combatant, GameMode, HitWindow, HitboxContact, MatchRequest, MatchState, Roster,
};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

const TICKS: u32 = 60 * 600;

/// Досягаемость удара сверх stopping distance
const REACH_SLACK: f32 = 0.5;

/// Заглушка движка: attack trigger → HitWindow(open) + HitboxContact, на следующем tick окно закрывается
fn emulate_hits(
    mut triggers: EventReader<AnimationTrigger>,
    mut windows: EventWriter<HitWindow>,
    mut contacts: EventWriter<HitboxContact>,
    combatants: Query<(&Combatant, &Transform)>,
    roster: Res<Roster>,
    config: Res<ArenaConfig>,
    mut open: Local<Vec<Entity>>,
) {
    let mut opened = Vec::new();

    for event in triggers.read() {
        if !matches!(event.trigger, AnimTrigger::Punch1 | AnimTrigger::Hit1) {
            continue;
        }
        let Ok((attacker, attacker_transform)) = combatants.get(event.entity) else {
            continue;
        };
        let Some(target) = roster.target_for(attacker.role) else {
            continue;
        };
        let Ok((_, target_transform)) = combatants.get(target) else {
            continue;
        };

        let reach = config.stopping_distance + REACH_SLACK;
        if attacker_transform.translation.distance(target_transform.translation) > reach {
            continue;
        }

        windows.write(HitWindow { entity: event.entity, open: true });
        contacts.write(HitboxContact { source: event.entity, target });
        opened.push(event.entity);
    }

    for entity in open.drain(..) {
        if !opened.contains(&entity) {
            windows.write(HitWindow { entity, open: false });
        }
    }
    *open = opened;
}

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match ArenaConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                arena_simulation::init_logger();
                log_error(&format!("Failed to load {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => ArenaConfig::default(),
    };

    let seed = config.seed;
    let step = Duration::from_secs_f64(1.0 / config.fixed_hz);

    let mut app = create_headless_app(config);
    // Один update = один fixed tick
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .add_systems(FixedUpdate, emulate_hits.after(ArenaSet::Referee));

    log_info(&format!("Starting arena headless simulation (seed: {})", seed));

    // Первый update: Startup (арена + бойцы в меню)
    app.update();
    app.world_mut().send_event(MatchRequest::SelectMode(GameMode::OneVsOne));

    let mut last_rounds = 0;
    for tick in 0..TICKS {
        app.update();

        let state = app.world().resource::<MatchState>();
        if state.rounds_played() != last_rounds {
            last_rounds = state.rounds_played();
            log_info(&format!(
                "Tick {}: {} rounds played, level cursor {}",
                tick,
                last_rounds,
                state.current_level()
            ));
        }

        if state.is_complete() {
            break;
        }
    }

    log_info("Simulation complete!");
}

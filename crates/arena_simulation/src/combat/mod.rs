//! Combat system module (engine-driven hit detection)
//!
//! ECS ответственность:
//! - Game state: Health, AttackScheduler, PlayerCombo, HitDetector damage
//! - Combat rules: game over gate, single death per round
//! - Events: CombatantHit, CombatantDied, AnimationTrigger
//!
//! Движок ответственность:
//! - Animator: проигрывает triggers, шлёт EnableHit/DisableHit (HitWindow)
//! - Hitbox collision: HitboxContact → ECS damage

use bevy::prelude::*;

use crate::ArenaSet;

pub mod animation;
pub mod attacker;
pub mod combo;
pub mod damage;
pub mod hitbox;
pub mod scheduler;

#[cfg(test)]
mod scheduler_tests;

// Re-export основных типов
pub use animation::{play_trigger, AnimTrigger, AnimationTrigger};
pub use attacker::{AttackDamage, AttackKind, DEFAULT_HIT_DAMAGE, PLAYER_HIT_DAMAGE};
pub use combo::{drive_player_combo, ComboStep, PlayerCombo, PLAYER_COMBO};
pub use damage::{apply_damage, tick_knockouts, CombatantDied, CombatantHit, KnockedOut};
pub use hitbox::{resolve_hitbox_contacts, toggle_hit_windows, HitDetector, HitLanded, HitWindow, HitboxContact};
pub use scheduler::{AttackScheduler, ResumeContext, SchedulerPhase, SchedulerTiming};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. toggle_hit_windows - EnableHit/DisableHit от движка
/// 2. resolve_hitbox_contacts - HitboxContact → HitLanded
/// 3. apply_damage - HitLanded → Health (game over gate)
/// 4. tick_knockouts - death animation wait
/// 5. drive_player_combo - серия ударов игрока (после AI)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<AnimationTrigger>()
            .add_event::<HitWindow>()
            .add_event::<HitboxContact>()
            .add_event::<HitLanded>()
            .add_event::<CombatantHit>()
            .add_event::<CombatantDied>();

        app.add_systems(
            Update,
            crate::components::validate_new_combatants,
        );

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: hit windows + contacts
                (toggle_hit_windows, resolve_hitbox_contacts)
                    .chain()
                    .in_set(ArenaSet::Hits),
                // Фаза 2: damage + death animation
                (apply_damage, tick_knockouts)
                    .chain()
                    .in_set(ArenaSet::Damage),
                // Фаза 5: player attacks
                drive_player_combo.in_set(ArenaSet::Attacks),
            ),
        );
    }
}

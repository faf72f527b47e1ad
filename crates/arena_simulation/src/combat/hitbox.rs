//! Hit detection collaborator (ECS side)
//!
//! Архитектура:
//! - HitDetector живёт на бойце: текущий урон + открыт ли hit window
//! - Окно открывает/закрывает движок по animation events (EnableHit / DisableHit)
//! - Коллизию считает движок и присылает HitboxContact
//! - ECS превращает contact в HitLanded (урон берётся из detector'а в момент contact)

use bevy::prelude::*;

use crate::combat::attacker::DEFAULT_HIT_DAMAGE;
use crate::components::{Capabilities, Combatant, Role};

/// Hit-detection collaborator бойца
///
/// `damage` перезаписывается на каждом выборе атаки и при `set_tier`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HitDetector {
    /// Урон, который нанесёт следующий contact
    pub damage: i32,
    /// Открыто ли окно удара
    pub enabled: bool,
    /// Кого бьём (Player бьёт Opponent и наоборот)
    pub target_role: Role,
}

impl HitDetector {
    pub fn new(target_role: Role) -> Self {
        Self {
            damage: DEFAULT_HIT_DAMAGE,
            enabled: false,
            target_role,
        }
    }
}

/// Событие (движок → ECS): animation event открыл/закрыл окно удара
#[derive(Event, Debug, Clone, Copy)]
pub struct HitWindow {
    pub entity: Entity,
    pub open: bool,
}

/// Событие (движок → ECS): hitbox `source` коснулся `target`
#[derive(Event, Debug, Clone, Copy)]
pub struct HitboxContact {
    pub source: Entity,
    pub target: Entity,
}

/// Событие: попадание подтверждено, урон нужно применить
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: i32,
}

/// Система: открытие/закрытие hit windows
pub fn toggle_hit_windows(
    mut events: EventReader<HitWindow>,
    mut detectors: Query<&mut HitDetector>,
) {
    for event in events.read() {
        let Ok(mut detector) = detectors.get_mut(event.entity) else {
            crate::log_warning(&format!(
                "HitWindow for {:?}: no HitDetector, ignoring",
                event.entity
            ));
            continue;
        };

        detector.enabled = event.open;
    }
}

/// Система: HitboxContact → HitLanded
///
/// Фильтры:
/// - окно source открыто
/// - у source есть hit detector capability
/// - target - боец нужной роли
pub fn resolve_hitbox_contacts(
    mut contacts: EventReader<HitboxContact>,
    mut hits: EventWriter<HitLanded>,
    sources: Query<(&HitDetector, Option<&Capabilities>)>,
    targets: Query<&Combatant>,
) {
    for contact in contacts.read() {
        if contact.source == contact.target {
            continue;
        }

        let Ok((detector, capabilities)) = sources.get(contact.source) else {
            continue;
        };

        if !detector.enabled {
            continue;
        }

        if capabilities.is_some_and(|caps| !caps.has_hit_detector()) {
            continue;
        }

        let Ok(target) = targets.get(contact.target) else {
            continue;
        };

        if target.role != detector.target_role {
            continue;
        }

        hits.write(HitLanded {
            attacker: contact.source,
            target: contact.target,
            damage: detector.damage,
        });

        crate::log(&format!(
            "Hitbox contact: {:?} → {:?} ({} damage)",
            contact.source, contact.target, detector.damage
        ));
    }
}

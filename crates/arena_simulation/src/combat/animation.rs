//! Animation signal sink (ECS → engine)
//!
//! Fire-and-forget: движок проигрывает trigger, подтверждения нет.

use bevy::prelude::*;

use crate::combat::AttackKind;
use crate::components::Capabilities;

/// Animation triggers, которые симуляция отправляет движку
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimTrigger {
    Punch1,
    Hit1,
    /// Реакция на попадание (боец жив)
    StomachHit,
    /// Смертельный удар
    KnockOut,
    /// Сброс animator state между раундами
    Rebind,
}

impl From<AttackKind> for AnimTrigger {
    fn from(attack: AttackKind) -> Self {
        match attack {
            AttackKind::PrimaryPunch => AnimTrigger::Punch1,
            AttackKind::SecondaryHit => AnimTrigger::Hit1,
        }
    }
}

/// Событие: проиграть trigger на entity
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationTrigger {
    pub entity: Entity,
    pub trigger: AnimTrigger,
}

/// Helper: отправить trigger, если у бойца есть animator capability
///
/// Без capability (или без компонента) trigger молча пропускается.
pub fn play_trigger(
    writer: &mut EventWriter<AnimationTrigger>,
    entity: Entity,
    capabilities: Option<&Capabilities>,
    trigger: AnimTrigger,
) -> bool {
    if !capabilities.is_some_and(Capabilities::has_animator) {
        return false;
    }

    writer.write(AnimationTrigger { entity, trigger });
    true
}

//! Spawn templates (игрок, боты, рефери)
//!
//! Движок сам подцепляет визуал к entity по Role/Referee компонентам.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{Bot, BotTuning, Referee};
use crate::combat::{HitDetector, PlayerCombo};
use crate::components::{Capabilities, Combatant, Health, Role, Sidelined, SpawnAnchor};
use crate::config::ArenaConfig;
use crate::ring::RingBounds;

/// Шаблон бойца: роль + max HP + capabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatantTemplate {
    pub role: Role,
    pub max_health: u32,
    pub capabilities: Capabilities,
}

impl CombatantTemplate {
    pub fn from_config(role: Role, config: &ArenaConfig) -> Self {
        Self {
            role,
            max_health: config.max_health,
            capabilities: Capabilities::default(),
        }
    }

    /// Общий bundle бойца в точке `anchor`
    fn bundle(&self, anchor: Vec3) -> impl Bundle {
        (
            Combatant { role: self.role },
            Health::new(self.max_health),
            SpawnAnchor(anchor),
            Transform::from_translation(anchor),
            self.capabilities,
        )
    }

    fn detector(&self) -> HitDetector {
        HitDetector::new(self.role.opposing())
    }
}

pub fn spawn_player(commands: &mut Commands, template: &CombatantTemplate, anchor: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("Player"),
            template.bundle(anchor),
            template.detector(),
            PlayerCombo::default(),
            Sidelined,
        ))
        .id()
}

/// Бот с уже применённым tier: урон detector'а берётся из его tuning
pub fn spawn_bot(
    commands: &mut Commands,
    template: &CombatantTemplate,
    anchor: Vec3,
    tuning: BotTuning,
    name: &str,
) -> Entity {
    let mut detector = template.detector();
    detector.damage = tuning.damage().for_slot(None);

    commands
        .spawn((Name::new(name.to_string()), template.bundle(anchor), detector, Bot, tuning))
        .id()
}

pub fn spawn_referee(commands: &mut Commands, config: &ArenaConfig) -> Entity {
    let ring = RingBounds::new(config.ring_center(), config.referee_ring_radius);
    let position = Vec3::from_array(config.referee_spawn);

    commands
        .spawn((
            Name::new("Referee"),
            Referee::new(ring),
            Transform::from_translation(position),
        ))
        .id()
}

/// Точка спавна extra бота: spawn point + jitter по x/z
pub fn jittered(point: Vec3, jitter: f32, rng: &mut impl Rng) -> Vec3 {
    if jitter <= 0.0 {
        return point;
    }

    Vec3::new(
        point.x + rng.gen_range(-jitter..=jitter),
        point.y,
        point.z + rng.gen_range(-jitter..=jitter),
    )
}

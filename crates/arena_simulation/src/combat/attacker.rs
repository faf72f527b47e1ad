//! Attack identifiers и таблица урона бойца
//!
//! ECS хранит: какие атаки есть, сколько урона каждая наносит.
//! Движок выполняет: анимацию удара, hitbox collision.

use bevy::prelude::*;

/// Урон, если атака ещё не выбрана (hitbox сработал до первого swing)
pub const DEFAULT_HIT_DAMAGE: i32 = 10;

/// Фиксированный урон атак игрока
pub const PLAYER_HIT_DAMAGE: i32 = 10;

/// Идентификатор атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AttackKind {
    /// Punch1
    PrimaryPunch,
    /// Hit1
    SecondaryHit,
}

impl AttackKind {
    /// Набор атак, из которого AttackScheduler выбирает равновероятно
    pub const ROTATION: [AttackKind; 2] = [AttackKind::PrimaryPunch, AttackKind::SecondaryHit];
}

/// Урон по каждой атаке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct AttackDamage {
    pub primary_punch: i32,
    pub secondary_hit: i32,
}

impl Default for AttackDamage {
    fn default() -> Self {
        Self::uniform(DEFAULT_HIT_DAMAGE)
    }
}

impl AttackDamage {
    pub fn uniform(damage: i32) -> Self {
        Self {
            primary_punch: damage,
            secondary_hit: damage,
        }
    }

    pub fn for_attack(&self, attack: AttackKind) -> i32 {
        match attack {
            AttackKind::PrimaryPunch => self.primary_punch,
            AttackKind::SecondaryHit => self.secondary_hit,
        }
    }

    /// Урон для текущего слота атаки (None → PrimaryPunch, первая атака ротации)
    pub fn for_slot(&self, attack: Option<AttackKind>) -> i32 {
        self.for_attack(attack.unwrap_or(AttackKind::PrimaryPunch))
    }
}

//! Базовые компоненты бойцов: Combatant, Role, Health

use bevy::prelude::*;

use crate::error::CombatError;

/// Роль бойца (замена string-тегов "Player"/"Bot")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Role {
    Player,
    Opponent,
}

impl Role {
    /// Кого бьёт эта роль
    pub fn opposing(self) -> Self {
        match self {
            Role::Player => Role::Opponent,
            Role::Opponent => Role::Player,
        }
    }
}

/// Боец (игрок или бот) - базовый компонент для живых участников раунда
///
/// Автоматически добавляет Health и Transform через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Health, Transform)]
pub struct Combatant {
    pub role: Role,
}

impl Combatant {
    pub fn player() -> Self {
        Self { role: Role::Player }
    }

    pub fn opponent() -> Self {
        Self { role: Role::Opponent }
    }
}

/// Точка, куда боец возвращается при ресете раунда
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpawnAnchor(pub Vec3);

/// Маркер: боец снят с ринга (меню) - AI/атаки не тикают
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Sidelined;

/// Результат `Health::apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Урон проигнорирован (уже мертв или game over)
    Ignored,
    /// Попадание, боец жив
    Hit { remaining: u32 },
    /// Смертельный удар (ровно один раз до reset)
    Killed,
}

/// Здоровье бойца
///
/// Инвариант: 0 ≤ current ≤ max, `dead` ⇔ current дошёл до 0 после урона.
/// Меняется только через `apply_damage` / `reset`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: u32,
    max: u32,
    dead: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Применить урон
    ///
    /// - отрицательный урон → `InvalidDamage`, здоровье не меняется
    /// - мертв или global game over → `Ignored`
    /// - HP флорится в 0, на 0 → `Killed` (dead = true)
    pub fn apply_damage(&mut self, amount: i32, game_over: bool) -> Result<DamageOutcome, CombatError> {
        if amount < 0 {
            return Err(CombatError::InvalidDamage { amount });
        }

        if self.dead || game_over {
            return Ok(DamageOutcome::Ignored);
        }

        self.current = self.current.saturating_sub(amount.unsigned_abs());

        if self.current == 0 {
            self.dead = true;
            Ok(DamageOutcome::Killed)
        } else {
            Ok(DamageOutcome::Hit {
                remaining: self.current,
            })
        }
    }

    /// Полное восстановление (только между раундами)
    pub fn reset(&mut self) {
        self.current = self.max;
        self.dead = false;
    }
}

bitflags::bitflags! {
    /// Опциональные capability бойца (вместо GetComponent lookup'ов)
    ///
    /// Проверяются один раз при появлении бойца (`validate_new_combatants`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilityFlags: u8 {
        /// Движок проигрывает animation triggers для этой entity
        const ANIMATOR = 0b0000_0001;
        /// Есть hit-detection collaborator (HitDetector)
        const HIT_DETECTOR = 0b0000_0010;
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities(pub CapabilityFlags);

impl Default for Capabilities {
    fn default() -> Self {
        Self(CapabilityFlags::all())
    }
}

impl Capabilities {
    pub fn has_animator(&self) -> bool {
        self.0.contains(CapabilityFlags::ANIMATOR)
    }

    pub fn has_hit_detector(&self) -> bool {
        self.0.contains(CapabilityFlags::HIT_DETECTOR)
    }
}

/// System: проверка capability у только что появившихся бойцов
///
/// Отсутствующий collaborator → warning, боец деградирует (без анимаций/без урона),
/// процесс не падает.
pub fn validate_new_combatants(
    new_combatants: Query<
        (Entity, &Combatant, Option<&Capabilities>, Has<crate::combat::HitDetector>),
        Added<Combatant>,
    >,
) {
    for (entity, combatant, capabilities, has_detector) in new_combatants.iter() {
        let flags = capabilities.map(|c| c.0).unwrap_or(CapabilityFlags::empty());

        if !flags.contains(CapabilityFlags::ANIMATOR) {
            crate::log_warning(&format!(
                "{:?} ({:?}): no animator capability, animation triggers will be skipped",
                entity, combatant.role
            ));
        }

        if flags.contains(CapabilityFlags::HIT_DETECTOR) != has_detector {
            crate::log_warning(&format!(
                "{:?} ({:?}): hit detector capability mismatch (flag: {}, component: {}), hits from it are ignored",
                entity,
                combatant.role,
                flags.contains(CapabilityFlags::HIT_DETECTOR),
                has_detector
            ));
        } else if !has_detector {
            crate::log_warning(&format!(
                "{:?} ({:?}): no hit detector, this combatant cannot deal damage",
                entity, combatant.role
            ));
        }
    }
}

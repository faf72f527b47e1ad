//! Difficulty tiers: одна монотонная формула tier → bot tuning

/// Максимальный tier (10 уровней: 0..=9)
pub const MAX_TIER: i32 = 9;

/// Дистанция атаки не зависит от tier
pub const STOPPING_DISTANCE: f32 = 2.0;

/// Bot tuning для одного tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStats {
    pub tier: u8,
    pub move_speed: f32,
    /// Секунды между атаками (до jitter)
    pub cadence: f32,
    /// Урон обеих атак
    pub damage: i32,
    pub evade_distance: f32,
}

impl TierStats {
    /// Tuning для tier; вне [0, MAX_TIER] → clamp + warning
    pub fn for_tier(tier: i32) -> Self {
        let clamped = clamp_tier(tier);
        if clamped != tier {
            crate::log_warning(&format!(
                "tier {} out of range [0, {}], clamped to {}",
                tier, MAX_TIER, clamped
            ));
        }

        let t = clamped as f32;
        Self {
            tier: clamped as u8,
            move_speed: 2.0 + 0.3 * t,
            cadence: (0.6 - 0.05 * t).max(0.2),
            damage: 10 + 5 * clamped,
            evade_distance: 0.2 + 0.15 * t,
        }
    }
}

pub fn clamp_tier(tier: i32) -> i32 {
    tier.clamp(0, MAX_TIER)
}

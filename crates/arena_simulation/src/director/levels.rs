//! Level table: упорядоченная прогрессия раундов

use bevy::prelude::*;

use crate::ai::tier::{clamp_tier, TierStats};

/// Один уровень (immutable после генерации)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// 1-based
    pub level_index: u32,
    pub stats: TierStats,
}

impl LevelConfig {
    pub fn new(level_index: u32) -> Self {
        let tier = clamp_tier(level_index as i32 - 1);
        Self {
            level_index,
            stats: TierStats::for_tier(tier),
        }
    }

    /// tier = level_index - 1, в [0, 9]
    pub fn tier(&self) -> i32 {
        clamp_tier(self.level_index as i32 - 1)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl LevelTable {
    pub fn generate(count: usize) -> Self {
        Self {
            levels: (1..=count as u32).map(LevelConfig::new).collect(),
        }
    }

    /// Генерирует таблицу, если она пустая. true - если сгенерировали.
    pub fn ensure_generated(&mut self, count: usize) -> bool {
        if !self.levels.is_empty() {
            return false;
        }

        *self = Self::generate(count);
        crate::log_info(&format!("Generated {} levels", self.levels.len()));
        true
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, cursor: usize) -> Option<&LevelConfig> {
        self.levels.get(cursor)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

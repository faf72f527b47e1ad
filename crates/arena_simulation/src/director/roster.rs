//! Roster - кто есть кто на ринге (вместо поиска по тегам)

use bevy::prelude::*;

use crate::components::Role;

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub player: Option<Entity>,
    /// Основной бот (extra боты - в MatchState::extra_bots)
    pub opponent: Option<Entity>,
    pub referee: Option<Entity>,
}

impl Roster {
    /// Основная цель для роли: Opponent бьёт игрока, Player - основного бота
    pub fn target_for(&self, role: Role) -> Option<Entity> {
        match role {
            Role::Opponent => self.player,
            Role::Player => self.opponent,
        }
    }
}

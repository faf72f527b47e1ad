//! Referee: следует за серединой между игроком и основным ботом
//!
//! Не боец (нет Combatant/Health), урон не получает.

use bevy::prelude::*;

use crate::director::Roster;
use crate::ring::RingBounds;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Referee {
    /// Держим дистанцию до середины
    pub keep_distance: f32,
    /// Максимальная скорость (units/s)
    pub speed: f32,
    /// Свой ринг (шире, чем у бойцов)
    pub ring: RingBounds,
}

impl Referee {
    pub fn new(ring: RingBounds) -> Self {
        Self {
            keep_distance: 0.05,
            speed: 5.0,
            ring,
        }
    }

    /// Следующая позиция рефери (None - уже на месте)
    pub fn next_position(&self, current: Vec3, player: Vec3, opponent: Vec3, dt: f32) -> Option<Vec3> {
        let midpoint = Vec3::new(
            (player.x + opponent.x) * 0.5,
            current.y,
            (player.z + opponent.z) * 0.5,
        );

        let offset = midpoint - current;
        let distance = offset.length();
        if distance <= self.keep_distance {
            return None;
        }

        let goal = self.ring.confine(midpoint - offset / distance * self.keep_distance);
        let delta = goal - current;
        let max_step = self.speed * dt;

        if delta.length() <= max_step {
            Some(goal)
        } else {
            Some(current + delta.normalize() * max_step)
        }
    }
}

/// Система: движение рефери
pub fn referee_follow(
    mut referees: Query<(&Referee, &mut Transform)>,
    fighters: Query<&Transform, Without<Referee>>,
    roster: Res<Roster>,
    time: Res<Time<Fixed>>,
) {
    let (Some(player), Some(opponent)) = (roster.player, roster.opponent) else {
        return;
    };
    let (Ok(player), Ok(opponent)) = (fighters.get(player), fighters.get(opponent)) else {
        return;
    };

    for (referee, mut transform) in referees.iter_mut() {
        if let Some(next) = referee.next_position(
            transform.translation,
            player.translation,
            opponent.translation,
            time.delta_secs(),
        ) {
            transform.translation = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_referee_moves_toward_midpoint() {
        let referee = Referee::new(RingBounds::new(Vec3::ZERO, 7.0));
        let current = Vec3::new(4.0, 0.0, 0.0);

        let next = referee
            .next_position(current, Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 3.0), DT)
            .unwrap();

        // Не быстрее speed
        assert!((next - current).length() <= 5.0 * DT + 1e-5);
        assert!(next.x < current.x);
    }

    #[test]
    fn test_referee_stops_near_midpoint() {
        let referee = Referee::new(RingBounds::new(Vec3::ZERO, 7.0));
        let current = Vec3::new(0.03, 0.0, 0.0);

        assert_eq!(
            referee.next_position(current, Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 3.0), DT),
            None
        );
    }

    #[test]
    fn test_referee_confined_to_ring() {
        let referee = Referee::new(RingBounds::new(Vec3::ZERO, 7.0));
        let mut position = Vec3::new(6.0, 1.0, 0.0);

        // Оба бойца далеко за рингом рефери
        for _ in 0..600 {
            if let Some(next) =
                referee.next_position(position, Vec3::new(20.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 2.0), DT)
            {
                position = next;
            }
        }

        assert!((referee.ring.planar_distance(position) - 7.0).abs() < 1e-3);
        assert_eq!(position.y, 1.0);
    }
}

//! Shared combatant components: markers, health, direction.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The human combatant. Spawns with full combat state via required components.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, crate::components::PlayerAction)]
pub struct Player;

/// The opposing combatant. Both arms idle on spawn.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, crate::components::EnemyArms)]
pub struct Enemy;

/// Side of an action (punch or dodge). `None` means "no action".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize,
)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// Combatant health pool.
///
/// Invariant: 0 <= current <= max. All damage goes through `take_damage`
/// (saturating), so health never underflows.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(500)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Grows the pool by `factor` (rounded) and refills it. Used between
    /// rounds: each defeated opponent comes back with 1.5x health.
    pub fn scale_max(&mut self, factor: f32) {
        self.max = (self.max as f32 * factor).round() as u32;
        self.current = self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(500);
        assert_eq!(health.current, 500);

        health.take_damage(20);
        assert_eq!(health.current, 480);
        assert!(health.is_alive());

        health.take_damage(1000); // saturating, never negative
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_damage_sequence_clamps_at_zero() {
        let mut health = Health::new(100);
        for _ in 0..50 {
            health.take_damage(7);
        }
        // 50 * 7 = 350 > 100, clamped
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_health_heal_clamps_at_max() {
        let mut health = Health::new(100);
        health.take_damage(60);
        health.heal(30);
        assert_eq!(health.current, 70);

        health.heal(100);
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_health_round_scaling() {
        let mut health = Health::new(500);
        health.take_damage(500);
        assert!(!health.is_alive());

        health.scale_max(1.5);
        assert_eq!(health.max, 750);
        assert_eq!(health.current, 750);

        health.scale_max(1.5);
        assert_eq!(health.max, 1125);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::None.opposite(), Direction::None);
    }
}

//! Player action state: one combined dodge/punch machine.
//!
//! Unlike the enemy, the player has a single action slot — a dodge and a
//! punch cannot overlap. Punch sides alternate automatically so the player
//! only supplies the rhythm, not the choreography.

use bevy::prelude::*;

use crate::components::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PlayerActionState {
    #[default]
    Idle,
    Dodging(Direction),
    Punching(Direction),
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerAction {
    pub state: PlayerActionState,
    /// Countdown back to idle, in ms (half a beat per action).
    pub state_timer_ms: f64,
    /// Side of the last punch thrown; the next one goes the other way.
    pub prev_punch_direction: Direction,
}

impl Default for PlayerAction {
    fn default() -> Self {
        Self {
            state: PlayerActionState::Idle,
            state_timer_ms: 0.0,
            prev_punch_direction: Direction::Left,
        }
    }
}

impl PlayerAction {
    pub fn is_idle(&self) -> bool {
        self.state == PlayerActionState::Idle
    }

    /// Direction currently being dodged, or `None` when not dodging.
    pub fn dodge_direction(&self) -> Direction {
        match self.state {
            PlayerActionState::Dodging(dir) => dir,
            _ => Direction::None,
        }
    }

    pub fn next_punch_direction(&self) -> Direction {
        self.prev_punch_direction.opposite()
    }

    /// Starts a dodge. No-op while another action is in flight.
    pub fn begin_dodge(&mut self, direction: Direction, duration_ms: f64) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = PlayerActionState::Dodging(direction);
        self.state_timer_ms = duration_ms;
        true
    }

    /// Starts a punch and flips the alternation side. No-op while another
    /// action is in flight.
    pub fn begin_punch(&mut self, direction: Direction, duration_ms: f64) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = PlayerActionState::Punching(direction);
        self.state_timer_ms = duration_ms;
        self.prev_punch_direction = direction;
        true
    }

    /// Counts the action down; returns true on the transition back to idle.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        if self.is_idle() {
            return false;
        }
        self.state_timer_ms -= delta_ms;
        if self.state_timer_ms > 0.0 {
            return false;
        }
        self.state = PlayerActionState::Idle;
        self.state_timer_ms = 0.0;
        true
    }

    pub fn reset(&mut self) {
        self.state = PlayerActionState::Idle;
        self.state_timer_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dodge_returns_to_idle() {
        let mut action = PlayerAction::default();
        assert!(action.begin_dodge(Direction::Left, 300.0));
        assert_eq!(action.dodge_direction(), Direction::Left);

        assert!(!action.tick(150.0));
        assert!(action.tick(150.0));
        assert!(action.is_idle());
        assert_eq!(action.dodge_direction(), Direction::None);
    }

    #[test]
    fn test_actions_do_not_overlap() {
        let mut action = PlayerAction::default();
        assert!(action.begin_dodge(Direction::Right, 300.0));
        assert!(!action.begin_punch(Direction::Left, 300.0));
        assert!(!action.begin_dodge(Direction::Left, 300.0));
        assert_eq!(action.state, PlayerActionState::Dodging(Direction::Right));
    }

    #[test]
    fn test_punch_sides_alternate() {
        let mut action = PlayerAction::default();
        // prev starts Left, so the first punch goes Right.
        assert_eq!(action.next_punch_direction(), Direction::Right);

        action.begin_punch(action.next_punch_direction(), 300.0);
        action.tick(300.0);
        assert_eq!(action.next_punch_direction(), Direction::Left);

        action.begin_punch(action.next_punch_direction(), 300.0);
        action.tick(300.0);
        assert_eq!(action.next_punch_direction(), Direction::Right);
    }
}

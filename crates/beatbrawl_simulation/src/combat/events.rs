//! Combat events.
//!
//! Inbound: `PlayerInputEvent` (the abstract keypress source). Everything
//! else flows outward to whatever presentation layer embeds the simulation —
//! animation triggers, health-bar updates, timing feedback text, countdown
//! cues, scene transitions. The core never renders; it only announces.

use bevy::prelude::*;

use crate::beat::BeatQuality;
use crate::combat::arbiter::AttackPhase;
use crate::components::Direction;

/// Discrete input from the host (keyboard, gamepad, test script).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInputEvent {
    pub action: InputAction,
    /// Session-clock timestamp of the press; judged against the beat grid.
    pub at_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    DodgeLeft,
    DodgeRight,
    Punch,
}

impl InputAction {
    pub fn dodge_direction(self) -> Direction {
        match self {
            InputAction::DodgeLeft => Direction::Left,
            InputAction::DodgeRight => Direction::Right,
            InputAction::Punch => Direction::None,
        }
    }
}

/// A combatant's visible action changed; the presentation layer keys
/// animation off this.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActionStateChanged {
    pub entity: Entity,
    /// Which side acted (limb for the enemy, dodge/punch side for the player).
    pub direction: Direction,
    pub state: ActionStateKind,
}

/// Presentation-facing view of a combatant action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStateKind {
    Idle,
    Dodging,
    WindingUp,
    WindUpComplete,
    Punching,
}

/// The enemy committed a punch with one arm. Resolution (dodge vs hit)
/// happens downstream the same frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyPunch {
    pub direction: Direction,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub amount: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CombatantDied {
    pub entity: Entity,
}

/// The player cleanly dodged an enemy punch (scoring / tutorial tracking).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PunchDodged {
    pub direction: Direction,
}

/// On-beat player attack judged; drives the feedback text.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TimingJudged {
    pub quality: BeatQuality,
}

/// The player punched off-beat during their own window; initiative returns
/// to the enemy on the next tick.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackMissed;

/// Initiative switched; hosts run the countdown UI off this.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PhaseSwitched {
    pub phase: AttackPhase,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RoundWon {
    /// The round that was just won (1-based).
    pub round: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RoundLost;

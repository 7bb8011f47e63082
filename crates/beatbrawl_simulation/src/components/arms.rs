//! Enemy limb state machines.
//!
//! Each arm runs the cycle IDLE → WINDING_UP → WIND_UP_COMPLETE → PUNCHING →
//! IDLE independently. The timed transitions (wind-up completing, punch
//! retracting) are owned here as countdown timers ticked by the fixed-update
//! schedule — there is exactly one scheduled-transition primitive, so a round
//! reset cancels everything in flight at once.

use bevy::prelude::*;

use crate::components::Direction;

/// Phase of one arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ArmPhase {
    #[default]
    Idle,
    /// Telegraphing a punch; completes after half a beat.
    WindingUp,
    /// Ready to punch, waiting for the policy to pull the trigger.
    WindUpComplete,
    /// Punch in flight; retracts to idle after half a beat.
    Punching,
}

/// One arm: current phase plus the countdown to its next automatic transition.
#[derive(Debug, Clone, Copy, Default, Reflect)]
pub struct Arm {
    pub phase: ArmPhase,
    pub phase_timer_ms: f64,
}

impl Arm {
    /// Starts a wind-up. No-op unless idle: a wind-up on an already-winding
    /// arm is an expected race with the arbiter's forced-completion path,
    /// not a bug.
    pub fn begin_wind_up(&mut self, duration_ms: f64) -> bool {
        if self.phase != ArmPhase::Idle {
            return false;
        }
        self.phase = ArmPhase::WindingUp;
        self.phase_timer_ms = duration_ms;
        true
    }

    /// Throws the punch. No-op unless the wind-up has completed.
    pub fn begin_punch(&mut self, duration_ms: f64) -> bool {
        if self.phase != ArmPhase::WindUpComplete {
            return false;
        }
        self.phase = ArmPhase::Punching;
        self.phase_timer_ms = duration_ms;
        true
    }

    /// Counts the phase timer down; returns the new phase when an automatic
    /// transition fires (WINDING_UP → WIND_UP_COMPLETE, PUNCHING → IDLE).
    pub fn tick(&mut self, delta_ms: f64) -> Option<ArmPhase> {
        match self.phase {
            ArmPhase::WindingUp | ArmPhase::Punching => {
                self.phase_timer_ms -= delta_ms;
                if self.phase_timer_ms > 0.0 {
                    return None;
                }
                self.phase_timer_ms = 0.0;
                self.phase = match self.phase {
                    ArmPhase::WindingUp => ArmPhase::WindUpComplete,
                    _ => ArmPhase::Idle,
                };
                Some(self.phase)
            }
            // Idle waits for the policy; WindUpComplete waits for a punch.
            _ => None,
        }
    }

    /// True while a punch is pending: the attack string must not end with
    /// this arm stranded mid-telegraph.
    pub fn is_winding(&self) -> bool {
        matches!(self.phase, ArmPhase::WindingUp | ArmPhase::WindUpComplete)
    }

    pub fn reset(&mut self) {
        self.phase = ArmPhase::Idle;
        self.phase_timer_ms = 0.0;
    }
}

/// Both enemy arms.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct EnemyArms {
    pub left: Arm,
    pub right: Arm,
}

impl EnemyArms {
    pub fn arm(&self, side: Direction) -> Option<&Arm> {
        match side {
            Direction::Left => Some(&self.left),
            Direction::Right => Some(&self.right),
            Direction::None => None,
        }
    }

    /// True if either arm has a punch pending (winding up or ready).
    pub fn any_winding(&self) -> bool {
        self.left.is_winding() || self.right.is_winding()
    }

    /// Cancels every in-flight transition; both arms back to idle. Called on
    /// round resets so timers derived from a stale tempo never fire.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}

//! Turn arbitration: who attacks on this beat.
//!
//! The arbiter is a plain value object with a pure transition API — it owns
//! the phase, the per-phase action counter and the miss flag, and nothing
//! else. It cannot see entities; the one piece of world state it needs (is an
//! enemy punch still pending?) comes in as an argument. That keeps every
//! transition testable without a schedule or an ECS world.

use bevy::prelude::*;

use crate::config::CombatConfig;

/// Whose initiative it is. Exactly one phase is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AttackPhase {
    PlayerAttack,
    EnemyAttack,
}

/// What the current beat is for, as decided by `on_beat_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatDecision {
    /// Grace beat: the entering side is still getting its reaction buffer.
    Grace,
    /// Enemy initiative: drive the limb policy. `last_attack` forces any
    /// pending wind-up through instead of starting new ones.
    DriveEnemy { last_attack: bool },
    /// Player initiative: the window stays open; attacks come from input
    /// events, not from the tick.
    HoldWindow,
    /// Initiative switched this beat; carries the phase just entered.
    SwitchPhase(AttackPhase),
}

/// Alternates attack initiative between player and enemy on the beat grid.
///
/// `actions_taken` starts each phase at `-grace_beats`: the entering side
/// gets a few free beats (consumed by the countdown UI) before the budget —
/// and with it the termination condition — starts counting.
#[derive(Resource, Debug, Clone)]
pub struct TurnArbiter {
    phase: AttackPhase,
    actions_taken: i32,
    grace_beats: i32,
    player_action_budget: i32,
    enemy_action_budget: i32,
    miss_flagged: bool,
    round: u32,
}

impl TurnArbiter {
    /// Combat opens on the enemy's initiative, grace running.
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            phase: AttackPhase::EnemyAttack,
            actions_taken: -config.grace_beats,
            grace_beats: config.grace_beats,
            player_action_budget: config.player_action_budget,
            enemy_action_budget: config.enemy_action_budget,
            miss_flagged: false,
            round: 1,
        }
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn actions_taken(&self) -> i32 {
        self.actions_taken
    }

    pub fn miss_flagged(&self) -> bool {
        self.miss_flagged
    }

    /// Current round, 1-based.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// One beat of arbitration. `enemy_punch_pending` is true while either
    /// enemy arm is winding up or ready — an exhausted enemy budget must end
    /// with that punch forced through, never with a stranded telegraph.
    pub fn on_beat_tick(&mut self, enemy_punch_pending: bool) -> BeatDecision {
        match self.phase {
            AttackPhase::EnemyAttack => {
                if self.actions_taken >= self.enemy_action_budget {
                    if enemy_punch_pending {
                        return BeatDecision::DriveEnemy { last_attack: true };
                    }
                    self.switch_phase();
                    return BeatDecision::SwitchPhase(self.phase);
                }
                let decision = if self.actions_taken >= 0 {
                    BeatDecision::DriveEnemy { last_attack: false }
                } else {
                    BeatDecision::Grace
                };
                self.actions_taken += 1;
                decision
            }
            AttackPhase::PlayerAttack => {
                // A flagged miss cedes initiative on the very next beat, no
                // matter how much budget remains.
                if self.miss_flagged || self.actions_taken + 1 == self.player_action_budget {
                    self.switch_phase();
                    return BeatDecision::SwitchPhase(self.phase);
                }
                self.actions_taken += 1;
                if self.actions_taken > 0 {
                    BeatDecision::HoldWindow
                } else {
                    BeatDecision::Grace
                }
            }
        }
    }

    /// True while the player may land attacks: their phase, grace elapsed.
    /// (Whether the opponent is still alive is the input system's check.)
    pub fn can_player_attack(&self) -> bool {
        self.phase == AttackPhase::PlayerAttack && self.actions_taken >= 0
    }

    /// Marks an off-beat input during the player's window — the only path
    /// that ends a player phase early.
    pub fn flag_miss(&mut self) {
        if self.phase == AttackPhase::PlayerAttack {
            self.miss_flagged = true;
        }
    }

    /// Atomic initiative toggle: the entering side's counter resets to the
    /// grace value; re-entering the enemy phase restores its budget and
    /// clears the miss flag.
    pub fn switch_phase(&mut self) {
        self.actions_taken = -self.grace_beats;
        match self.phase {
            AttackPhase::EnemyAttack => {
                self.phase = AttackPhase::PlayerAttack;
            }
            AttackPhase::PlayerAttack => {
                self.miss_flagged = false;
                self.phase = AttackPhase::EnemyAttack;
            }
        }
    }

    /// Back to the opening state (enemy initiative, grace running) without
    /// touching the round counter. Used on loss and on session restart.
    pub fn reset(&mut self) {
        self.phase = AttackPhase::EnemyAttack;
        self.actions_taken = -self.grace_beats;
        self.miss_flagged = false;
    }

    /// A defeated opponent starts the next round.
    pub fn advance_round(&mut self) {
        self.round += 1;
        self.reset();
    }
}

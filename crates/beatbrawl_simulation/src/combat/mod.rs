//! The beat/turn coordination core.
//!
//! Responsibilities:
//! - arbitration: whose beat is it, budgets, grace, miss handling
//! - enemy behavior: per-limb wind-up/punch cycle on the beat grid
//! - player path: judged punches, free dodges
//! - rounds: defeat detection, health scaling between rounds
//!
//! Everything runs on FixedUpdate in a single `.chain()` — two event sources
//! (beat ticks and player inputs) are serialized through one schedule, which
//! is what makes bouts reproducible under a fixed RNG seed.

use bevy::prelude::*;

pub mod arbiter;
pub mod events;
pub mod systems;


pub use arbiter::{AttackPhase, BeatDecision, TurnArbiter};
pub use events::{
    ActionStateChanged, ActionStateKind, AttackMissed, CombatantDied, DamageDealt, EnemyPunch,
    InputAction, PhaseSwitched, PlayerInputEvent, PunchDodged, RoundLost, RoundWon, TimingJudged,
};
pub use systems::enemy::{enemy_on_beat, possible_action_for, ArmAction};

/// Registers combat events and the ordered FixedUpdate chain, after the beat
/// clock.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInputEvent>()
            .add_event::<ActionStateChanged>()
            .add_event::<EnemyPunch>()
            .add_event::<DamageDealt>()
            .add_event::<CombatantDied>()
            .add_event::<PunchDodged>()
            .add_event::<TimingJudged>()
            .add_event::<AttackMissed>()
            .add_event::<PhaseSwitched>()
            .add_event::<RoundWon>()
            .add_event::<RoundLost>();

        app.add_systems(
            FixedUpdate,
            (
                systems::enemy::drive_attack_phase,
                systems::enemy::tick_enemy_arms,
                systems::enemy::resolve_enemy_punches,
                systems::player::handle_player_input,
                systems::player::tick_player_action,
                systems::round::settle_rounds,
            )
                .chain()
                .after(crate::beat::tick_beat_clock),
        );
    }
}

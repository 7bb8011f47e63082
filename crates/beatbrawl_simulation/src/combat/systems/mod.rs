//! Combat systems, ordered by the plugin:
//! 1. drive_attack_phase — per-beat arbitration + enemy limb policy
//! 2. tick_enemy_arms — scheduled limb transitions
//! 3. resolve_enemy_punches — dodge-vs-hit resolution
//! 4. handle_player_input — dodges, judged punches
//! 5. tick_player_action — player action timer
//! 6. settle_rounds — death handling, round scaling

pub mod enemy;
pub mod player;
pub mod round;

mod enemy_tests;

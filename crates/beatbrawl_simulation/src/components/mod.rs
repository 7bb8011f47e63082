//! ECS components for the two combatants.
//!
//! Organization:
//! - actor: shared basics (Health, Direction, Player/Enemy markers)
//! - player: the player's single combined dodge/punch action state
//! - arms: the enemy's per-limb wind-up/punch state machines

pub mod actor;
pub mod arms;
pub mod player;

pub use actor::*;
pub use arms::*;
pub use player::*;

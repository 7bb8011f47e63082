//! Beat tracking: the musical clock and the timing judge.
//!
//! `BeatClock` turns a tempo into a stream of `BeatTick` events on the fixed
//! schedule; the judge is a pure function classifying how far an input landed
//! from the nearest beat boundary. Everything downstream (turn arbitration,
//! enemy behavior) hangs off these two.

use bevy::prelude::*;

pub mod clock;
pub mod judge;

mod clock_tests;

pub use clock::{tick_beat_clock, BeatClock, BeatTick};
pub use judge::{classify, is_on_beat, BeatQuality};

/// Registers the beat event and the clock system. The clock system is the
/// first link of the FixedUpdate chain; combat systems order themselves after
/// it, which is what gives "listeners fire in registration order" its meaning
/// here.
pub struct BeatPlugin;

impl Plugin for BeatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BeatTick>();
        app.add_systems(FixedUpdate, tick_beat_clock);
    }
}

//! The beat clock.

use bevy::prelude::*;

use crate::config::ConfigError;

/// One musical beat fired. `beat` counts from 1 within the session; `at_ms`
/// is the session-clock instant the beat boundary landed on.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BeatTick {
    pub beat: u64,
    pub at_ms: f64,
}

/// Fires a beat every `60000 / tempo_bpm` ms while running.
///
/// Pausing freezes the schedule without resetting phase: a menu overlay in
/// the middle of a beat resumes from the same spot, so the combat round count
/// never desynchronizes. `restart` is the opposite — phase back to zero, new
/// tempo, no memory of the previous schedule.
#[derive(Resource, Debug, Clone)]
pub struct BeatClock {
    tempo_bpm: f64,
    period_ms: f64,
    running: bool,
    /// How far into the current beat we are.
    phase_ms: f64,
    /// Session clock; advances only while running.
    now_ms: f64,
    /// Boundary instant of the most recent beat; None before the first one.
    last_beat_ms: Option<f64>,
    beat_count: u64,
}

impl BeatClock {
    /// Tempo must be positive and finite; anything else is a config error,
    /// rejected here rather than surfacing as a stuck or spinning clock.
    pub fn new(tempo_bpm: f64) -> Result<Self, ConfigError> {
        Self::check_tempo(tempo_bpm)?;
        Ok(Self {
            tempo_bpm,
            period_ms: 60_000.0 / tempo_bpm,
            running: false,
            phase_ms: 0.0,
            now_ms: 0.0,
            last_beat_ms: None,
            beat_count: 0,
        })
    }

    fn check_tempo(tempo_bpm: f64) -> Result<(), ConfigError> {
        if !(tempo_bpm.is_finite() && tempo_bpm > 0.0) {
            return Err(ConfigError::InvalidTempo(tempo_bpm));
        }
        Ok(())
    }

    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn last_beat_ms(&self) -> Option<f64> {
        self.last_beat_ms
    }

    pub fn beat_count(&self) -> u64 {
        self.beat_count
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Re-derives the period for a new tempo and resets phase to zero. The
    /// first beat of the new schedule fires one full period later, and
    /// judgments in between are "too early" (`last_beat_ms` is cleared).
    /// Leaves the clock running — a restart means a new song started.
    pub fn restart(&mut self, tempo_bpm: f64) -> Result<(), ConfigError> {
        Self::check_tempo(tempo_bpm)?;
        self.tempo_bpm = tempo_bpm;
        self.period_ms = 60_000.0 / tempo_bpm;
        self.phase_ms = 0.0;
        self.last_beat_ms = None;
        self.running = true;
        Ok(())
    }

    /// Advances the clock and returns how many beats fired (0 most frames;
    /// more than 1 only if a frame spanned several periods). Paused clocks
    /// neither tick nor advance phase.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        if !self.running || delta_ms <= 0.0 {
            return 0;
        }
        self.now_ms += delta_ms;
        self.phase_ms += delta_ms;

        let mut fired = 0;
        while self.phase_ms >= self.period_ms {
            self.phase_ms -= self.period_ms;
            self.beat_count += 1;
            self.last_beat_ms = Some(self.now_ms - self.phase_ms);
            fired += 1;
        }
        fired
    }
}

/// System: advance the clock by the fixed delta and emit one `BeatTick` per
/// fired beat. Runs first in the FixedUpdate chain.
pub fn tick_beat_clock(
    mut clock: ResMut<BeatClock>,
    time: Res<Time<Fixed>>,
    mut beat_events: EventWriter<BeatTick>,
) {
    let delta_ms = time.delta_secs_f64() * 1000.0;
    let fired = clock.advance(delta_ms);
    if fired == 0 {
        return;
    }

    let period = clock.period_ms();
    let newest = clock.last_beat_ms().unwrap_or(clock.now_ms());
    for i in 0..u64::from(fired) {
        let beat = clock.beat_count() - u64::from(fired) + i + 1;
        // Older catch-up beats sit whole periods behind the newest boundary.
        let at_ms = newest - (u64::from(fired) - i - 1) as f64 * period;
        beat_events.write(BeatTick { beat, at_ms });
    }
}

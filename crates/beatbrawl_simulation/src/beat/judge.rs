//! Timing judge: classifies an input timestamp against the beat grid.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::TimingConfig;

/// How an input landed relative to the nearest beat boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
pub enum BeatQuality {
    Early,
    Perfect,
    Late,
}

impl BeatQuality {
    /// Feedback text shown by the presentation layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            BeatQuality::Early => "Early",
            BeatQuality::Perfect => "Perfect!",
            BeatQuality::Late => "Late",
        }
    }
}

/// Classifies `now_ms` against the most recent beat boundary.
///
/// Window layout within one period:
/// - `[0, late_threshold]` after a beat: PERFECT (the hit window proper),
/// - `(late_threshold, late_window]`: LATE — on the beat, but sloppy,
/// - within `early_threshold` of the *next* beat: PERFECT (anticipation),
/// - everything else: EARLY, i.e. not on the beat at all.
///
/// Before the clock has fired once there is no boundary to measure from;
/// a stray input then is simply "too early", never a panic.
pub fn classify(
    now_ms: f64,
    last_beat_ms: Option<f64>,
    period_ms: f64,
    config: &TimingConfig,
) -> BeatQuality {
    if config.always_perfect {
        return BeatQuality::Perfect;
    }
    let Some(last_beat) = last_beat_ms else {
        return BeatQuality::Early;
    };
    let offset = now_ms - last_beat;
    if offset < 0.0 {
        // Timestamp from before the boundary we know about.
        return BeatQuality::Early;
    }
    if offset <= config.late_threshold_ms {
        BeatQuality::Perfect
    } else if offset <= config.late_window_ms {
        BeatQuality::Late
    } else if period_ms - offset <= config.early_threshold_ms {
        BeatQuality::Perfect
    } else {
        BeatQuality::Early
    }
}

/// True whenever `classify` lands in a beat-adjacent window (PERFECT or
/// LATE); false only for inputs clearly too early.
pub fn is_on_beat(
    now_ms: f64,
    last_beat_ms: Option<f64>,
    period_ms: f64,
    config: &TimingConfig,
) -> bool {
    if config.always_perfect {
        return true;
    }
    classify(now_ms, last_beat_ms, period_ms, config) != BeatQuality::Early
}

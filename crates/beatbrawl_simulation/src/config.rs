//! Combat session configuration.
//!
//! All tunables live here as plain values: tempo, health pools, damage
//! mapping, action budgets, timing windows, difficulty toggles. Everything is
//! validated once at construction — a bad config is fatal to the session, not
//! something the beat loop recovers from.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::beat::BeatQuality;

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("tempo must be positive and finite, got {0} BPM")]
    InvalidTempo(f64),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("perfect damage ({perfect}) must exceed early ({early}) and late ({late})")]
    DamageOrdering { perfect: u32, early: u32, late: u32 },
    #[error("late_threshold_ms ({threshold}) must not exceed late_window_ms ({window})")]
    TimingWindows { threshold: f64, window: f64 },
}

/// Timing-judge windows, all in milliseconds relative to a beat boundary.
///
/// `always_perfect` is the training override: every input judged PERFECT and
/// on-beat regardless of timestamp (tutorials relax timing pressure with it).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Inputs within this window after a beat are PERFECT.
    pub late_threshold_ms: f64,
    /// Inputs past the threshold but within this window are LATE (still on-beat).
    pub late_window_ms: f64,
    /// Inputs this close before the next beat are PERFECT (anticipation).
    pub early_threshold_ms: f64,
    pub always_perfect: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            late_threshold_ms: 40.0,
            late_window_ms: 100.0,
            early_threshold_ms: 20.0,
            always_perfect: false,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.late_threshold_ms.is_finite() && self.late_threshold_ms > 0.0) {
            return Err(ConfigError::NonPositive("late_threshold_ms"));
        }
        if !(self.early_threshold_ms.is_finite() && self.early_threshold_ms > 0.0) {
            return Err(ConfigError::NonPositive("early_threshold_ms"));
        }
        if self.late_threshold_ms > self.late_window_ms {
            return Err(ConfigError::TimingWindows {
                threshold: self.late_threshold_ms,
                window: self.late_window_ms,
            });
        }
        Ok(())
    }
}

/// Damage the player deals per timing quality.
///
/// Invariant (validated): perfect > early and perfect > late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamagePerQuality {
    pub perfect: u32,
    pub early: u32,
    pub late: u32,
}

impl Default for DamagePerQuality {
    fn default() -> Self {
        Self {
            perfect: 20,
            early: 10,
            late: 10,
        }
    }
}

impl DamagePerQuality {
    pub fn for_quality(&self, quality: BeatQuality) -> u32 {
        match quality {
            BeatQuality::Perfect => self.perfect,
            BeatQuality::Early => self.early,
            BeatQuality::Late => self.late,
        }
    }
}

/// Top-level combat configuration resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Beats per minute; may change between rounds via `BeatClock::restart`.
    pub tempo_bpm: f64,
    pub player_max_health: u32,
    pub enemy_max_health: u32,
    /// Damage the player takes from an undodged enemy punch.
    pub enemy_damage: u32,
    pub damage_per_quality: DamagePerQuality,
    /// Beats the player window stays open before initiative returns.
    pub player_action_budget: i32,
    /// Beats the enemy acts on before initiative switches.
    pub enemy_action_budget: i32,
    /// Free beats granted to the entering side on every phase switch.
    pub grace_beats: i32,
    /// When true, one arm may not start winding up while the other already is.
    pub forbid_double_punches: bool,
    pub timing: TimingConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 100.0,
            player_max_health: 500,
            enemy_max_health: 500,
            enemy_damage: 10,
            damage_per_quality: DamagePerQuality::default(),
            player_action_budget: 10,
            enemy_action_budget: 10,
            grace_beats: 3,
            forbid_double_punches: true,
            timing: TimingConfig::default(),
        }
    }
}

impl CombatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tempo_bpm.is_finite() && self.tempo_bpm > 0.0) {
            return Err(ConfigError::InvalidTempo(self.tempo_bpm));
        }
        if self.player_max_health == 0 {
            return Err(ConfigError::NonPositive("player_max_health"));
        }
        if self.enemy_max_health == 0 {
            return Err(ConfigError::NonPositive("enemy_max_health"));
        }
        if self.player_action_budget <= 0 {
            return Err(ConfigError::NonPositive("player_action_budget"));
        }
        if self.enemy_action_budget <= 0 {
            return Err(ConfigError::NonPositive("enemy_action_budget"));
        }
        if self.grace_beats < 0 {
            return Err(ConfigError::NonPositive("grace_beats"));
        }
        let d = &self.damage_per_quality;
        if d.perfect <= d.early || d.perfect <= d.late {
            return Err(ConfigError::DamageOrdering {
                perfect: d.perfect,
                early: d.early,
                late: d.late,
            });
        }
        self.timing.validate()
    }

    /// Milliseconds between beats at the configured tempo.
    pub fn period_ms(&self) -> f64 {
        60_000.0 / self.tempo_bpm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_period_derivation() {
        let mut config = CombatConfig::default();
        config.tempo_bpm = 100.0;
        assert_eq!(config.period_ms(), 600.0);

        config.tempo_bpm = 120.0;
        assert_eq!(config.period_ms(), 500.0);
    }

    #[test]
    fn test_rejects_non_positive_tempo() {
        let mut config = CombatConfig::default();
        config.tempo_bpm = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTempo(0.0)));

        config.tempo_bpm = -30.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_health() {
        let mut config = CombatConfig::default();
        config.enemy_max_health = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("enemy_max_health"))
        );
    }

    #[test]
    fn test_rejects_flat_damage_mapping() {
        let mut config = CombatConfig::default();
        config.damage_per_quality = DamagePerQuality {
            perfect: 10,
            early: 10,
            late: 10,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DamageOrdering { .. })
        ));
    }

    #[test]
    fn test_damage_mapping_defaults() {
        let mapping = DamagePerQuality::default();
        assert_eq!(mapping.for_quality(BeatQuality::Perfect), 20);
        assert_eq!(mapping.for_quality(BeatQuality::Early), 10);
        assert_eq!(mapping.for_quality(BeatQuality::Late), 10);
        assert!(mapping.perfect > mapping.early);
    }
}

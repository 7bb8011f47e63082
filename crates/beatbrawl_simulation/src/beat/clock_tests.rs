//! Tests for the beat clock.

#[cfg(test)]
mod tests {
    use crate::beat::clock::BeatClock;
    use crate::config::ConfigError;

    #[test]
    fn test_period_derivation() {
        let clock = BeatClock::new(100.0).unwrap();
        assert_eq!(clock.period_ms(), 600.0);

        let clock = BeatClock::new(120.0).unwrap();
        assert_eq!(clock.period_ms(), 500.0);
    }

    #[test]
    fn test_rejects_non_positive_tempo() {
        assert_eq!(
            BeatClock::new(0.0).unwrap_err(),
            ConfigError::InvalidTempo(0.0)
        );
        assert!(BeatClock::new(-100.0).is_err());
        assert!(BeatClock::new(f64::NAN).is_err());

        let mut clock = BeatClock::new(100.0).unwrap();
        assert!(clock.restart(0.0).is_err());
        // Failed restart leaves the old tempo in place.
        assert_eq!(clock.period_ms(), 600.0);
    }

    #[test]
    fn test_beats_fire_once_per_period() {
        let mut clock = BeatClock::new(100.0).unwrap();
        clock.start();

        // 60 fixed steps of 10ms per period, indefinitely.
        let mut fired = 0;
        for _ in 0..180 {
            fired += clock.advance(10.0);
        }
        assert_eq!(fired, 3);
        assert_eq!(clock.beat_count(), 3);
        assert_eq!(clock.last_beat_ms(), Some(1800.0));
    }

    #[test]
    fn test_no_ticks_before_start_or_while_paused() {
        let mut clock = BeatClock::new(100.0).unwrap();
        assert_eq!(clock.advance(10_000.0), 0);
        assert_eq!(clock.beat_count(), 0);

        clock.start();
        clock.advance(600.0);
        assert_eq!(clock.beat_count(), 1);

        clock.pause();
        assert_eq!(clock.advance(10_000.0), 0);
        assert_eq!(clock.beat_count(), 1);
    }

    #[test]
    fn test_resume_continues_mid_beat() {
        let mut clock = BeatClock::new(100.0).unwrap();
        clock.start();
        clock.advance(500.0); // 100ms shy of the first beat

        clock.pause();
        clock.advance(50.0); // swallowed
        clock.start();

        // Only 100ms more needed: phase was frozen, not reset.
        assert_eq!(clock.advance(100.0), 1);
        assert_eq!(clock.beat_count(), 1);
    }

    #[test]
    fn test_restart_resets_phase_and_rederives_period() {
        let mut clock = BeatClock::new(100.0).unwrap();
        clock.start();
        clock.advance(600.0);
        assert_eq!(clock.beat_count(), 1);
        assert!(clock.last_beat_ms().is_some());

        clock.restart(120.0).unwrap();
        assert_eq!(clock.period_ms(), 500.0);
        assert_eq!(clock.last_beat_ms(), None);
        assert!(clock.is_running());

        // First beat of the new schedule lands one new period later, not on
        // any remnant of the old phase.
        assert_eq!(clock.advance(499.0), 0);
        assert_eq!(clock.advance(1.0), 1);
    }

    #[test]
    fn test_catch_up_after_long_frame() {
        let mut clock = BeatClock::new(100.0).unwrap();
        clock.start();
        assert_eq!(clock.advance(1850.0), 3);
        assert_eq!(clock.beat_count(), 3);
        assert_eq!(clock.last_beat_ms(), Some(1800.0));
    }
}

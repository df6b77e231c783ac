//! Presentation clock for file playback

use std::time::{Duration, Instant};

/// Maps frame timestamps to wall-clock presentation instants.
///
/// The first timestamp seen anchors the clock. Time spent paused shifts the
/// anchor forward so playback resumes where it stopped instead of racing to
/// catch up.
#[derive(Debug, Default)]
pub struct PlaybackClock {
    /// Wall-clock instant and media timestamp (microseconds) of the anchor
    origin: Option<(Instant, i64)>,
    paused_at: Option<Instant>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// How long to wait at `now` before presenting a frame stamped `pts_us`.
    ///
    /// Frames without a timestamp are shown immediately. A timestamp earlier
    /// than the anchor (a discontinuity) re-anchors the clock.
    pub fn delay_for(&mut self, pts_us: Option<i64>, now: Instant) -> Duration {
        let Some(pts) = pts_us else {
            return Duration::ZERO;
        };

        let (start, base) = *self.origin.get_or_insert((now, pts));
        if pts < base {
            self.origin = Some((now, pts));
            return Duration::ZERO;
        }

        let due = start + Duration::from_micros((pts - base) as u64);
        due.saturating_duration_since(now)
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let (Some(paused_at), Some((start, _))) = (self.paused_at.take(), self.origin.as_mut()) {
            *start += now.saturating_duration_since(paused_at);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_first_frame_is_immediate() {
        let mut clock = PlaybackClock::new();
        assert_eq!(clock.delay_for(Some(5_000_000), Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_frames_are_paced_by_timestamp() {
        let mut clock = PlaybackClock::new();
        let t0 = Instant::now();

        clock.delay_for(Some(0), t0);
        assert_eq!(clock.delay_for(Some(40_000), t0), 40 * MS);
        assert_eq!(clock.delay_for(Some(40_000), t0 + 10 * MS), 30 * MS);
        // late frames are not delayed
        assert_eq!(clock.delay_for(Some(40_000), t0 + 100 * MS), Duration::ZERO);
    }

    #[test]
    fn test_missing_timestamp_is_immediate() {
        let mut clock = PlaybackClock::new();
        let t0 = Instant::now();
        clock.delay_for(Some(0), t0);
        assert_eq!(clock.delay_for(None, t0), Duration::ZERO);
    }

    #[test]
    fn test_backwards_timestamp_reanchors() {
        let mut clock = PlaybackClock::new();
        let t0 = Instant::now();
        clock.delay_for(Some(1_000_000), t0);

        assert_eq!(clock.delay_for(Some(0), t0 + 5 * MS), Duration::ZERO);
        assert_eq!(clock.delay_for(Some(20_000), t0 + 5 * MS), 20 * MS);
    }

    #[test]
    fn test_pause_shifts_schedule() {
        let mut clock = PlaybackClock::new();
        let t0 = Instant::now();
        clock.delay_for(Some(0), t0);

        clock.pause(t0 + 10 * MS);
        assert!(clock.is_paused());
        clock.resume(t0 + 510 * MS);
        assert!(!clock.is_paused());

        // 40ms frame was due at t0+40ms, now due 500ms later
        assert_eq!(clock.delay_for(Some(40_000), t0 + 510 * MS), 30 * MS);
    }
}

//! Drum-roll tick cues played while a draw is revealed
//!
//! The host voices the cues; this module only decides when they happen.
//! Ticks start 200 ms apart and speed up towards 50 ms as the draw goes on.

use std::time::Duration;

use crate::ladder::RevealPacing;

/// How often the scheduler checks whether a tick is due (ms)
pub const TICK_POLL_MS: u64 = 50;
/// Gap before the first tick and the starting interval (ms)
pub const TICK_START_INTERVAL_MS: f64 = 200.0;
/// Fastest the ticks get (ms)
pub const TICK_MIN_INTERVAL_MS: f64 = 50.0;
/// How much the interval shrinks over the whole draw (ms)
pub const TICK_RAMP_MS: f64 = 150.0;
/// Longest drum roll that gets a schedule; later ticks are dropped (ms)
pub const TICK_MAX_DURATION_MS: u64 = 30 * 60 * 1000;

/// Shape of a single tick: a short sine blip sweeping down in pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTone {
    pub start_hz: f32,
    pub end_hz: f32,
    pub gain: f32,
    pub length: Duration,
}

pub const TICK_TONE: TickTone = TickTone {
    start_hz: 800.0,
    end_hz: 400.0,
    gain: 0.2,
    length: Duration::from_millis(50),
};

/// A tick to play `at` after the draw starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCue {
    pub index: usize,
    pub at: Duration,
}

/// Length of the drum roll for a ladder of `rows` rows
pub fn drum_roll_duration(rows: usize, pacing: &RevealPacing) -> Duration {
    pacing.total_duration(rows)
}

/// Tick times for a drum roll lasting `duration`.
///
/// Time advances in [`TICK_POLL_MS`] polls. A poll ticks when at least the
/// current interval has passed since the last tick; after each tick the
/// interval shrinks in proportion to how many ticks have been played.
/// Durations past [`TICK_MAX_DURATION_MS`] are cut off there.
pub fn tick_schedule(duration: Duration) -> Vec<TickCue> {
    let total_ms = u64::try_from(duration.as_millis())
        .unwrap_or(u64::MAX)
        .min(TICK_MAX_DURATION_MS);
    let max_ticks = (total_ms as f64 / TICK_START_INTERVAL_MS).ceil().max(1.0);

    let mut cues = Vec::new();
    let mut interval = TICK_START_INTERVAL_MS;
    let mut last_ms = 0u64;
    let mut now = TICK_POLL_MS;

    while now < total_ms {
        if (now - last_ms) as f64 >= interval {
            last_ms = now;
            cues.push(TickCue {
                index: cues.len(),
                at: Duration::from_millis(now),
            });
            let progress = cues.len() as f64 / max_ticks;
            interval = (TICK_START_INTERVAL_MS - progress * TICK_RAMP_MS).max(TICK_MIN_INTERVAL_MS);
        }
        now += TICK_POLL_MS;
    }

    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_after_start_interval() {
        let cues = tick_schedule(Duration::from_millis(2460));
        assert_eq!(cues[0].at, Duration::from_millis(200));
        assert_eq!(cues[0].index, 0);
    }

    #[test]
    fn test_ticks_speed_up_but_never_below_minimum() {
        let cues = tick_schedule(Duration::from_millis(2460));
        let gaps: Vec<u128> = cues
            .windows(2)
            .map(|w| (w[1].at - w[0].at).as_millis())
            .collect();
        assert!(gaps.iter().all(|&g| g >= TICK_MIN_INTERVAL_MS as u128));
        assert!(gaps.first() > gaps.last());
        assert!(gaps.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_ticks_stay_inside_duration() {
        let duration = Duration::from_millis(2460);
        assert!(tick_schedule(duration).iter().all(|c| c.at < duration));
    }

    #[test]
    fn test_short_duration_has_no_ticks() {
        assert!(tick_schedule(Duration::from_millis(150)).is_empty());
        assert!(tick_schedule(Duration::ZERO).is_empty());
    }

    #[test]
    fn test_drum_roll_duration_default_pacing() {
        let d = drum_roll_duration(12, &RevealPacing::default());
        assert_eq!(d, Duration::from_millis(12 * 80 + 1500));
    }

    #[test]
    fn test_huge_durations_are_capped() {
        let pacing = RevealPacing {
            step_delay: Duration::from_millis(u64::MAX),
            ..RevealPacing::default()
        };
        assert_eq!(drum_roll_duration(2000, &pacing), Duration::MAX);

        let cues = tick_schedule(Duration::MAX);
        let cap = Duration::from_millis(TICK_MAX_DURATION_MS);
        assert!(!cues.is_empty());
        assert!(cues.iter().all(|c| c.at < cap));
        assert!(cues.len() <= (TICK_MAX_DURATION_MS / TICK_POLL_MS) as usize);
    }
}

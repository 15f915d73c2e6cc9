//! Turning continuously sampled hand signals into discrete actions
//!
//! Landmark-derived gestures flicker between frames. `CooldownTrigger`
//! enforces a refractory period between accepted actions; `DwellTimer`
//! requires uninterrupted residency in a region before it fires.

use serde::{Deserialize, Serialize};

/// Rate limiter for a gesture sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownTrigger {
    period_ticks: u32,
    remaining: u32,
}

impl CooldownTrigger {
    /// A trigger that can fire immediately, then waits `period_ticks`
    pub fn new(period_ticks: u32) -> Self {
        Self {
            period_ticks,
            remaining: 0,
        }
    }

    /// Call exactly once per tick
    ///
    /// Fires when `active` and the cooldown has run out. The cooldown counts
    /// down on every call whether or not anything fired, so two accepted
    /// actions are always `period_ticks` calls apart.
    pub fn try_fire(&mut self, active: bool) -> bool {
        let fired = active && self.remaining == 0;
        if fired {
            self.remaining = self.period_ticks;
        }
        self.remaining = self.remaining.saturating_sub(1);
        fired
    }

    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset(&mut self) {
        self.remaining = 0;
    }
}

/// Hover-to-activate timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellTimer {
    threshold_ms: u64,
    entered_at: Option<u64>,
}

impl DwellTimer {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            entered_at: None,
        }
    }

    /// Feed this tick's residency. Returns true once the pointer has stayed
    /// inside for at least the threshold; the timer then resets.
    ///
    /// Leaving the region for a single tick discards all progress.
    pub fn update(&mut self, now_ms: u64, inside: bool) -> bool {
        if !inside {
            self.entered_at = None;
            return false;
        }
        let entered = *self.entered_at.get_or_insert(now_ms);
        if now_ms.saturating_sub(entered) >= self.threshold_ms {
            self.entered_at = None;
            return true;
        }
        false
    }

    /// Fraction of the threshold completed, for the progress ring
    pub fn progress(&self, now_ms: u64) -> f64 {
        match self.entered_at {
            Some(entered) if self.threshold_ms > 0 => {
                (now_ms.saturating_sub(entered) as f64 / self.threshold_ms as f64).min(1.0)
            }
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.entered_at.is_some()
    }

    pub fn reset(&mut self) {
        self.entered_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fires_immediately_then_waits() {
        let mut trigger = CooldownTrigger::new(20);
        assert!(trigger.try_fire(true));
        for _ in 1..20 {
            assert!(!trigger.try_fire(true));
        }
        assert!(trigger.try_fire(true));
    }

    #[test]
    fn test_cooldown_runs_down_while_inactive() {
        let mut trigger = CooldownTrigger::new(30);
        assert!(trigger.try_fire(true));
        for _ in 1..30 {
            trigger.try_fire(false);
        }
        assert!(trigger.is_ready());
        assert!(trigger.try_fire(true));
    }

    #[test]
    fn test_inactive_never_fires() {
        let mut trigger = CooldownTrigger::new(5);
        for _ in 0..50 {
            assert!(!trigger.try_fire(false));
        }
    }

    #[test]
    fn test_dwell_fires_at_threshold() {
        let mut dwell = DwellTimer::new(1000);
        assert!(!dwell.update(0, true));
        assert!(!dwell.update(500, true));
        assert!((dwell.progress(500) - 0.5).abs() < 1e-12);
        assert!(!dwell.update(999, true));
        assert!(dwell.update(1000, true));
        assert!(!dwell.is_engaged());
    }

    #[test]
    fn test_dwell_exit_resets_without_partial_credit() {
        let mut dwell = DwellTimer::new(1000);
        dwell.update(0, true);
        dwell.update(998, true);
        dwell.update(999, false);
        assert_eq!(dwell.progress(999), 0.0);
        assert!(!dwell.update(1000, true));
        assert!(!dwell.update(1999, true));
        assert!(dwell.update(2000, true));
    }

    proptest! {
        #[test]
        fn prop_one_fire_per_window(period in 1u32..60, ticks in 1usize..400) {
            let mut trigger = CooldownTrigger::new(period);
            let fires: Vec<usize> = (0..ticks).filter(|_| trigger.try_fire(true)).collect();
            prop_assert!(!fires.is_empty());
            for pair in fires.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], period as usize);
            }
        }

        #[test]
        fn prop_flicker_never_beats_period(
            period in 1u32..40,
            signal in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let mut trigger = CooldownTrigger::new(period);
            let mut last: Option<usize> = None;
            for (tick, active) in signal.into_iter().enumerate() {
                if trigger.try_fire(active) {
                    if let Some(prev) = last {
                        prop_assert!(tick - prev >= period as usize);
                    }
                    last = Some(tick);
                }
            }
        }
    }
}

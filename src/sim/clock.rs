//! Wall-clock tick timing for live driver loops.
//!
//! The deterministic core takes an explicit `dt`; this timer exists for
//! drivers that tick at a real cadence (the TUI) and measures elapsed time
//! between its own calls rather than trusting caller bookkeeping.

use std::time::Instant;

/// Elapsed time assumed for the first tick after a (re)start (s).
pub const DEFAULT_FIRST_DT_S: f64 = 0.2;

/// Measures the elapsed seconds between successive ticks.
#[derive(Debug, Default)]
pub struct TickTimer {
    last: Option<Instant>,
}

impl TickTimer {
    /// Creates a timer with no previous-tick reference.
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns the seconds elapsed since the previous call and records the
    /// current instant as the new reference.
    ///
    /// The first call after construction or [`reset`](Self::reset) has no
    /// reference and returns [`DEFAULT_FIRST_DT_S`].
    pub fn dt_s(&mut self) -> f64 {
        let now = Instant::now();
        let dt = match self.last {
            Some(prev) => now.duration_since(prev).as_secs_f64(),
            None => DEFAULT_FIRST_DT_S,
        };
        self.last = Some(now);
        dt
    }

    /// Clears the previous-tick reference.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_uses_default_dt() {
        let mut timer = TickTimer::new();
        assert_eq!(timer.dt_s(), DEFAULT_FIRST_DT_S);
    }

    #[test]
    fn subsequent_ticks_measure_elapsed_time() {
        let mut timer = TickTimer::new();
        timer.dt_s();
        let dt = timer.dt_s();
        assert!(dt >= 0.0);
        assert!(dt < DEFAULT_FIRST_DT_S, "back-to-back calls should be fast");
    }

    #[test]
    fn reset_restores_default_dt() {
        let mut timer = TickTimer::new();
        timer.dt_s();
        timer.dt_s();
        timer.reset();
        assert_eq!(timer.dt_s(), DEFAULT_FIRST_DT_S);
    }
}

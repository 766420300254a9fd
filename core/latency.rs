use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Wall-clock budget for one pipeline run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatencyBudget {
    limit: Duration,
}

impl LatencyBudget {
    /// Creates a budget with an arbitrary limit.
    #[must_use]
    pub const fn new(limit: Duration) -> Self {
        Self { limit }
    }

    /// 2000 ms budget for an authentication attempt.
    #[must_use]
    pub const fn authentication() -> Self {
        Self::new(Duration::from_millis(2000))
    }

    /// 5000 µs budget for a connectivity decision.
    #[must_use]
    pub const fn connectivity_decision() -> Self {
        Self::new(Duration::from_micros(5000))
    }

    /// 100 ms budget for one audio frame.
    #[must_use]
    pub const fn audio_frame() -> Self {
        Self::new(Duration::from_millis(100))
    }

    /// The configured limit.
    #[must_use]
    pub const fn limit(self) -> Duration {
        self.limit
    }

    /// Returns a non-fatal warning when `elapsed` exceeds the budget.
    #[must_use]
    pub fn check(self, elapsed: Duration) -> Option<LatencyWarning> {
        (elapsed > self.limit).then(|| LatencyWarning {
            budget: self.limit,
            elapsed,
        })
    }
}

/// Non-fatal flag attached to a decision that overran its budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatencyWarning {
    /// Budget that was exceeded.
    pub budget: Duration,
    /// Observed elapsed time.
    pub elapsed: Duration,
}

/// Wall-clock snapshot wrapping one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Starts measuring now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Elapsed time since start.
    #[must_use]
    pub fn elapsed(self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_budget_yields_no_warning() {
        let budget = LatencyBudget::authentication();
        assert!(budget.check(Duration::from_millis(15)).is_none());
    }

    #[test]
    fn overrun_yields_warning_with_both_durations() {
        let budget = LatencyBudget::connectivity_decision();
        let warning = budget.check(Duration::from_millis(9)).unwrap();
        assert_eq!(warning.budget, Duration::from_micros(5000));
        assert_eq!(warning.elapsed, Duration::from_millis(9));
    }

    #[test]
    fn stopwatch_measures_forward() {
        let watch = Stopwatch::start();
        assert!(watch.elapsed() < Duration::from_secs(1));
    }
}

use std::time::{Duration, Instant};

/// Snapshot emitted after every counted batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress {
    pub n: usize,
    pub processed: u64,
    pub total: u64,
    pub percent: f64,
    pub elapsed: Duration,
    /// Linear extrapolation: `elapsed / processed * (total - processed)`.
    pub remaining: Duration,
}

impl BatchProgress {
    pub fn estimate(n: usize, processed: u64, total: u64, elapsed: Duration) -> Self {
        let processed = processed.min(total);
        let percent = if processed == total {
            100.0
        } else {
            100.0 * processed as f64 / total as f64
        };
        let remaining = if processed == 0 {
            Duration::ZERO
        } else {
            elapsed.mul_f64((total - processed) as f64 / processed as f64)
        };
        Self {
            n,
            processed,
            total,
            percent,
            elapsed,
            remaining,
        }
    }
}

/// Final result of one round (one combination size `n`).
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub n: usize,
    pub combinations: u64,
    pub count: u64,
    pub elapsed: Duration,
}

/// Progress counters owned by the counting driver for the duration of one round.
#[derive(Debug)]
pub struct ProgressState {
    n: usize,
    processed: u64,
    total: u64,
    started: Instant,
}

impl ProgressState {
    pub fn new(n: usize, total: u64) -> Self {
        Self {
            n,
            processed: 0,
            total,
            started: Instant::now(),
        }
    }

    pub fn advance(&mut self, amount: u64) -> BatchProgress {
        self.processed = self.processed.saturating_add(amount).min(self.total);
        BatchProgress::estimate(self.n, self.processed, self.total, self.elapsed())
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_extrapolates_linearly() {
        let progress = BatchProgress::estimate(2, 25, 100, Duration::from_secs(10));
        assert_eq!(progress.percent, 25.0);
        assert_eq!(progress.remaining, Duration::from_secs(30));
    }

    #[test]
    fn estimate_reaches_exactly_one_hundred_percent_at_the_end() {
        for total in [1, 3, 7, 99, 4_421_275] {
            let progress = BatchProgress::estimate(4, total, total, Duration::from_millis(1234));
            assert_eq!(progress.percent, 100.0);
            assert_eq!(progress.remaining, Duration::ZERO);
        }
    }

    #[test]
    fn estimate_before_any_work_has_no_remaining_time() {
        let progress = BatchProgress::estimate(2, 0, 10, Duration::from_secs(1));
        assert_eq!(progress.percent, 0.0);
        assert_eq!(progress.remaining, Duration::ZERO);
    }

    #[test]
    fn estimate_clamps_processed_to_total() {
        let progress = BatchProgress::estimate(2, 12, 10, Duration::from_secs(1));
        assert_eq!(progress.processed, 10);
        assert_eq!(progress.percent, 100.0);
    }

    #[test]
    fn advancing_in_uneven_batches_is_monotonic_and_ends_at_one_hundred() {
        let mut state = ProgressState::new(3, 1_003);
        let mut last_percent = 0.0;
        while state.processed() < 1_003 {
            let progress = state.advance(100);
            assert!(progress.percent >= last_percent);
            assert!(progress.remaining >= Duration::ZERO);
            last_percent = progress.percent;
        }
        assert_eq!(state.processed(), 1_003);
        assert_eq!(last_percent, 100.0);
    }
}

//! Wall-clock tracking for per-page extraction, keyed by page index. The
//! orchestrator owns one timer per batch and discards it when the batch ends.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct PageTiming {
    started: Option<Instant>,
    ended: Option<Instant>,
}

#[derive(Debug, Default)]
pub struct PageTimer {
    timings: HashMap<usize, PageTiming>,
}

impl PageTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, key: usize) {
        self.timings.entry(key).or_default().started = Some(Instant::now());
    }

    pub fn end(&mut self, key: usize) {
        self.timings.entry(key).or_default().ended = Some(Instant::now());
    }

    /// Average over keys with both endpoints recorded. Keys still in flight
    /// (or never finished) are excluded, not counted as zero.
    pub fn average_duration(&self) -> Option<Duration> {
        let complete: Vec<Duration> = self
            .timings
            .values()
            .filter_map(|timing| match (timing.started, timing.ended) {
                (Some(started), Some(ended)) => Some(ended - started),
                _ => None,
            })
            .collect();

        if complete.is_empty() {
            return None;
        }
        Some(complete.iter().sum::<Duration>() / complete.len() as u32)
    }

    pub fn average_secs(&self) -> f64 {
        self.average_duration()
            .map(|duration| duration.as_secs_f64())
            .unwrap_or(0.0)
    }

    pub fn average_mins(&self) -> f64 {
        self.average_secs() / 60.0
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timer: &mut PageTimer, key: usize, duration: Duration) {
        let started = Instant::now();
        timer.timings.insert(
            key,
            PageTiming {
                started: Some(started),
                ended: Some(started + duration),
            },
        );
    }

    #[test]
    fn no_complete_keys_means_no_average() {
        let mut timer = PageTimer::new();
        assert_eq!(timer.average_duration(), None);
        assert_eq!(timer.average_secs(), 0.0);

        timer.start(1);
        assert_eq!(timer.average_duration(), None);
    }

    #[test]
    fn averages_over_complete_keys() {
        let mut timer = PageTimer::new();
        record(&mut timer, 1, Duration::from_secs(2));
        record(&mut timer, 2, Duration::from_secs(4));
        assert_eq!(timer.average_duration(), Some(Duration::from_secs(3)));
        assert_eq!(timer.average_secs(), 3.0);
        assert_eq!(timer.average_mins(), 0.05);
    }

    #[test]
    fn incomplete_keys_are_excluded_not_zeroed() {
        let mut timer = PageTimer::new();
        record(&mut timer, 1, Duration::from_secs(2));
        timer.start(2); // never ends
        timer.end(3); // never started
        assert_eq!(timer.average_duration(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn start_and_end_pair_up_across_calls() {
        let mut timer = PageTimer::new();
        timer.start(7);
        timer.end(7);
        assert!(timer.average_duration().is_some());
    }
}

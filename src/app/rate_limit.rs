//! Rolling window limit on AI assisted SQL exports

use chrono::{DateTime, Duration, Utc};

/// Outcome of an export attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDecision {
    /// Export may proceed; store this history in place of the old one
    Allowed(Vec<DateTime<Utc>>),
    /// Too many exports inside the window
    Blocked,
}

/// At most `limit` exports within any trailing `window`
#[derive(Debug, Clone, Copy)]
pub struct ExportRateLimiter {
    limit: usize,
    window: Duration,
}

impl Default for ExportRateLimiter {
    fn default() -> Self {
        Self::new(5, Duration::minutes(30))
    }
}

impl ExportRateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self { limit, window }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entries strictly younger than the window survive; the attempt is
    /// blocked when `limit` of them remain, otherwise `now` is appended
    pub fn evaluate(&self, history: &[DateTime<Utc>], now: DateTime<Utc>) -> ExportDecision {
        let mut recent: Vec<DateTime<Utc>> = history
            .iter()
            .copied()
            .filter(|at| now - *at < self.window)
            .collect();

        if recent.len() >= self.limit {
            return ExportDecision::Blocked;
        }

        recent.push(now);
        ExportDecision::Allowed(recent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minute)
    }

    /// Feed attempts through the limiter, keeping the stored history
    fn run(limiter: &ExportRateLimiter, attempts: &[i64]) -> Vec<bool> {
        let mut history = Vec::new();
        attempts
            .iter()
            .map(|minute| match limiter.evaluate(&history, at(*minute)) {
                ExportDecision::Allowed(updated) => {
                    history = updated;
                    true
                }
                ExportDecision::Blocked => false,
            })
            .collect()
    }

    #[test]
    fn test_sixth_export_in_window_is_blocked() {
        let limiter = ExportRateLimiter::default();
        let results = run(&limiter, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(results, vec![true, true, true, true, true, false]);
    }

    #[test]
    fn test_export_allowed_once_oldest_leaves_window() {
        let limiter = ExportRateLimiter::default();
        // t6 is 31 minutes after t1, only t2..t5 remain in its window
        let results = run(&limiter, &[0, 10, 15, 20, 25, 31]);
        assert!(results.iter().all(|ok| *ok));
    }

    #[test]
    fn test_window_edge_is_exclusive() {
        let limiter = ExportRateLimiter::default();
        let history: Vec<_> = (0..5).map(|_| at(0)).collect();

        assert_eq!(limiter.evaluate(&history, at(29)), ExportDecision::Blocked);
        match limiter.evaluate(&history, at(30)) {
            ExportDecision::Allowed(updated) => assert_eq!(updated, vec![at(30)]),
            ExportDecision::Blocked => panic!("exports exactly 30 minutes old should expire"),
        }
    }

    #[test]
    fn test_blocked_attempt_is_not_recorded() {
        let limiter = ExportRateLimiter::new(1, Duration::minutes(30));
        let history = vec![at(0)];
        assert_eq!(limiter.evaluate(&history, at(1)), ExportDecision::Blocked);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_stale_entries_are_pruned() {
        let limiter = ExportRateLimiter::default();
        let history = vec![at(0), at(5), at(40)];
        assert_eq!(
            limiter.evaluate(&history, at(45)),
            ExportDecision::Allowed(vec![at(40), at(45)])
        );
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::domain::ports::{Clock, RateLimiter};

/// Admits at most `limit` requests per key within any trailing `window`.
///
/// State lives in this process only: it is lost on restart, is not shared
/// between instances, and keys are kept for as long as the process runs.
pub struct SlidingWindowLimiter {
    limit: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
    hits: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
}

impl SlidingWindowLimiter {
    pub fn new(limit: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            window,
            clock,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Two island-identity generations per address per minute.
    pub fn island_identity(clock: Arc<dyn Clock>) -> Self {
        Self::new(2, Duration::seconds(60), clock)
    }
}

impl RateLimiter for SlidingWindowLimiter {
    fn check(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let recent = hits.entry(key.to_string()).or_default();

        recent.retain(|at| now - *at < self.window);

        if recent.len() >= self.limit {
            warn!("Rate limit hit for {}", key);
            return false;
        }

        recent.push(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn limiter() -> (Arc<ManualClock>, SlidingWindowLimiter) {
        let clock = Arc::new(ManualClock(Mutex::new(Utc::now())));
        let limiter = SlidingWindowLimiter::island_identity(clock.clone());
        (clock, limiter)
    }

    #[test]
    fn test_third_request_within_a_minute_is_rejected() {
        let (clock, limiter) = limiter();
        assert!(limiter.check("10.0.0.1"));
        clock.advance(Duration::seconds(10));
        assert!(limiter.check("10.0.0.1"));
        clock.advance(Duration::seconds(10));
        assert!(!limiter.check("10.0.0.1"));
    }

    #[test]
    fn test_admits_again_once_window_slides_past_first_request() {
        let (clock, limiter) = limiter();
        assert!(limiter.check("10.0.0.1"));
        assert!(limiter.check("10.0.0.1"));
        assert!(!limiter.check("10.0.0.1"));
        clock.advance(Duration::seconds(61));
        assert!(limiter.check("10.0.0.1"));
    }

    #[test]
    fn test_rejected_attempts_do_not_extend_the_window() {
        let (clock, limiter) = limiter();
        assert!(limiter.check("a"));
        clock.advance(Duration::seconds(30));
        assert!(limiter.check("a"));
        clock.advance(Duration::seconds(20));
        assert!(!limiter.check("a"));
        clock.advance(Duration::seconds(11));
        // first hit is now 61s old, second 31s old
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
    }

    #[test]
    fn test_addresses_are_counted_separately() {
        let (_clock, limiter) = limiter();
        assert!(limiter.check("a"));
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
        assert!(limiter.check("b"));
    }
}

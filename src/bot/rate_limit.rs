use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Allows at most `limit` commands per source within any `window`. A limit of 0 disables it.
pub(super) struct RateLimiter {
    recent: Mutex<HashMap<String, VecDeque<Instant>>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub(super) fn new(limit: usize, window_secs: u64) -> Self {
        Self {
            recent: Mutex::new(HashMap::new()),
            limit,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Records a command from `source`, or returns how long until it may send another.
    pub(super) fn acquire(&self, source: &str) -> Result<(), Duration> {
        self.acquire_at(source, Instant::now())
    }

    fn acquire_at(&self, source: &str, now: Instant) -> Result<(), Duration> {
        if self.limit == 0 {
            return Ok(());
        }
        let mut recent = self.recent.lock().unwrap();
        let stamps = recent.entry(source.to_lowercase()).or_default();

        while let Some(oldest) = stamps.front() {
            if now.duration_since(*oldest) < self.window {
                break;
            }
            stamps.pop_front();
        }

        match stamps.front() {
            Some(oldest) if stamps.len() >= self.limit => {
                Err(self.window - now.duration_since(*oldest))
            }
            _ => {
                stamps.push_back(now);
                Ok(())
            }
        }
    }
}

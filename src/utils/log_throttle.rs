use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct WindowState {
    window_started_at: Instant,
    suppressed: u64,
}

/// Rate-limits repetitive log lines per key, one line per window.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    windows: Mutex<HashMap<&'static str, WindowState>>,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `Some(suppressed_count)` when a log for `key` should be emitted,
    /// otherwise `None` and the event is counted as suppressed for the active window.
    pub fn should_emit(&self, key: &'static str) -> Option<u64> {
        let mut map = self.windows.lock().expect("log throttle mutex poisoned");
        let now = Instant::now();

        match map.get_mut(key) {
            Some(state) if now.duration_since(state.window_started_at) >= self.interval => {
                let suppressed = state.suppressed;
                state.window_started_at = now;
                state.suppressed = 0;
                Some(suppressed)
            }
            Some(state) => {
                state.suppressed += 1;
                None
            }
            None => {
                map.insert(
                    key,
                    WindowState {
                        window_started_at: now,
                        suppressed: 0,
                    },
                );
                Some(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogThrottle;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn emits_then_suppresses_then_emits_with_count() {
        let throttle = LogThrottle::new(Duration::from_millis(20));
        let key = "tokens.cache.hit";

        assert_eq!(throttle.should_emit(key), Some(0));
        assert_eq!(throttle.should_emit(key), None);
        assert_eq!(throttle.should_emit(key), None);

        sleep(Duration::from_millis(30));
        assert_eq!(throttle.should_emit(key), Some(2));
    }

    #[test]
    fn keys_are_throttled_independently() {
        let throttle = LogThrottle::new(Duration::from_secs(60));

        assert_eq!(throttle.should_emit("a"), Some(0));
        assert_eq!(throttle.should_emit("b"), Some(0));
        assert_eq!(throttle.should_emit("a"), None);
    }
}

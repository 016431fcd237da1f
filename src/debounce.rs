use std::time::{Duration, Instant};

/// Resize bursts inside this window collapse into one re-measurement.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Trailing-edge debouncer: only the last trigger in a burst fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Push the deadline out and return it.
    pub fn trigger(&mut self, now: Instant) -> Instant {
        let at = now + self.delay;
        self.deadline = Some(at);
        at
    }

    /// True exactly once, when the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_fires_once_after_last_trigger() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        d.trigger(t0);
        d.trigger(t0 + Duration::from_millis(100));
        assert!(!d.fire(t0 + Duration::from_millis(200)));
        assert!(d.fire(t0 + Duration::from_millis(250)));
        assert!(!d.fire(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn cancel_clears_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        d.trigger(t0);
        d.cancel();
        assert_eq!(d.deadline(), None);
        assert!(!d.fire(t0 + Duration::from_secs(1)));
    }
}

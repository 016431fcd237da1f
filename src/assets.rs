use std::collections::HashSet;
use std::time::{Duration, Instant};

pub type AssetId = u64;

/// Assets a host is still loading when the engine is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingAssets {
    pub images: Vec<AssetId>,
    pub fonts_loading: bool,
}

impl PendingAssets {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && !self.fonts_loading
    }
}

/// Holds the first measurement back until fonts are ready and images have
/// settled. Images race `timeout`; fonts do not.
#[derive(Debug)]
pub struct AssetGate {
    images: HashSet<AssetId>,
    fonts_loading: bool,
    deadline: Instant,
    timed_out: bool,
}

impl AssetGate {
    pub fn new(pending: PendingAssets, now: Instant, timeout: Duration) -> Self {
        Self {
            images: pending.images.into_iter().collect(),
            fonts_loading: pending.fonts_loading,
            deadline: now + timeout,
            timed_out: false,
        }
    }

    /// Load and error both count as settled.
    pub fn image_settled(&mut self, id: AssetId) {
        self.images.remove(&id);
    }

    pub fn fonts_ready(&mut self) {
        self.fonts_loading = false;
    }

    pub fn is_ready(&mut self, now: Instant) -> bool {
        if !self.images.is_empty() && now >= self.deadline && !self.timed_out {
            self.timed_out = true;
            log::warn!(
                "{} image(s) still loading after timeout, measuring anyway",
                self.images.len()
            );
        }
        !self.fonts_loading && (self.images.is_empty() || self.timed_out)
    }

    /// When the engine should be woken to re-check, if images are outstanding.
    pub fn deadline(&self) -> Option<Instant> {
        (!self.images.is_empty() && !self.timed_out).then_some(self.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(images: &[AssetId], fonts: bool, now: Instant) -> AssetGate {
        AssetGate::new(
            PendingAssets { images: images.to_vec(), fonts_loading: fonts },
            now,
            Duration::from_millis(3000),
        )
    }

    #[test]
    fn ready_once_every_image_settles() {
        let now = Instant::now();
        let mut g = gate(&[1, 2], false, now);
        assert!(!g.is_ready(now));
        g.image_settled(1);
        assert!(!g.is_ready(now));
        g.image_settled(2);
        assert!(g.is_ready(now));
    }

    #[test]
    fn stalled_image_released_by_timeout() {
        let now = Instant::now();
        let mut g = gate(&[7], false, now);
        assert_eq!(g.deadline(), Some(now + Duration::from_millis(3000)));
        assert!(!g.is_ready(now + Duration::from_millis(2999)));
        assert!(g.is_ready(now + Duration::from_millis(3000)));
        assert_eq!(g.deadline(), None);
    }

    #[test]
    fn fonts_have_no_timeout() {
        let now = Instant::now();
        let mut g = gate(&[], true, now);
        assert!(!g.is_ready(now + Duration::from_secs(60)));
        g.fonts_ready();
        assert!(g.is_ready(now));
    }
}

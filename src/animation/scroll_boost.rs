use crate::config::ScrollSyncConfig;

/// Per-frame share of the gap between current and target offset.
const FOLLOW: f32 = 0.1;
/// Per-frame decay of the target toward zero.
const DECAY: f32 = 0.1;
const SETTLE_PX: f32 = 0.5;

/// Additive track offset driven by page scroll. `offset` is pixels added on
/// top of the loop translation.
#[derive(Debug, Clone)]
pub struct ScrollBoost {
    factor: f32,
    follow_direction: bool,
    last_y: Option<f32>,
    current: f32,
    target: f32,
}

impl ScrollBoost {
    pub fn new(config: &ScrollSyncConfig) -> Self {
        Self {
            factor: config.factor,
            follow_direction: config.follow_direction,
            last_y: None,
            current: 0.0,
            target: 0.0,
        }
    }

    /// Feed the page's vertical scroll position.
    pub fn on_scroll(&mut self, y: f32) {
        if let Some(prev) = self.last_y {
            let delta = y - prev;
            let push = if self.follow_direction { delta } else { delta.abs() };
            self.target += push * self.factor;
        }
        self.last_y = Some(y);
    }

    /// One frame of smoothing. Returns false once settled at zero.
    pub fn tick(&mut self) -> bool {
        self.current += (self.target - self.current) * FOLLOW;
        self.target *= 1.0 - DECAY;
        if self.current.abs() < SETTLE_PX && self.target.abs() < SETTLE_PX {
            self.current = 0.0;
            self.target = 0.0;
            return false;
        }
        true
    }

    pub fn offset(&self) -> f32 {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.current == 0.0 && self.target == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boost(follow_direction: bool) -> ScrollBoost {
        ScrollBoost::new(&ScrollSyncConfig { enabled: true, factor: 0.5, follow_direction })
    }

    #[test]
    fn first_sample_only_primes() {
        let mut b = boost(false);
        b.on_scroll(500.0);
        assert!(b.is_settled());
    }

    #[test]
    fn offset_rises_then_decays_to_zero() {
        let mut b = boost(false);
        b.on_scroll(0.0);
        b.on_scroll(200.0);
        assert!(b.tick());
        let first = b.offset();
        assert!(first > 0.0);
        let mut frames = 0;
        while b.tick() {
            frames += 1;
            assert!(frames < 500);
        }
        assert_eq!(b.offset(), 0.0);
        assert!(b.is_settled());
    }

    #[test]
    fn direction_follow_inverts_upward_scroll() {
        let mut plain = boost(false);
        plain.on_scroll(300.0);
        plain.on_scroll(100.0);
        plain.tick();
        assert!(plain.offset() > 0.0);

        let mut follow = boost(true);
        follow.on_scroll(300.0);
        follow.on_scroll(100.0);
        follow.tick();
        assert!(follow.offset() < 0.0);
    }
}

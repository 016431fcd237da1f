use std::time::Instant;

/// Below this speed (px/ms) a release settles instead of gliding.
pub const MIN_VELOCITY: f32 = 0.05;
/// Weight of the newest sample in the velocity estimate.
pub const VELOCITY_SMOOTHING: f32 = 0.8;
/// Frame deltas are clamped so a stalled tab doesn't fling the track.
pub const MAX_FRAME_MS: f32 = 50.0;
pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;

/// Exponentially weighted pointer velocity in px/ms.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    velocity: f32,
    last: Option<(f32, Instant)>,
}

impl VelocityTracker {
    pub fn reset(&mut self, position: f32, at: Instant) {
        self.velocity = 0.0;
        self.last = Some((position, at));
    }

    pub fn sample(&mut self, position: f32, at: Instant) {
        if let Some((prev, prev_at)) = self.last {
            let dt = at.saturating_duration_since(prev_at).as_secs_f32() * 1000.0;
            if dt > 0.0 {
                let instant = (position - prev) / dt;
                self.velocity = VELOCITY_SMOOTHING * instant + (1.0 - VELOCITY_SMOOTHING) * self.velocity;
            }
        }
        self.last = Some((position, at));
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}

/// Post-release glide with multiplicative per-frame friction.
#[derive(Debug, Clone, PartialEq)]
pub struct Momentum {
    velocity: f32,
    friction: f32,
}

impl Momentum {
    pub fn new(velocity: f32, friction: f32) -> Self {
        Self { velocity, friction }
    }

    pub fn should_start(velocity: f32) -> bool {
        velocity.abs() > MIN_VELOCITY
    }

    /// Advance one frame and return the new position.
    pub fn step(&mut self, position: f32, frame_ms: f32) -> f32 {
        let next = position + self.velocity * frame_ms.clamp(0.0, MAX_FRAME_MS);
        self.velocity *= self.friction;
        next
    }

    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < MIN_VELOCITY
    }
}

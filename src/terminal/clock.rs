use std::time::{Duration, Instant};

use crate::config::{Direction, Iterations};
use crate::host::AnimationParams;

/// Wall-clock evaluation of one keyframe timeline. Only linear easing is
/// rendered; other curves fall back to linear in a character grid.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    params: AnimationParams,
    started: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl AnimationClock {
    pub fn start(params: AnimationParams, now: Instant, running: bool) -> Self {
        if params.easing != "linear" {
            log::debug!("easing `{}` rendered as linear", params.easing);
        }
        Self { params, started: now, paused_at: (!running).then_some(now), paused_total: Duration::ZERO }
    }

    pub fn is_running(&self) -> bool {
        self.paused_at.is_none()
    }

    pub fn set_running(&mut self, running: bool, now: Instant) {
        match (running, self.paused_at) {
            (true, Some(at)) => {
                self.paused_total += now.saturating_duration_since(at);
                self.paused_at = None;
            }
            (false, None) => self.paused_at = Some(now),
            _ => {}
        }
    }

    /// Seconds into the timeline, counting the negative resume delay.
    fn timeline_secs(&self, now: Instant) -> f32 {
        let until = self.paused_at.unwrap_or(now);
        let active = until.saturating_duration_since(self.started).saturating_sub(self.paused_total);
        active.as_secs_f32() - self.params.delay.as_secs_f32() - self.params.resume_delay
    }

    pub fn translation(&self, now: Instant) -> f32 {
        let duration = self.params.duration.as_secs_f32();
        if duration <= 0.0 {
            return 0.0;
        }
        let cycles = self.timeline_secs(now).max(0.0) / duration;
        let progress = match self.params.iterations {
            Iterations::Count(n) if cycles >= n as f32 => 1.0,
            _ => cycles.fract(),
        };
        let progress = match self.params.direction {
            Direction::Forward => progress,
            Direction::Reverse => 1.0 - progress,
        };
        self.params.distance * progress
    }
}

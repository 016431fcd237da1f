use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use super::clock::AnimationClock;
use crate::host::Signal;
use crate::measure::{VAR_PLAY_STATE, VAR_SCROLL_OFFSET};
use crate::track::Track;

/// Everything a text region shows, shared between its host and the draw loop.
#[derive(Debug, Default)]
pub struct Surface {
    /// Columns.
    pub width: f32,
    pub viewport_width: f32,
    pub reduced_motion: bool,
    pub vars: BTreeMap<&'static str, String>,
    pub attributes: BTreeMap<&'static str, String>,
    pub track: Option<Track<String>>,
    pub clock: Option<AnimationClock>,
    pub direct: Option<f32>,
    pub subscriptions: HashSet<Signal>,
    pub frame_requested: bool,
    pub wakeup: Option<Instant>,
}

impl Surface {
    pub fn new(width: f32) -> Self {
        Self { width, viewport_width: width, ..Default::default() }
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Numeric part of a `px` variable.
    pub fn var_px(&self, name: &str) -> Option<f32> {
        self.var(name)?.strip_suffix("px")?.parse().ok()
    }

    pub fn is_running(&self) -> bool {
        self.var(VAR_PLAY_STATE) == Some("running")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Where the track sits, before the scroll offset.
    pub fn translation(&self, now: Instant) -> f32 {
        self.direct
            .or_else(|| self.clock.as_ref().map(|c| c.translation(now)))
            .unwrap_or(0.0)
    }

    /// Translation including the scroll-synchronised offset.
    pub fn rendered_translation(&self, now: Instant) -> f32 {
        self.translation(now) - self.var_px(VAR_SCROLL_OFFSET).unwrap_or(0.0)
    }

    /// Take the pending frame request, if any.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Take the wakeup if it is due at `now`.
    pub fn take_due_wakeup(&mut self, now: Instant) -> bool {
        match self.wakeup {
            Some(at) if at <= now => {
                self.wakeup = None;
                true
            }
            _ => false,
        }
    }
}

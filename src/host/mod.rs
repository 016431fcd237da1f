//! The seam between the engine and whatever lays out and animates the track.
//!
//! A host owns one container. It measures nodes, mounts the track, publishes
//! style variables, runs the keyframe timeline, and delivers lifecycle signals
//! back to the engine. The engine never paces frames or computes layout itself.

use std::fmt;
use std::time::{Duration, Instant};

use crate::assets::PendingAssets;
use crate::config::{Direction, Iterations, Length};
use crate::error::RenderError;
use crate::track::Track;

#[cfg(test)]
pub(crate) mod mock;

/// Lifecycle signal sources the engine can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    ContainerResize,
    TrackResize,
    ViewportResize,
    Intersection,
    TabVisibility,
    Hover,
    Pointer,
    Scroll,
}

/// A live subscription. Only [`crate::Marquee::destroy`] runs the disposer;
/// dropping a `Subscription` on its own leaves the listener attached.
pub struct Subscription {
    signal: Signal,
    disposer: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(signal: Signal, disposer: impl FnOnce() + 'static) -> Self {
        Self { signal, disposer: Some(Box::new(disposer)) }
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    pub fn dispose(mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("signal", &self.signal)
            .field("has_disposer", &self.disposer.is_some())
            .finish()
    }
}

/// Everything the timeline needs to run one loop.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationParams {
    /// Travel per iteration; always `-track_width`.
    pub distance: f32,
    pub duration: Duration,
    /// Start delay before the first iteration.
    pub delay: Duration,
    /// Non-positive offset in seconds. Starts the timeline part-way through a loop.
    pub resume_delay: f32,
    pub iterations: Iterations,
    pub direction: Direction,
    pub easing: String,
}

pub trait Host {
    type Node: Clone;

    fn container_width(&self) -> f32;
    fn viewport_width(&self) -> f32;

    fn prefers_reduced_motion(&self) -> bool {
        false
    }

    /// Absolute pixels for `length`, probing computed style for relative units.
    fn resolve_length(&self, length: Length) -> f32;

    /// Widths of `nodes` laid out somewhere that does not affect the page.
    fn measure_offscreen(&mut self, nodes: &[Self::Node]) -> Vec<f32>;

    /// A copy of `node` hidden from assistive technology with ids stripped.
    fn presentation_clone(&self, node: &Self::Node) -> Self::Node;

    fn error_placeholder(&self, error: &RenderError) -> Self::Node;

    fn mount(&mut self, track: &Track<Self::Node>);
    fn unmount(&mut self);

    /// Sub-pixel widths of the mounted canonical nodes, in track order.
    fn measure_mounted(&self) -> Vec<f32>;

    fn set_var(&mut self, name: &'static str, value: String);
    fn remove_var(&mut self, name: &'static str);
    fn set_attribute(&mut self, name: &'static str, value: &str);
    fn remove_attribute(&mut self, name: &'static str);

    /// (Re)start the keyframe timeline, or stop it with `None`.
    fn set_animation(&mut self, params: Option<&AnimationParams>);

    /// Translation the track is currently rendered at.
    fn current_translation(&self) -> f32;

    /// `Some` positions the track directly and suspends the timeline;
    /// `None` hands positioning back to it.
    fn set_translation(&mut self, translation: Option<f32>);

    fn subscribe(&mut self, signal: Signal) -> Subscription;

    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
    fn schedule_wakeup(&mut self, at: Instant);
    fn cancel_wakeup(&mut self);

    fn pending_assets(&mut self) -> PendingAssets {
        PendingAssets::default()
    }
}

/// Turns a selector into a host bound to the matching container.
pub trait Resolve {
    type Host: Host;

    fn resolve(&mut self, target: &str) -> Option<Self::Host>;
}

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::time::Instant;

use super::{AnimationParams, Host, Signal, Subscription};
use crate::assets::PendingAssets;
use crate::config::Length;
use crate::error::RenderError;
use crate::track::Track;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MockNode {
    pub label: String,
    pub width: f32,
    pub id: Option<String>,
    pub presentation: bool,
}

impl MockNode {
    pub fn new(label: &str, width: f32) -> Self {
        Self { label: label.to_string(), width, id: Some(format!("node-{label}")), presentation: false }
    }
}

/// Records every call so tests can assert on what the engine published.
#[derive(Debug)]
pub(crate) struct MockHost {
    pub container_width: f32,
    pub viewport_width: f32,
    pub font_size: f32,
    pub reduced_motion: bool,
    pub vars: BTreeMap<&'static str, String>,
    pub attributes: BTreeMap<&'static str, String>,
    pub mounted: Option<Track<MockNode>>,
    pub animation: Option<AnimationParams>,
    pub animation_starts: usize,
    /// What the timeline reports when nothing is positioned directly.
    pub timeline_translation: f32,
    pub direct_translation: Option<f32>,
    pub live: Rc<RefCell<HashSet<Signal>>>,
    pub frame_requested: bool,
    pub wakeup: Option<Instant>,
    pub pending: PendingAssets,
}

impl MockHost {
    pub fn new(container_width: f32) -> Self {
        Self {
            container_width,
            viewport_width: container_width,
            font_size: 16.0,
            reduced_motion: false,
            vars: BTreeMap::new(),
            attributes: BTreeMap::new(),
            mounted: None,
            animation: None,
            animation_starts: 0,
            timeline_translation: 0.0,
            direct_translation: None,
            live: Rc::new(RefCell::new(HashSet::new())),
            frame_requested: false,
            wakeup: None,
            pending: PendingAssets::default(),
        }
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn is_subscribed(&self, signal: Signal) -> bool {
        self.live.borrow().contains(&signal)
    }
}

impl Host for MockHost {
    type Node = MockNode;

    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn resolve_length(&self, length: Length) -> f32 {
        match length {
            Length::Px(v) => v,
            Length::Em(v) | Length::Rem(v) => v * self.font_size,
            Length::Percent(v) => v / 100.0 * self.container_width,
        }
    }

    fn measure_offscreen(&mut self, nodes: &[MockNode]) -> Vec<f32> {
        nodes.iter().map(|n| n.width).collect()
    }

    fn presentation_clone(&self, node: &MockNode) -> MockNode {
        MockNode { id: None, presentation: true, ..node.clone() }
    }

    fn error_placeholder(&self, error: &RenderError) -> MockNode {
        MockNode::new(&format!("error: {}", error.message), 40.0)
    }

    fn mount(&mut self, track: &Track<MockNode>) {
        self.mounted = Some(track.clone());
    }

    fn unmount(&mut self) {
        self.mounted = None;
    }

    fn measure_mounted(&self) -> Vec<f32> {
        self.mounted
            .as_ref()
            .map(|t| t.canonical().iter().map(|n| n.node.width).collect())
            .unwrap_or_default()
    }

    fn set_var(&mut self, name: &'static str, value: String) {
        self.vars.insert(name, value);
    }

    fn remove_var(&mut self, name: &'static str) {
        self.vars.remove(name);
    }

    fn set_attribute(&mut self, name: &'static str, value: &str) {
        self.attributes.insert(name, value.to_string());
    }

    fn remove_attribute(&mut self, name: &'static str) {
        self.attributes.remove(name);
    }

    fn set_animation(&mut self, params: Option<&AnimationParams>) {
        if params.is_some() {
            self.animation_starts += 1;
        }
        self.animation = params.cloned();
    }

    fn current_translation(&self) -> f32 {
        self.direct_translation.unwrap_or(self.timeline_translation)
    }

    fn set_translation(&mut self, translation: Option<f32>) {
        self.direct_translation = translation;
    }

    fn subscribe(&mut self, signal: Signal) -> Subscription {
        self.live.borrow_mut().insert(signal);
        let live = self.live.clone();
        Subscription::new(signal, move || {
            live.borrow_mut().remove(&signal);
        })
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_requested = false;
    }

    fn schedule_wakeup(&mut self, at: Instant) {
        self.wakeup = Some(at);
    }

    fn cancel_wakeup(&mut self) {
        self.wakeup = None;
    }

    fn pending_assets(&mut self) -> PendingAssets {
        std::mem::take(&mut self.pending)
    }
}

//! A character-grid host: one marquee per named region of a terminal line.

pub mod cell;
pub mod clock;
pub mod command;
pub mod render;
pub mod surface;

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

use crate::config::Length;
use crate::error::RenderError;
use crate::host::{AnimationParams, Host, Resolve, Signal, Subscription};
use crate::measure::VAR_PLAY_STATE;
use crate::track::Track;
use clock::AnimationClock;
use surface::Surface;

/// Columns per `em`/`rem`.
const CELLS_PER_EM: f32 = 1.0;

/// Region attribute carrying the content's wrapper class.
pub const ATTR_CLASS: &str = "class";

pub struct TextHost {
    surface: Arc<Mutex<Surface>>,
}

impl TextHost {
    pub fn new(surface: Arc<Mutex<Surface>>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Arc<Mutex<Surface>> {
        &self.surface
    }
}

pub fn text_width(s: &str) -> f32 {
    UnicodeWidthStr::width(s) as f32
}

impl Host for TextHost {
    type Node = String;

    fn container_width(&self) -> f32 {
        self.surface.lock().width
    }

    fn viewport_width(&self) -> f32 {
        self.surface.lock().viewport_width
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.surface.lock().reduced_motion
    }

    fn resolve_length(&self, length: Length) -> f32 {
        match length {
            Length::Px(v) => v,
            Length::Em(v) | Length::Rem(v) => v * CELLS_PER_EM,
            Length::Percent(v) => v / 100.0 * self.container_width(),
        }
    }

    fn measure_offscreen(&mut self, nodes: &[String]) -> Vec<f32> {
        nodes.iter().map(|n| text_width(n)).collect()
    }

    fn presentation_clone(&self, node: &String) -> String {
        node.clone()
    }

    fn error_placeholder(&self, error: &RenderError) -> String {
        format!("[item {} failed]", error.index)
    }

    fn mount(&mut self, track: &Track<String>) {
        let mut s = self.surface.lock();
        match track.wrapper_class() {
            Some(class) => s.attributes.insert(ATTR_CLASS, class.to_string()),
            None => s.attributes.remove(ATTR_CLASS),
        };
        s.track = Some(track.clone());
    }

    fn unmount(&mut self) {
        let mut s = self.surface.lock();
        s.attributes.remove(ATTR_CLASS);
        s.track = None;
    }

    fn measure_mounted(&self) -> Vec<f32> {
        self.surface
            .lock()
            .track
            .as_ref()
            .map(|t| t.canonical().iter().map(|n| text_width(&n.node)).collect())
            .unwrap_or_default()
    }

    fn set_var(&mut self, name: &'static str, value: String) {
        let mut surface = self.surface.lock();
        if name == VAR_PLAY_STATE {
            let running = value == "running";
            if let Some(clock) = surface.clock.as_mut() {
                clock.set_running(running, Instant::now());
            }
        }
        surface.vars.insert(name, value);
    }

    fn remove_var(&mut self, name: &'static str) {
        self.surface.lock().vars.remove(name);
    }

    fn set_attribute(&mut self, name: &'static str, value: &str) {
        self.surface.lock().attributes.insert(name, value.to_string());
    }

    fn remove_attribute(&mut self, name: &'static str) {
        self.surface.lock().attributes.remove(name);
    }

    fn set_animation(&mut self, params: Option<&AnimationParams>) {
        let mut surface = self.surface.lock();
        let running = surface.is_running();
        surface.clock = params.map(|p| AnimationClock::start(p.clone(), Instant::now(), running));
    }

    fn current_translation(&self) -> f32 {
        self.surface.lock().translation(Instant::now())
    }

    fn set_translation(&mut self, translation: Option<f32>) {
        self.surface.lock().direct = translation;
    }

    fn subscribe(&mut self, signal: Signal) -> Subscription {
        self.surface.lock().subscriptions.insert(signal);
        let surface = self.surface.clone();
        Subscription::new(signal, move || {
            surface.lock().subscriptions.remove(&signal);
        })
    }

    fn request_frame(&mut self) {
        self.surface.lock().frame_requested = true;
    }

    fn cancel_frame(&mut self) {
        self.surface.lock().frame_requested = false;
    }

    fn schedule_wakeup(&mut self, at: Instant) {
        self.surface.lock().wakeup = Some(at);
    }

    fn cancel_wakeup(&mut self) {
        self.surface.lock().wakeup = None;
    }
}

/// Named regions a marquee can be attached to.
#[derive(Default)]
pub struct TextDocument {
    regions: HashMap<String, Arc<Mutex<Surface>>>,
}

impl TextDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, name: impl Into<String>, width: f32) -> Arc<Mutex<Surface>> {
        let surface = Arc::new(Mutex::new(Surface::new(width)));
        self.regions.insert(name.into(), surface.clone());
        surface
    }

    pub fn region(&self, name: &str) -> Option<Arc<Mutex<Surface>>> {
        self.regions.get(name).cloned()
    }
}

impl Resolve for TextDocument {
    type Host = TextHost;

    fn resolve(&mut self, target: &str) -> Option<TextHost> {
        self.region(target).map(TextHost::new)
    }
}

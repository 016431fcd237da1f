//! The marquee engine: one instance per container.
//!
//! Exactly one thing drives the track's position at a time. Normally that is
//! the host's keyframe timeline; during a drag, momentum glide or snap the
//! engine positions the track directly and hands back to the timeline with a
//! negative resume delay when it is done.

use std::time::{Duration, Instant};

use crate::animation::momentum::NOMINAL_FRAME_MS;
use crate::animation::snap::{nearest_snap, snap_points};
use crate::animation::{Momentum, ScrollBoost, Snap};
use crate::assets::{AssetGate, AssetId};
use crate::config::{
    Direction, HoverAction, MarqueeConfig, MarqueeOptions, ReducedMotion, Resolved, Settings,
};
use crate::debounce::Debouncer;
use crate::error::MarqueeError;
use crate::host::{AnimationParams, Host, Resolve, Signal, Subscription};
use crate::input::{DragAction, DragTracker, PointerEvent};
use crate::measure::{self, Metrics};
use crate::playback::{PlayState, Playback};
use crate::track::{self, Content, NodeRole, Track};

const ATTR_ROLE: &str = "role";
const ATTR_LABEL: &str = "aria-label";
const ATTR_LIVE: &str = "aria-live";
const ATTR_CENTERED: &str = "data-marquee-centered";

#[derive(Debug, Clone, PartialEq)]
pub enum MarqueeEvent {
    Built { clones: usize, centered: bool },
    BreakpointChanged { from: Option<u32>, to: Option<u32> },
    PlayStateChanged(PlayState),
    DragStarted,
    DragEnded,
    Destroyed,
}

/// Who is positioning the track right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    Timeline,
    Dragging,
    Momentum,
    Snap,
}

#[derive(Debug)]
enum Motion {
    Timeline,
    Dragging,
    Momentum { momentum: Momentum, position: f32 },
    Snap { snap: Snap, position: f32 },
}

type Listener = Box<dyn FnMut(&MarqueeEvent)>;

pub struct Marquee<H: Host, T> {
    host: H,
    settings: Settings,
    config: MarqueeConfig,
    breakpoint: Option<usize>,
    breakpoint_width: Option<u32>,
    content: Content<T, H::Node>,
    track: Track<H::Node>,
    metrics: Metrics,
    playback: Playback,
    play_state: PlayState,
    drag: DragTracker,
    motion: Motion,
    /// The track is positioned directly rather than by the timeline.
    direct: bool,
    boost: Option<ScrollBoost>,
    resize: Debouncer,
    assets: Option<AssetGate>,
    subscriptions: Vec<Subscription>,
    listeners: Vec<Listener>,
    speed_override: Option<f32>,
    direction_override: Option<Direction>,
    frame_pending: bool,
    last_frame: Option<Instant>,
    built: bool,
    destroyed: bool,
}

impl<H: Host, T> Marquee<H, T> {
    /// Resolve `target` to a container and start a marquee in it.
    pub fn attach<R>(
        resolver: &mut R,
        target: &str,
        options: MarqueeOptions,
        content: Content<T, H::Node>,
    ) -> Result<Self, MarqueeError>
    where
        R: Resolve<Host = H>,
    {
        let host = resolver
            .resolve(target)
            .ok_or_else(|| MarqueeError::ContainerNotFound(target.to_string()))?;
        Self::new(host, options, content)
    }

    pub fn new(
        mut host: H,
        options: MarqueeOptions,
        content: Content<T, H::Node>,
    ) -> Result<Self, MarqueeError> {
        let settings = Settings::new(options)?;
        let resolved = settings.resolve(host.viewport_width())?;
        let config = resolved.config;
        let reduced_stop =
            host.prefers_reduced_motion() && config.animation.reduced_motion == ReducedMotion::Stop;
        let pending = host.pending_assets();

        let mut marquee = Self {
            playback: Playback::new(&config.behavior, reduced_stop),
            drag: DragTracker::new(&config.physics),
            boost: config.physics.scroll_sync.enabled.then(|| ScrollBoost::new(&config.physics.scroll_sync)),
            host,
            settings,
            breakpoint: resolved.breakpoint,
            breakpoint_width: resolved.min_width,
            content,
            track: Track::empty(),
            metrics: Metrics::default(),
            play_state: PlayState::Paused,
            motion: Motion::Timeline,
            direct: false,
            resize: Debouncer::default(),
            assets: None,
            subscriptions: Vec::new(),
            listeners: Vec::new(),
            speed_override: None,
            direction_override: None,
            frame_pending: false,
            last_frame: None,
            built: false,
            destroyed: false,
            config,
        };

        marquee.ensure_subscriptions();
        marquee.apply_accessibility();

        if pending.is_empty() {
            marquee.build();
        } else {
            let timeout = Duration::from_millis(marquee.config.behavior.asset_timeout_ms);
            log::debug!(
                "waiting on {} image(s){} before first measurement",
                pending.images.len(),
                if pending.fonts_loading { " and fonts" } else { "" }
            );
            marquee.assets = Some(AssetGate::new(pending, Instant::now(), timeout));
            marquee.schedule_wakeup();
        }
        Ok(marquee)
    }

    // ── public operations ───────────────────────────────────────────────

    pub fn play(&mut self) {
        if self.destroyed {
            return;
        }
        self.playback.play();
        self.update_play_state();
    }

    pub fn pause(&mut self) {
        if self.destroyed {
            return;
        }
        self.playback.pause();
        self.update_play_state();
    }

    /// Pixels per second. Negative values clamp to 0; non-finite ones are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if self.destroyed {
            return;
        }
        if !speed.is_finite() {
            log::warn!("ignoring non-finite speed {speed}");
            return;
        }
        if speed < 0.0 {
            log::warn!("speed {speed} clamped to 0");
        }
        self.speed_override = Some(speed.max(0.0));
        if self.built {
            self.sync(true);
        }
    }

    pub fn reverse(&mut self) {
        if self.destroyed {
            return;
        }
        self.direction_override = Some(self.direction().flipped());
        if self.built {
            self.sync(true);
        }
    }

    pub fn update_items(&mut self, items: Vec<T>) {
        if self.destroyed {
            return;
        }
        self.content.set_items(items);
        // still waiting on assets: the first build picks the new items up
        if self.assets.is_none() {
            self.build();
        }
    }

    /// Swap in new options wholesale and rebuild.
    pub fn apply_options(&mut self, options: MarqueeOptions) -> Result<(), MarqueeError> {
        if self.destroyed {
            return Ok(());
        }
        let settings = Settings::new(options)?;
        let resolved = settings.resolve(self.host.viewport_width())?;
        self.settings = settings;
        self.ensure_subscriptions();
        let from = self.breakpoint_width;
        let changed = resolved.breakpoint != self.breakpoint;
        self.apply_resolved(resolved);
        if self.assets.is_none() {
            self.build();
        }
        if changed {
            let to = self.breakpoint_width;
            self.emit(MarqueeEvent::BreakpointChanged { from, to });
        }
        Ok(())
    }

    /// Release everything this instance acquired. Idempotent; also runs on drop.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for sub in self.subscriptions.drain(..) {
            sub.dispose();
        }
        self.host.cancel_frame();
        self.host.cancel_wakeup();
        self.frame_pending = false;
        self.resize.cancel();
        self.assets = None;
        self.drag.cancel();
        self.motion = Motion::Timeline;
        self.direct = false;
        self.host.set_animation(None);
        self.host.set_translation(None);
        self.host.unmount();
        for name in measure::ALL_VARS {
            self.host.remove_var(name);
        }
        for attr in [ATTR_ROLE, ATTR_LABEL, ATTR_LIVE, ATTR_CENTERED] {
            self.host.remove_attribute(attr);
        }
        self.track = Track::empty();
        self.metrics = Metrics::default();
        self.destroyed = true;
        log::debug!("marquee destroyed");
        self.emit(MarqueeEvent::Destroyed);
        self.listeners.clear();
    }

    pub fn on_event(&mut self, listener: impl FnMut(&MarqueeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── signals ─────────────────────────────────────────────────────────

    /// Container, track or viewport resized. Coalesced by the debouncer.
    pub fn on_resize(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        self.resize.trigger(now);
        self.schedule_wakeup();
    }

    pub fn on_intersection(&mut self, visible: bool) {
        if self.destroyed {
            return;
        }
        self.playback.set_in_view(visible);
        self.update_play_state();
    }

    pub fn on_tab_visibility(&mut self, visible: bool) {
        if self.destroyed {
            return;
        }
        self.playback.set_tab_visible(visible);
        self.update_play_state();
    }

    pub fn on_hover(&mut self, hovered: bool) {
        if self.destroyed || self.config.behavior.hover == HoverAction::Ignore {
            return;
        }
        if self.playback.is_hovered() == hovered {
            return;
        }
        self.playback.set_hovered(hovered);
        if self.config.behavior.hover == HoverAction::Slow && self.built {
            self.sync(true);
        } else {
            self.update_play_state();
        }
    }

    /// Returns whether the press started a drag.
    pub fn on_pointer_down(&mut self, ev: PointerEvent) -> bool {
        if self.destroyed
            || !self.built
            || self.track.is_centered()
            || !self.config.physics.draggable
            || !ev.is_primary_button()
            || self.drag.is_active()
        {
            return false;
        }
        // at most one loop positions the track
        self.motion = Motion::Dragging;
        self.last_frame = None;
        let origin = self.host.current_translation();
        self.drag.begin(&ev, origin);
        self.playback.begin_drag();
        self.update_play_state();
        self.emit(MarqueeEvent::DragStarted);
        true
    }

    pub fn on_pointer_move(&mut self, ev: PointerEvent) {
        if self.destroyed {
            return;
        }
        match self.drag.update(&ev) {
            DragAction::Engage { position } | DragAction::Move { position } => {
                self.set_direct(position);
            }
            DragAction::Abort => {
                log::debug!("vertical gesture, releasing drag to the page");
                let position = self.host.current_translation();
                self.release_without_glide(position);
            }
            DragAction::None => {}
        }
    }

    pub fn on_pointer_up(&mut self, ev: PointerEvent) {
        if self.destroyed {
            return;
        }
        let Some(release) = self.drag.release(&ev) else {
            return;
        };
        if !release.moved {
            self.release_without_glide(release.position);
            return;
        }
        let momentum = &self.config.physics.momentum;
        if momentum.enabled && Momentum::should_start(release.velocity) {
            self.motion = Motion::Momentum {
                momentum: Momentum::new(release.velocity, momentum.friction),
                position: release.position,
            };
            self.last_frame = Some(ev.at);
            self.ensure_frame();
        } else if momentum.snap {
            self.start_snap(release.position, ev.at);
        } else {
            self.hand_back(release.position);
        }
    }

    pub fn on_pointer_cancel(&mut self, ev: PointerEvent) {
        self.on_pointer_up(ev);
    }

    /// Vertical page scroll position, for the scroll-synchronised offset.
    pub fn on_scroll(&mut self, y: f32) {
        if self.destroyed {
            return;
        }
        let Some(boost) = self.boost.as_mut() else {
            return;
        };
        boost.on_scroll(y);
        if !boost.is_settled() {
            self.ensure_frame();
        }
    }

    pub fn on_asset_settled(&mut self, id: AssetId, now: Instant) {
        if let Some(gate) = self.assets.as_mut() {
            gate.image_settled(id);
        }
        self.poll(now);
    }

    pub fn on_fonts_ready(&mut self, now: Instant) {
        if let Some(gate) = self.assets.as_mut() {
            gate.fonts_ready();
        }
        self.poll(now);
    }

    /// Run whatever timers are due. Hosts call this at the scheduled wakeup.
    pub fn poll(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        if self.assets.as_mut().is_some_and(|gate| gate.is_ready(now)) {
            self.assets = None;
            self.build();
        }
        if self.resize.fire(now) {
            self.handle_resize();
        }
        self.schedule_wakeup();
    }

    /// One animation frame: momentum, snap and scroll-offset smoothing.
    pub fn frame(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        self.frame_pending = false;
        let frame_ms = self
            .last_frame
            .map(|t| now.saturating_duration_since(t).as_secs_f32() * 1000.0)
            .unwrap_or(NOMINAL_FRAME_MS);
        self.last_frame = Some(now);
        let mut again = false;

        match std::mem::replace(&mut self.motion, Motion::Timeline) {
            Motion::Momentum { mut momentum, position } => {
                let next = momentum.step(position, frame_ms);
                self.set_direct(next);
                if !momentum.is_settled() {
                    self.motion = Motion::Momentum { momentum, position: next };
                    again = true;
                } else if self.config.physics.momentum.snap {
                    self.start_snap(next, now);
                } else {
                    self.hand_back(next);
                }
            }
            Motion::Snap { snap, position } => {
                let (next, arrived) = snap.step(position);
                self.set_direct(next);
                if arrived {
                    self.hand_back(next);
                } else {
                    self.motion = Motion::Snap { snap, position: next };
                    again = true;
                }
            }
            other => self.motion = other,
        }

        if let Some(boost) = self.boost.as_mut() {
            if !boost.is_settled() {
                let alive = boost.tick();
                self.host.set_var(measure::VAR_SCROLL_OFFSET, measure::px(boost.offset()));
                again |= alive;
            }
        }

        if again {
            self.ensure_frame();
        } else if matches!(self.motion, Motion::Timeline) {
            self.last_frame = None;
        }
    }

    // ── accessors ───────────────────────────────────────────────────────

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn track(&self) -> &Track<H::Node> {
        &self.track
    }

    pub fn track_width(&self) -> f32 {
        self.metrics.track_width
    }

    pub fn is_centered(&self) -> bool {
        self.track.is_centered()
    }

    pub fn clone_count(&self) -> usize {
        self.track.clones()
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn is_manually_paused(&self) -> bool {
        self.playback.is_manually_paused()
    }

    pub fn duration(&self) -> Option<Duration> {
        if self.track.is_centered() {
            None
        } else {
            measure::duration(self.metrics.track_width, self.effective_speed())
        }
    }

    /// Base speed in px/s, before hover or reduced-motion scaling.
    pub fn speed(&self) -> f32 {
        self.speed_override.unwrap_or(self.config.style.speed)
    }

    pub fn direction(&self) -> Direction {
        self.direction_override.unwrap_or(self.config.style.direction)
    }

    pub fn active_breakpoint(&self) -> Option<u32> {
        self.breakpoint_width
    }

    pub fn motion_phase(&self) -> MotionPhase {
        match self.motion {
            Motion::Timeline => MotionPhase::Timeline,
            Motion::Dragging => MotionPhase::Dragging,
            Motion::Momentum { .. } => MotionPhase::Momentum,
            Motion::Snap { .. } => MotionPhase::Snap,
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Earliest pending timer, for hosts that drive `poll` themselves.
    pub fn next_wakeup(&self) -> Option<Instant> {
        let assets = self.assets.as_ref().and_then(AssetGate::deadline);
        match (self.resize.deadline(), assets) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── internals ───────────────────────────────────────────────────────

    fn build(&mut self) {
        if self.destroyed {
            return;
        }
        self.abandon_motion();
        let gap = self.gap_px();
        let canonical = track::render_cycle(&self.content, &self.host);
        let nodes: Vec<H::Node> = canonical.iter().map(|n| n.node.clone()).collect();
        let widths = self.host.measure_offscreen(&nodes);
        let cycle = track::cycle_width(&widths, gap);
        let container = self.host.container_width();
        let behavior = &self.config.behavior;
        let centered = track::should_center(canonical.len(), cycle, container, behavior.center_if_short);
        let clones = track::clone_count(behavior.clone_strategy, cycle, container);
        let wrapper = self.content.wrapper_class().map(str::to_string);
        self.track = track::assemble(&self.host, canonical, clones, centered, wrapper);

        self.host.unmount();
        self.host.mount(&self.track);
        if centered {
            self.host.set_attribute(ATTR_CENTERED, "true");
        } else {
            self.host.remove_attribute(ATTR_CENTERED);
        }
        self.built = true;
        log::debug!(
            "built track: cycle {cycle:.1}px in {container:.1}px container, {} clone(s){}",
            self.track.clones(),
            if centered { ", centered" } else { "" }
        );

        self.host.set_var(measure::VAR_SCROLL_OFFSET, measure::px(0.0));
        self.sync(false);
        let clones = self.track.clones();
        self.emit(MarqueeEvent::Built { clones, centered });
    }

    /// Re-measure and republish. With `preserve_phase` the timeline restarts at
    /// the position currently on screen instead of at the loop start.
    fn sync(&mut self, preserve_phase: bool) {
        let previous = preserve_phase.then(|| self.host.current_translation());
        let gap = self.gap_px();
        self.metrics = measure::measure(&self.host, gap);
        let direction = self.direction();
        measure::publish_style(&mut self.host, &self.config, direction, gap);

        match self.duration() {
            Some(duration) => {
                let width = self.metrics.track_width;
                let (resume, delay) = match previous {
                    Some(t) => (measure::resume_delay(t, width, duration, direction), Duration::ZERO),
                    None => (0.0, Duration::from_millis(self.config.animation.delay_ms.into())),
                };
                self.start_animation(duration, resume, delay);
                // a track left pinned by a stopped loop goes back to the timeline
                if self.direct && matches!(self.motion, Motion::Timeline) {
                    self.host.set_translation(None);
                    self.direct = false;
                }
                self.playback.set_animatable(true);
            }
            None => {
                self.stop_animation();
                // freeze in place rather than jump back to the loop start
                if let Some(t) = previous {
                    if !self.track.is_centered() && matches!(self.motion, Motion::Timeline) {
                        self.set_direct(t);
                    }
                }
                self.playback.set_animatable(false);
            }
        }
        self.update_play_state();
    }

    fn start_animation(&mut self, duration: Duration, resume_delay: f32, delay: Duration) {
        let width = self.metrics.track_width;
        let params = AnimationParams {
            distance: -width,
            duration,
            delay,
            resume_delay,
            iterations: self.config.animation.iterations,
            direction: self.direction(),
            easing: self.config.animation.easing.clone(),
        };
        self.host.set_var(measure::VAR_DISTANCE, measure::px(-width));
        self.host.set_var(measure::VAR_DURATION, measure::secs(duration.as_secs_f32()));
        self.host.set_var(measure::VAR_RESUME_DELAY, measure::secs(resume_delay));
        self.host.set_animation(Some(&params));
    }

    fn stop_animation(&mut self) {
        self.host.remove_var(measure::VAR_DISTANCE);
        self.host.remove_var(measure::VAR_DURATION);
        self.host.remove_var(measure::VAR_RESUME_DELAY);
        self.host.set_animation(None);
    }

    fn handle_resize(&mut self) {
        if self.assets.is_some() {
            return;
        }
        let resolved = match self.settings.resolve(self.host.viewport_width()) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::warn!("keeping current config after resize: {e}");
                return;
            }
        };
        if resolved.breakpoint != self.breakpoint {
            let from = self.breakpoint_width;
            self.apply_resolved(resolved);
            self.build();
            let to = self.breakpoint_width;
            log::debug!("breakpoint changed {from:?} -> {to:?}");
            self.emit(MarqueeEvent::BreakpointChanged { from, to });
            return;
        }

        let metrics = measure::measure(&self.host, self.gap_px());
        let container = self.host.container_width();
        let behavior = &self.config.behavior;
        let centered = track::should_center(
            self.track.cycle_len(),
            metrics.track_width,
            container,
            behavior.center_if_short,
        );
        let clones = if centered {
            0
        } else {
            track::clone_count(behavior.clone_strategy, metrics.track_width, container)
        };
        if centered != self.track.is_centered() || clones != self.track.clones() {
            self.build();
        } else {
            self.sync(true);
        }
    }

    fn apply_resolved(&mut self, resolved: Resolved) {
        self.breakpoint = resolved.breakpoint;
        self.breakpoint_width = resolved.min_width;
        self.config = resolved.config;
        self.playback.reconfigure(&self.config.behavior);
        self.drag.reconfigure(&self.config.physics);
        let sync = &self.config.physics.scroll_sync;
        self.boost = sync.enabled.then(|| ScrollBoost::new(sync));
        self.apply_accessibility();
    }

    fn start_snap(&mut self, position: f32, now: Instant) {
        self.metrics = measure::measure(&self.host, self.gap_px());
        // separators are never snap targets
        let points: Vec<f32> = snap_points(&self.metrics.widths, self.metrics.gap)
            .into_iter()
            .zip(self.track.canonical())
            .filter(|(_, node)| node.role != NodeRole::Separator)
            .map(|(point, _)| point)
            .collect();
        let target = nearest_snap(position, &points, self.metrics.track_width);
        self.motion = Motion::Snap { snap: Snap::new(target), position };
        self.last_frame = Some(now);
        self.ensure_frame();
    }

    /// Give positioning back to the timeline, resuming from `position`.
    fn hand_back(&mut self, position: f32) {
        self.motion = Motion::Timeline;
        self.last_frame = None;
        self.metrics = measure::measure(&self.host, self.gap_px());
        let width = self.metrics.track_width;
        match self.duration() {
            Some(duration) => {
                let resume = measure::resume_delay(position, width, duration, self.direction());
                self.start_animation(duration, resume, Duration::ZERO);
                self.host.set_translation(None);
                self.direct = false;
            }
            // nothing to resume; leave the track where it was dropped
            None => self.set_direct(position),
        }
        self.finish_drag();
    }

    /// Tap or aborted gesture: no glide, no snap.
    fn release_without_glide(&mut self, position: f32) {
        self.drag.cancel();
        if self.direct {
            self.hand_back(position);
        } else {
            self.motion = Motion::Timeline;
            self.finish_drag();
        }
    }

    fn finish_drag(&mut self) {
        self.playback.end_drag();
        self.update_play_state();
        self.emit(MarqueeEvent::DragEnded);
    }

    /// Drop any drag, glide or snap without resuming from its position.
    fn abandon_motion(&mut self) {
        let was_moving = !matches!(self.motion, Motion::Timeline) || self.drag.is_active();
        self.drag.cancel();
        self.motion = Motion::Timeline;
        if self.direct {
            self.host.set_translation(None);
            self.direct = false;
        }
        if was_moving {
            self.playback.end_drag();
            self.emit(MarqueeEvent::DragEnded);
        }
    }

    fn set_direct(&mut self, position: f32) {
        let wrapped = measure::wrap_translation(position, self.metrics.track_width);
        self.host.set_translation(Some(wrapped));
        self.direct = true;
    }

    fn effective_speed(&self) -> f32 {
        let mut speed = self.speed();
        if self.playback.is_hovered() && self.config.behavior.hover == HoverAction::Slow {
            speed *= self.config.behavior.slow_factor;
        }
        if self.config.animation.reduced_motion == ReducedMotion::Slow && self.host.prefers_reduced_motion() {
            speed *= self.config.animation.reduced_motion_factor;
        }
        speed.max(0.0)
    }

    fn gap_px(&self) -> f32 {
        let gap = self.config.style.gap;
        if gap.is_absolute() {
            gap.value().max(0.0)
        } else {
            self.host.resolve_length(gap).max(0.0)
        }
    }

    fn update_play_state(&mut self) {
        let state = self.playback.state();
        self.host.set_var(measure::VAR_PLAY_STATE, state.as_css().to_string());
        if state != self.play_state {
            self.play_state = state;
            log::debug!("play state -> {}", state.as_css());
            self.emit(MarqueeEvent::PlayStateChanged(state));
        }
    }

    fn apply_accessibility(&mut self) {
        self.host.set_attribute(ATTR_ROLE, "marquee");
        self.host.set_attribute(ATTR_LABEL, &self.config.behavior.label);
        self.host.set_attribute(ATTR_LIVE, "off");
    }

    /// Subscribe to every signal any breakpoint might need. Handlers check the
    /// active config, so nothing is ever unsubscribed before `destroy`.
    fn ensure_subscriptions(&mut self) {
        let mut wanted = vec![
            Signal::ContainerResize,
            Signal::TrackResize,
            Signal::ViewportResize,
            Signal::TabVisibility,
        ];
        let configs = std::iter::once(self.settings.base().clone()).chain(
            self.settings
                .breakpoints()
                .iter()
                .map(|bp| self.settings.base().clone().patched(&bp.patch)),
        );
        for config in configs {
            let behavior = &config.behavior;
            if behavior.pause_when_invisible || behavior.start_when_visible {
                wanted.push(Signal::Intersection);
            }
            if behavior.hover != HoverAction::Ignore {
                wanted.push(Signal::Hover);
            }
            if config.physics.draggable {
                wanted.push(Signal::Pointer);
            }
            if config.physics.scroll_sync.enabled {
                wanted.push(Signal::Scroll);
            }
        }
        for signal in wanted {
            if !self.subscriptions.iter().any(|s| s.signal() == signal) {
                let sub = self.host.subscribe(signal);
                self.subscriptions.push(sub);
            }
        }
    }

    fn ensure_frame(&mut self) {
        if !self.frame_pending {
            self.host.request_frame();
            self.frame_pending = true;
        }
    }

    fn schedule_wakeup(&mut self) {
        match self.next_wakeup() {
            Some(at) => self.host.schedule_wakeup(at),
            None => self.host.cancel_wakeup(),
        }
    }

    fn emit(&mut self, event: MarqueeEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl<H: Host, T> Drop for Marquee<H, T> {
    fn drop(&mut self) {
        self.destroy();
    }
}

mod length;
mod patch;
mod settings;

pub use length::Length;
pub use patch::{
    AnimationPatch, BehaviorPatch, ConfigPatch, MomentumPatch, PhysicsPatch, ScrollSyncPatch,
    StylePatch,
};
pub use settings::{Breakpoint, MarqueeOptions, Resolved, Settings};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MarqueeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Direction::Forward => "normal",
            Direction::Reverse => "reverse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

impl Alignment {
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Start => "flex-start",
            Alignment::Center => "center",
            Alignment::End => "flex-end",
        }
    }
}

/// What hovering the container does to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverAction {
    #[default]
    Pause,
    Slow,
    #[serde(rename = "none")]
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneStrategy {
    /// Enough clones to cover the container plus one full cycle.
    #[default]
    Auto,
    Exact(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReducedMotion {
    #[default]
    Stop,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "IterationsRepr", into = "IterationsRepr")]
pub enum Iterations {
    #[default]
    Infinite,
    Count(u32),
}

impl fmt::Display for Iterations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Iterations::Infinite => f.write_str("infinite"),
            Iterations::Count(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum IterationsRepr {
    Count(u32),
    Keyword(String),
}

impl TryFrom<IterationsRepr> for Iterations {
    type Error = MarqueeError;

    fn try_from(repr: IterationsRepr) -> Result<Self, Self::Error> {
        match repr {
            IterationsRepr::Count(n) => Ok(Iterations::Count(n)),
            IterationsRepr::Keyword(s) if s.eq_ignore_ascii_case("infinite") => {
                Ok(Iterations::Infinite)
            }
            IterationsRepr::Keyword(s) => s
                .trim()
                .parse()
                .map(Iterations::Count)
                .map_err(|_| MarqueeError::InvalidIterations(s)),
        }
    }
}

impl From<Iterations> for IterationsRepr {
    fn from(iterations: Iterations) -> Self {
        match iterations {
            Iterations::Infinite => IterationsRepr::Keyword("infinite".to_string()),
            Iterations::Count(n) => IterationsRepr::Count(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Pixels per second.
    pub speed: f32,
    pub gap: Length,
    pub direction: Direction,
    pub align: Alignment,
    pub rtl: bool,
    pub fade_edges: bool,
    pub fade_width: Length,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            speed: 50.0,
            gap: Length::Px(24.0),
            direction: Direction::Forward,
            align: Alignment::Center,
            rtl: false,
            fade_edges: false,
            fade_width: Length::Px(48.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    pub auto_start: bool,
    pub start_when_visible: bool,
    pub center_if_short: bool,
    pub hover: HoverAction,
    /// Speed multiplier while hovered with `hover = "slow"`.
    pub slow_factor: f32,
    pub pause_when_invisible: bool,
    pub clone_strategy: CloneStrategy,
    /// Upper bound on waiting for images before the first measurement.
    pub asset_timeout_ms: u64,
    pub label: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            start_when_visible: false,
            center_if_short: false,
            hover: HoverAction::Pause,
            slow_factor: 0.3,
            pause_when_invisible: true,
            clone_strategy: CloneStrategy::Auto,
            asset_timeout_ms: 3000,
            label: "Scrolling content".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumConfig {
    pub enabled: bool,
    /// Velocity multiplier applied once per frame.
    pub friction: f32,
    pub snap: bool,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { enabled: true, friction: 0.95, snap: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSyncConfig {
    pub enabled: bool,
    pub factor: f32,
    /// Scrolling up pushes the track the other way instead of always boosting forward.
    pub follow_direction: bool,
}

impl Default for ScrollSyncConfig {
    fn default() -> Self {
        Self { enabled: false, factor: 0.5, follow_direction: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    pub draggable: bool,
    pub drag_speed: f32,
    /// Pixels a pointer has to travel before a press becomes a drag.
    pub touch_threshold: f32,
    pub axis_lock: bool,
    pub momentum: MomentumConfig,
    pub scroll_sync: ScrollSyncConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            draggable: true,
            drag_speed: 1.0,
            touch_threshold: 5.0,
            axis_lock: true,
            momentum: MomentumConfig::default(),
            scroll_sync: ScrollSyncConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub delay_ms: u32,
    pub iterations: Iterations,
    pub easing: String,
    pub reduced_motion: ReducedMotion,
    pub reduced_motion_factor: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            iterations: Iterations::Infinite,
            easing: "linear".to_string(),
            reduced_motion: ReducedMotion::Stop,
            reduced_motion_factor: 0.25,
        }
    }
}

/// Fully resolved configuration for one engine instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarqueeConfig {
    pub style: StyleConfig,
    pub behavior: BehaviorConfig,
    pub physics: PhysicsConfig,
    pub animation: AnimationConfig,
}

impl MarqueeConfig {
    pub fn patched(mut self, patch: &ConfigPatch) -> Self {
        patch.apply(&mut self);
        self
    }

    /// Reject non-finite numbers and clamp out-of-range ones.
    pub fn validated(mut self) -> Result<Self, MarqueeError> {
        finite("style.speed", self.style.speed)?;
        finite("style.gap", self.style.gap.value())?;
        finite("style.fade_width", self.style.fade_width.value())?;
        finite("behavior.slow_factor", self.behavior.slow_factor)?;
        finite("physics.drag_speed", self.physics.drag_speed)?;
        finite("physics.touch_threshold", self.physics.touch_threshold)?;
        finite("physics.momentum.friction", self.physics.momentum.friction)?;
        finite("physics.scroll_sync.factor", self.physics.scroll_sync.factor)?;
        finite("animation.reduced_motion_factor", self.animation.reduced_motion_factor)?;

        self.style.speed = clamped("style.speed", self.style.speed, 0.0, f32::MAX);
        let gap = clamped("style.gap", self.style.gap.value(), 0.0, f32::MAX);
        self.style.gap = self.style.gap.with_value(gap);
        let fade = clamped("style.fade_width", self.style.fade_width.value(), 0.0, f32::MAX);
        self.style.fade_width = self.style.fade_width.with_value(fade);
        self.behavior.slow_factor =
            clamped("behavior.slow_factor", self.behavior.slow_factor, 0.0, 1.0);
        self.physics.drag_speed =
            clamped("physics.drag_speed", self.physics.drag_speed, 0.0, f32::MAX);
        self.physics.touch_threshold =
            clamped("physics.touch_threshold", self.physics.touch_threshold, 0.0, f32::MAX);
        self.physics.momentum.friction =
            clamped("physics.momentum.friction", self.physics.momentum.friction, 0.0, 0.999);
        self.animation.reduced_motion_factor = clamped(
            "animation.reduced_motion_factor",
            self.animation.reduced_motion_factor,
            0.0,
            1.0,
        );
        if self.animation.easing.trim().is_empty() {
            log::warn!("animation.easing is empty, using linear");
            self.animation.easing = "linear".to_string();
        }
        Ok(self)
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), MarqueeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MarqueeError::InvalidConfig { field, reason: format!("{value} is not a finite number") })
    }
}

fn clamped(field: &str, value: f32, min: f32, max: f32) -> f32 {
    let c = value.clamp(min, max);
    if c != value {
        log::warn!("{field} = {value} out of range, clamped to {c}");
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── enums ───────────────────────────────────────────────────────────

    #[test]
    fn direction_flips_and_maps_to_css() {
        assert_eq!(Direction::Forward.flipped(), Direction::Reverse);
        assert_eq!(Direction::Reverse.flipped(), Direction::Forward);
        assert_eq!(Direction::Reverse.as_css(), "reverse");
    }

    #[test]
    fn clone_strategy_from_toml() {
        #[derive(Deserialize)]
        struct W {
            a: CloneStrategy,
            b: CloneStrategy,
        }
        let w: W = toml::from_str("a = \"auto\"\nb = { exact = 4 }").unwrap();
        assert_eq!(w.a, CloneStrategy::Auto);
        assert_eq!(w.b, CloneStrategy::Exact(4));
    }

    #[test]
    fn iterations_accept_keyword_or_count() {
        #[derive(Deserialize)]
        struct W {
            a: Iterations,
            b: Iterations,
        }
        let w: W = toml::from_str("a = \"infinite\"\nb = 3").unwrap();
        assert_eq!(w.a, Iterations::Infinite);
        assert_eq!(w.b, Iterations::Count(3));
        assert_eq!(Iterations::Count(3).to_string(), "3");
    }

    #[test]
    fn hover_none_keyword() {
        #[derive(Deserialize)]
        struct W {
            h: HoverAction,
        }
        let w: W = toml::from_str("h = \"none\"").unwrap();
        assert_eq!(w.h, HoverAction::Ignore);
    }

    // ── validation ──────────────────────────────────────────────────────

    #[test]
    fn negative_speed_is_clamped() {
        let mut cfg = MarqueeConfig::default();
        cfg.style.speed = -20.0;
        cfg.style.gap = Length::Rem(-1.0);
        let cfg = cfg.validated().unwrap();
        assert_eq!(cfg.style.speed, 0.0);
        assert_eq!(cfg.style.gap, Length::Rem(0.0));
    }

    #[test]
    fn factors_clamp_to_unit_range() {
        let mut cfg = MarqueeConfig::default();
        cfg.behavior.slow_factor = 4.0;
        cfg.physics.momentum.friction = 1.5;
        let cfg = cfg.validated().unwrap();
        assert_eq!(cfg.behavior.slow_factor, 1.0);
        assert!(cfg.physics.momentum.friction < 1.0);
    }

    #[test]
    fn non_finite_is_rejected() {
        let mut cfg = MarqueeConfig::default();
        cfg.style.speed = f32::NAN;
        let err = cfg.validated().unwrap_err();
        assert!(matches!(err, MarqueeError::InvalidConfig { field: "style.speed", .. }));
    }

    #[test]
    fn empty_easing_falls_back_to_linear() {
        let mut cfg = MarqueeConfig::default();
        cfg.animation.easing = "  ".into();
        assert_eq!(cfg.validated().unwrap().animation.easing, "linear");
    }
}

//! Partial configuration layers.
//!
//! Every field is optional; `apply` writes only the fields that are set, so
//! defaults, user options and breakpoint overrides stack as a deep merge.
//! Values that are not plain records (lengths, strategies, strings) replace
//! the target wholesale.

use serde::{Deserialize, Serialize};

use super::{
    Alignment, AnimationConfig, BehaviorConfig, CloneStrategy, Direction, HoverAction, Iterations,
    Length, MarqueeConfig, MomentumConfig, PhysicsConfig, ReducedMotion, ScrollSyncConfig,
    StyleConfig,
};

macro_rules! merge_fields {
    ($patch:expr => $target:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePatch {
    pub speed: Option<f32>,
    pub gap: Option<Length>,
    pub direction: Option<Direction>,
    pub align: Option<Alignment>,
    pub rtl: Option<bool>,
    pub fade_edges: Option<bool>,
    pub fade_width: Option<Length>,
}

impl StylePatch {
    pub fn apply(&self, target: &mut StyleConfig) {
        merge_fields!(self => target; speed, gap, direction, align, rtl, fade_edges, fade_width);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorPatch {
    pub auto_start: Option<bool>,
    pub start_when_visible: Option<bool>,
    pub center_if_short: Option<bool>,
    pub hover: Option<HoverAction>,
    pub slow_factor: Option<f32>,
    pub pause_when_invisible: Option<bool>,
    pub clone_strategy: Option<CloneStrategy>,
    pub asset_timeout_ms: Option<u64>,
    pub label: Option<String>,
}

impl BehaviorPatch {
    pub fn apply(&self, target: &mut BehaviorConfig) {
        merge_fields!(self => target;
            auto_start,
            start_when_visible,
            center_if_short,
            hover,
            slow_factor,
            pause_when_invisible,
            clone_strategy,
            asset_timeout_ms,
            label,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumPatch {
    pub enabled: Option<bool>,
    pub friction: Option<f32>,
    pub snap: Option<bool>,
}

impl MomentumPatch {
    pub fn apply(&self, target: &mut MomentumConfig) {
        merge_fields!(self => target; enabled, friction, snap);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSyncPatch {
    pub enabled: Option<bool>,
    pub factor: Option<f32>,
    pub follow_direction: Option<bool>,
}

impl ScrollSyncPatch {
    pub fn apply(&self, target: &mut ScrollSyncConfig) {
        merge_fields!(self => target; enabled, factor, follow_direction);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsPatch {
    pub draggable: Option<bool>,
    pub drag_speed: Option<f32>,
    pub touch_threshold: Option<f32>,
    pub axis_lock: Option<bool>,
    pub momentum: MomentumPatch,
    pub scroll_sync: ScrollSyncPatch,
}

impl PhysicsPatch {
    pub fn apply(&self, target: &mut PhysicsConfig) {
        merge_fields!(self => target; draggable, drag_speed, touch_threshold, axis_lock);
        self.momentum.apply(&mut target.momentum);
        self.scroll_sync.apply(&mut target.scroll_sync);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationPatch {
    pub delay_ms: Option<u32>,
    pub iterations: Option<Iterations>,
    pub easing: Option<String>,
    pub reduced_motion: Option<ReducedMotion>,
    pub reduced_motion_factor: Option<f32>,
}

impl AnimationPatch {
    pub fn apply(&self, target: &mut AnimationConfig) {
        merge_fields!(self => target;
            delay_ms,
            iterations,
            easing,
            reduced_motion,
            reduced_motion_factor,
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub style: StylePatch,
    pub behavior: BehaviorPatch,
    pub physics: PhysicsPatch,
    pub animation: AnimationPatch,
}

impl ConfigPatch {
    pub fn apply(&self, target: &mut MarqueeConfig) {
        self.style.apply(&mut target.style);
        self.behavior.apply(&mut target.behavior);
        self.physics.apply(&mut target.physics);
        self.animation.apply(&mut target.animation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_keeps_defaults() {
        let cfg = MarqueeConfig::default().patched(&ConfigPatch::default());
        assert_eq!(cfg, MarqueeConfig::default());
    }

    #[test]
    fn nested_fields_merge_without_clobbering_siblings() {
        let patch: ConfigPatch = toml::from_str(
            r#"
            [physics.momentum]
            friction = 0.9
            "#,
        )
        .unwrap();
        let cfg = MarqueeConfig::default().patched(&patch);
        assert_eq!(cfg.physics.momentum.friction, 0.9);
        assert!(cfg.physics.momentum.enabled);
        assert!(cfg.physics.draggable);
    }

    #[test]
    fn strategy_replaces_rather_than_merges() {
        let mut patch = ConfigPatch::default();
        patch.behavior.clone_strategy = Some(CloneStrategy::Exact(2));
        let cfg = MarqueeConfig::default().patched(&patch);
        assert_eq!(cfg.behavior.clone_strategy, CloneStrategy::Exact(2));
    }

    #[test]
    fn later_patch_wins() {
        let mut first = ConfigPatch::default();
        first.style.speed = Some(10.0);
        first.style.rtl = Some(true);
        let mut second = ConfigPatch::default();
        second.style.speed = Some(90.0);
        let cfg = MarqueeConfig::default().patched(&first).patched(&second);
        assert_eq!(cfg.style.speed, 90.0);
        assert!(cfg.style.rtl);
    }
}

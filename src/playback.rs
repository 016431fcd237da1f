use crate::config::{BehaviorConfig, HoverAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

impl PlayState {
    pub fn as_css(self) -> &'static str {
        match self {
            PlayState::Running => "running",
            PlayState::Paused => "paused",
        }
    }
}

/// Play/pause as a set of independent inputs. The state is derived, so an
/// automatic signal clearing never resumes past a manual pause or drag hold.
#[derive(Debug, Clone)]
pub struct Playback {
    started: bool,
    awaiting_view: bool,
    manual_pause: bool,
    drag_hold: bool,
    hovered: bool,
    hover_pauses: bool,
    in_view: bool,
    pause_when_invisible: bool,
    tab_visible: bool,
    animatable: bool,
}

impl Playback {
    pub fn new(behavior: &BehaviorConfig, reduced_motion_stop: bool) -> Self {
        Self {
            started: behavior.auto_start && !reduced_motion_stop,
            awaiting_view: behavior.start_when_visible,
            manual_pause: false,
            drag_hold: false,
            hovered: false,
            hover_pauses: behavior.hover == HoverAction::Pause,
            in_view: !behavior.start_when_visible,
            pause_when_invisible: behavior.pause_when_invisible,
            tab_visible: true,
            animatable: false,
        }
    }

    /// Pick up new behavior after a breakpoint change without losing runtime inputs.
    pub fn reconfigure(&mut self, behavior: &BehaviorConfig) {
        self.hover_pauses = behavior.hover == HoverAction::Pause;
        self.pause_when_invisible = behavior.pause_when_invisible;
    }

    pub fn state(&self) -> PlayState {
        let blocked = !self.animatable
            || !self.started
            || self.awaiting_view
            || self.manual_pause
            || self.drag_hold
            || !self.tab_visible
            || (self.hovered && self.hover_pauses)
            || (self.pause_when_invisible && !self.in_view);
        if blocked {
            PlayState::Paused
        } else {
            PlayState::Running
        }
    }

    pub fn play(&mut self) {
        self.manual_pause = false;
        self.started = true;
        self.awaiting_view = false;
    }

    pub fn pause(&mut self) {
        self.manual_pause = true;
    }

    pub fn is_manually_paused(&self) -> bool {
        self.manual_pause || self.drag_hold
    }

    pub fn begin_drag(&mut self) {
        self.drag_hold = true;
    }

    pub fn end_drag(&mut self) {
        self.drag_hold = false;
    }

    pub fn set_in_view(&mut self, in_view: bool) {
        self.in_view = in_view;
        if in_view {
            self.awaiting_view = false;
        }
    }

    pub fn set_tab_visible(&mut self, visible: bool) {
        self.tab_visible = visible;
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_animatable(&mut self, animatable: bool) {
        self.animatable = animatable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> Playback {
        let mut p = Playback::new(&BehaviorConfig::default(), false);
        p.set_animatable(true);
        p
    }

    #[test]
    fn autostart_runs_immediately() {
        assert_eq!(running().state(), PlayState::Running);
    }

    #[test]
    fn no_autostart_waits_for_play() {
        let behavior = BehaviorConfig { auto_start: false, ..Default::default() };
        let mut p = Playback::new(&behavior, false);
        p.set_animatable(true);
        assert_eq!(p.state(), PlayState::Paused);
        p.play();
        assert_eq!(p.state(), PlayState::Running);
    }

    #[test]
    fn reduced_motion_stop_blocks_autostart() {
        let mut p = Playback::new(&BehaviorConfig::default(), true);
        p.set_animatable(true);
        assert_eq!(p.state(), PlayState::Paused);
    }

    #[test]
    fn start_when_visible_waits_for_first_intersection() {
        let behavior = BehaviorConfig { start_when_visible: true, ..Default::default() };
        let mut p = Playback::new(&behavior, false);
        p.set_animatable(true);
        assert_eq!(p.state(), PlayState::Paused);
        p.set_in_view(true);
        assert_eq!(p.state(), PlayState::Running);
    }

    #[test]
    fn manual_pause_survives_visibility_regain() {
        let mut p = running();
        p.pause();
        p.set_in_view(false);
        p.set_in_view(true);
        p.set_tab_visible(false);
        p.set_tab_visible(true);
        assert_eq!(p.state(), PlayState::Paused);
        p.play();
        assert_eq!(p.state(), PlayState::Running);
    }

    #[test]
    fn hover_end_resumes_only_without_manual_pause() {
        let mut p = running();
        p.set_hovered(true);
        assert_eq!(p.state(), PlayState::Paused);
        p.set_hovered(false);
        assert_eq!(p.state(), PlayState::Running);

        p.pause();
        p.set_hovered(true);
        p.set_hovered(false);
        assert_eq!(p.state(), PlayState::Paused);
    }

    #[test]
    fn slow_hover_does_not_pause() {
        let behavior = BehaviorConfig { hover: HoverAction::Slow, ..Default::default() };
        let mut p = Playback::new(&behavior, false);
        p.set_animatable(true);
        p.set_hovered(true);
        assert_eq!(p.state(), PlayState::Running);
    }

    #[test]
    fn drag_hold_pauses_until_released() {
        let mut p = running();
        p.begin_drag();
        assert!(p.is_manually_paused());
        p.set_in_view(true);
        assert_eq!(p.state(), PlayState::Paused);
        p.end_drag();
        assert_eq!(p.state(), PlayState::Running);
    }

    #[test]
    fn invisibility_ignored_when_disabled() {
        let behavior = BehaviorConfig { pause_when_invisible: false, ..Default::default() };
        let mut p = Playback::new(&behavior, false);
        p.set_animatable(true);
        p.set_in_view(false);
        assert_eq!(p.state(), PlayState::Running);
    }

    #[test]
    fn centered_track_never_runs() {
        let mut p = running();
        p.set_animatable(false);
        p.play();
        assert_eq!(p.state(), PlayState::Paused);
    }
}

//! Track measurement and the style-variable contract the stylesheet consumes.

use std::time::Duration;

use crate::config::{Direction, MarqueeConfig};
use crate::host::Host;
use crate::track::cycle_width;

pub const VAR_GAP: &str = "--marquee-gap";
pub const VAR_ALIGN: &str = "--marquee-align";
pub const VAR_TEXT_DIRECTION: &str = "--marquee-text-direction";
pub const VAR_DIRECTION: &str = "--marquee-direction";
pub const VAR_EASING: &str = "--marquee-easing";
pub const VAR_ITERATIONS: &str = "--marquee-iterations";
pub const VAR_DELAY: &str = "--marquee-delay";
pub const VAR_DISTANCE: &str = "--marquee-distance";
pub const VAR_DURATION: &str = "--marquee-duration";
pub const VAR_RESUME_DELAY: &str = "--marquee-resume-delay";
pub const VAR_PLAY_STATE: &str = "--marquee-play-state";
pub const VAR_MASK_WIDTH: &str = "--marquee-mask-width";
pub const VAR_SCROLL_OFFSET: &str = "--marquee-scroll-offset";

pub const ALL_VARS: [&str; 13] = [
    VAR_GAP,
    VAR_ALIGN,
    VAR_TEXT_DIRECTION,
    VAR_DIRECTION,
    VAR_EASING,
    VAR_ITERATIONS,
    VAR_DELAY,
    VAR_DISTANCE,
    VAR_DURATION,
    VAR_RESUME_DELAY,
    VAR_PLAY_STATE,
    VAR_MASK_WIDTH,
    VAR_SCROLL_OFFSET,
];

/// Widths of the mounted canonical cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub widths: Vec<f32>,
    pub gap: f32,
    /// The loop period.
    pub track_width: f32,
}

pub fn measure<H: Host>(host: &H, gap: f32) -> Metrics {
    let widths = host.measure_mounted();
    let track_width = cycle_width(&widths, gap);
    Metrics { widths, gap, track_width }
}

/// `None` means the track does not move.
pub fn duration(track_width: f32, speed: f32) -> Option<Duration> {
    if track_width > 0.0 && speed > 0.0 {
        Some(Duration::from_secs_f32(track_width / speed))
    } else {
        None
    }
}

/// Negative timeline offset that reproduces `translation` in a running loop.
pub fn resume_delay(translation: f32, period: f32, duration: Duration, direction: Direction) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let travelled = (-translation).rem_euclid(period) / period;
    let timeline = match direction {
        Direction::Forward => travelled,
        Direction::Reverse => (1.0 - travelled) % 1.0,
    };
    -(timeline * duration.as_secs_f32())
}

/// Wrap a raw drag position into one loop period, `(-period, 0]`.
pub fn wrap_translation(translation: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return translation;
    }
    let wrapped = -((-translation).rem_euclid(period));
    if wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn px(value: f32) -> String {
    format!("{}px", round3(value))
}

pub fn secs(value: f32) -> String {
    format!("{}s", round3(value))
}

fn round3(value: f32) -> f32 {
    let r = (value * 1000.0).round() / 1000.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Publish everything that does not depend on the loop period.
pub fn publish_style<H: Host>(host: &mut H, config: &MarqueeConfig, direction: Direction, gap: f32) {
    let style = &config.style;
    host.set_var(VAR_GAP, px(gap));
    host.set_var(VAR_ALIGN, style.align.as_css().to_string());
    host.set_var(VAR_TEXT_DIRECTION, if style.rtl { "rtl" } else { "ltr" }.to_string());
    host.set_var(VAR_DIRECTION, direction.as_css().to_string());
    host.set_var(VAR_EASING, config.animation.easing.clone());
    host.set_var(VAR_ITERATIONS, config.animation.iterations.to_string());
    host.set_var(VAR_DELAY, format!("{}ms", config.animation.delay_ms));
    let mask = if style.fade_edges { host.resolve_length(style.fade_width).max(0.0) } else { 0.0 };
    host.set_var(VAR_MASK_WIDTH, px(mask));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_width_over_speed() {
        assert_eq!(duration(400.0, 100.0), Some(Duration::from_secs(4)));
        assert_eq!(duration(400.0, 0.0), None);
        assert_eq!(duration(0.0, 100.0), None);
    }

    #[test]
    fn resume_delay_tracks_loop_fraction() {
        let d = Duration::from_secs(4);
        assert!((resume_delay(-100.0, 400.0, d, Direction::Forward) + 1.0).abs() < 1e-5);
        assert!((resume_delay(-500.0, 400.0, d, Direction::Forward) + 1.0).abs() < 1e-5);
        assert!((resume_delay(-100.0, 400.0, d, Direction::Reverse) + 3.0).abs() < 1e-5);
        assert_eq!(resume_delay(0.0, 400.0, d, Direction::Reverse), 0.0);
    }

    #[test]
    fn positive_drag_wraps_back_into_period() {
        assert!((wrap_translation(30.0, 400.0) + 370.0).abs() < 1e-4);
        assert!((wrap_translation(-430.0, 400.0) + 30.0).abs() < 1e-4);
        assert_eq!(wrap_translation(-400.0, 400.0), 0.0);
        assert_eq!(wrap_translation(12.0, 0.0), 12.0);
    }

    #[test]
    fn formatting_rounds_noise() {
        assert_eq!(px(-399.99999), "-400px");
        assert_eq!(secs(4.0), "4s");
        assert_eq!(px(-0.0), "0px");
    }
}

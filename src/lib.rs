//! Seamless horizontal marquees: a canonical cycle of items followed by enough
//! presentation clones to loop without a visible seam.
//!
//! The engine is host-agnostic. A [`Host`] lays out, measures and animates the
//! track; [`terminal`] provides one that draws into a terminal line.

pub mod animation;
pub mod assets;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod measure;
pub mod playback;
pub mod terminal;
pub mod track;

pub use config::{MarqueeConfig, MarqueeOptions};
pub use engine::{Marquee, MarqueeEvent, MotionPhase};
pub use error::{MarqueeError, RenderError};
pub use host::{Host, Resolve, Signal, Subscription};
pub use playback::PlayState;
pub use terminal::{TextDocument, TextHost};
pub use track::Content;

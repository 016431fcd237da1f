pub mod momentum;
pub mod scroll_boost;
pub mod snap;

pub use momentum::{Momentum, VelocityTracker};
pub use scroll_boost::ScrollBoost;
pub use snap::Snap;

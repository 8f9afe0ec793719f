pub mod config;
pub mod error;
pub mod field;
pub mod layout;
pub mod math;
pub mod particle;
pub mod scheduler;
pub mod sprite;
pub mod visualizer;

pub use config::{DriftConfig, SampleRange};
pub use error::{DriftError, Result};
pub use field::{IconField, RenderedIcon, VisibilityChange};
pub use layout::GridLayout;
pub use math::{Offset, Velocity, percent_to_px, px_to_percent};
pub use particle::{Particle, Viewport};
pub use scheduler::{Animate, AnimationHandle, CancelToken, FrameScheduler};
pub use sprite::IconArt;
pub use visualizer::{draw_frame, run_visualizer};

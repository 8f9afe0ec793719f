use serde::{Deserialize, Serialize};

/// Position in percent of the viewport: `top` against height, `left` against width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    pub fn new(top: f64, left: f64) -> Self {
        Offset { top, left }
    }
}

/// Per-frame displacement in percent units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub dy: f64,
    pub dx: f64,
}

impl Velocity {
    pub fn new(dy: f64, dx: f64) -> Self {
        Velocity { dy, dx }
    }
}

/// Share of `extent` pixels covered by `size` pixels, in percent. A zero
/// extent counts as one pixel.
pub fn px_to_percent(size: f64, extent: u32) -> f64 {
    size / extent.max(1) as f64 * 100.0
}

/// Pixel coordinate of a percentage offset along `extent`.
pub fn percent_to_px(percent: f64, extent: usize) -> f64 {
    percent / 100.0 * extent as f64
}

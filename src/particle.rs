use rand::Rng;
use serde::Serialize;

use crate::config::DriftConfig;
use crate::layout::GridLayout;
use crate::math::{Offset, Velocity, px_to_percent};

/// Viewport size in pixels, captured once when a particle is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Zero-sized extents are bumped to one pixel.
    pub const fn new(width: u32, height: u32) -> Self {
        Viewport {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the width is below `breakpoint`, i.e. the icon layer is hidden.
    pub fn is_compact(&self, breakpoint: u32) -> bool {
        self.width < breakpoint
    }
}

/// One floating icon: a particle bouncing inside the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    index: usize,
    size: f64,
    position: Offset,
    velocity: Velocity,
    viewport: Viewport,
    frames: u64,
}

impl Particle {
    /// Seed particle `index` of `total` on the layout grid with a random size
    /// and drift velocity.
    pub fn initialize<R: Rng + ?Sized>(
        index: usize,
        total: usize,
        viewport: Viewport,
        config: &DriftConfig,
        rng: &mut R,
    ) -> Self {
        debug_assert!(index < total.max(1), "index {index} out of range for {total} icons");

        let size = rng.gen_range(config.size_range.min..config.size_range.max);
        let velocity = Velocity::new(
            rng.gen_range(config.velocity_range.min..config.velocity_range.max),
            rng.gen_range(config.velocity_range.min..config.velocity_range.max),
        );

        Particle {
            index,
            size,
            position: GridLayout::for_count(total).seed_position(index),
            velocity,
            viewport,
            frames: 0,
        }
    }

    /// Build a particle from explicit state. Used to replay known scenarios.
    pub fn from_parts(index: usize, size: f64, position: Offset, velocity: Velocity, viewport: Viewport) -> Self {
        Particle { index, size, position, velocity, viewport, frames: 0 }
    }

    /// Advance one animation frame.
    ///
    /// On contact with an edge the velocity component is negated and then added
    /// twice, so the particle both turns around and is pushed back inside in the
    /// same frame.
    pub fn step(&mut self) {
        self.position.top += self.velocity.dy;
        self.position.left += self.velocity.dx;

        let (height_pct, width_pct) = self.extent_percent();

        if self.position.top < 0.0 || self.position.top + height_pct > 100.0 {
            self.velocity.dy = -self.velocity.dy;
            self.position.top += self.velocity.dy * 2.0;
        }
        if self.position.left < 0.0 || self.position.left + width_pct > 100.0 {
            self.velocity.dx = -self.velocity.dx;
            self.position.left += self.velocity.dx * 2.0;
        }

        self.frames += 1;
    }

    /// Icon size as (height %, width %) of the captured viewport.
    pub fn extent_percent(&self) -> (f64, f64) {
        (
            px_to_percent(self.size, self.viewport.height),
            px_to_percent(self.size, self.viewport.width),
        )
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of frames stepped so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

use std::sync::{Arc, Mutex};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DriftConfig;
use crate::particle::{Particle, Viewport};
use crate::scheduler::{AnimationHandle, FrameScheduler};

/// What a resize did to the icon layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    /// Layer kept its current state; live particles keep their old viewport
    Unchanged,
    /// Viewport dropped below the breakpoint, all particles destroyed
    Hidden,
    /// Viewport grew past the breakpoint, particles created from scratch
    Shown,
}

/// Render output for one live icon.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedIcon {
    pub index: usize,
    pub src: String,
    /// Edge length in pixels
    pub size: f64,
    /// Percent of viewport height
    pub top: f64,
    /// Percent of viewport width
    pub left: f64,
}

struct MountedIcon {
    src: String,
    particle: Arc<Mutex<Particle>>,
    animation: Option<AnimationHandle>,
}

impl MountedIcon {
    fn teardown(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.cancel();
        }
    }
}

/// The floating icon layer: owns one particle per icon while mounted.
pub struct IconField {
    config: DriftConfig,
    viewport: Viewport,
    mounted: Vec<MountedIcon>,
}

impl IconField {
    pub fn new(config: DriftConfig, viewport: Viewport) -> Self {
        IconField { config, viewport, mounted: Vec::new() }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether the current viewport shows icons at all.
    pub fn is_visible(&self) -> bool {
        !self.viewport.is_compact(self.config.mobile_breakpoint)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// (Re)create every particle against the current viewport. Returns the
    /// number of live particles, zero when the viewport is compact.
    pub fn mount<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.unmount();
        if !self.is_visible() {
            debug!(width = self.viewport.width(), "viewport below breakpoint, icons hidden");
            return 0;
        }

        let total = self.config.icons.len();
        let viewport = self.viewport;
        self.mounted = self
            .config
            .icons
            .iter()
            .enumerate()
            .map(|(index, src)| MountedIcon {
                src: src.clone(),
                particle: Arc::new(Mutex::new(Particle::initialize(
                    index,
                    total,
                    viewport,
                    &self.config,
                    rng,
                ))),
                animation: None,
            })
            .collect();

        info!(
            icons = total,
            width = viewport.width(),
            height = viewport.height(),
            "mounted icon field"
        );
        total
    }

    /// Destroy all particles and stop their animation tasks.
    pub fn unmount(&mut self) {
        if self.mounted.is_empty() {
            return;
        }
        for icon in &mut self.mounted {
            icon.teardown();
        }
        debug!(icons = self.mounted.len(), "unmounted icon field");
        self.mounted.clear();
    }

    /// Record a new viewport.
    ///
    /// Only crossing the breakpoint touches the particles. Resizing within the
    /// same side leaves every live particle on the viewport it was created with.
    pub fn resize<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) -> VisibilityChange {
        let was_visible = self.is_visible();
        self.viewport = viewport;
        let visible = self.is_visible();

        let change = match (was_visible, visible) {
            (true, false) => {
                self.unmount();
                VisibilityChange::Hidden
            }
            (false, true) => {
                self.mount(rng);
                VisibilityChange::Shown
            }
            _ => VisibilityChange::Unchanged,
        };
        debug!(width = viewport.width(), height = viewport.height(), ?change, "viewport resized");
        change
    }

    /// Step every live particle by one frame.
    ///
    /// For manual frame driving; particles already handed to a scheduler are
    /// skipped so they never advance twice per frame.
    pub fn tick(&mut self) {
        for icon in self.mounted.iter().filter(|icon| icon.animation.is_none()) {
            if let Ok(mut particle) = icon.particle.lock() {
                particle.step();
            }
        }
    }

    /// Hand every live, not yet animated particle to `scheduler`.
    pub fn animate(&mut self, scheduler: &FrameScheduler) {
        for icon in self.mounted.iter_mut().filter(|icon| icon.animation.is_none()) {
            icon.animation = Some(scheduler.schedule(Arc::downgrade(&icon.particle)));
        }
    }

    pub fn is_animated(&self) -> bool {
        !self.mounted.is_empty() && self.mounted.iter().all(|icon| icon.animation.is_some())
    }

    /// Current render state of every live icon, in icon order.
    pub fn snapshot(&self) -> Vec<RenderedIcon> {
        self.mounted
            .iter()
            .filter_map(|icon| {
                let particle = icon.particle.lock().ok()?;
                let position = particle.position();
                Some(RenderedIcon {
                    index: particle.index(),
                    src: icon.src.clone(),
                    size: particle.size(),
                    top: position.top,
                    left: position.left,
                })
            })
            .collect()
    }

    /// Copy of each live particle's full state.
    pub fn particles(&self) -> Vec<Particle> {
        self.mounted
            .iter()
            .filter_map(|icon| icon.particle.lock().ok().map(|p| p.clone()))
            .collect()
    }
}

impl Drop for IconField {
    fn drop(&mut self) {
        self.unmount();
    }
}

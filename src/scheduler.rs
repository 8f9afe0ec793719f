//! Frame-driven scheduling for particle animation.
//!
//! Every animated value gets its own tokio task that ticks once per frame. The
//! task only holds a [`Weak`] handle to its target and checks a [`CancelToken`]
//! before each tick, so tearing down the owner stops all further updates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{trace, warn};

use crate::particle::Particle;

/// Something that moves forward by one frame at a time.
pub trait Animate: Send + 'static {
    fn advance(&mut self);
}

impl Animate for Particle {
    fn advance(&mut self) {
        self.step();
    }
}

/// Shared stop flag for one scheduled task.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Handle to a running per-frame task.
#[derive(Debug)]
pub struct AnimationHandle {
    token: CancelToken,
    join: Option<JoinHandle<()>>,
}

impl AnimationHandle {
    /// Stop the task. An `advance` already in progress completes; no new one
    /// starts once this returns.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|join| join.is_finished())
    }

    /// Wait for the task to exit. Returns immediately once it has been awaited.
    pub async fn finished(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };
        if let Err(e) = join.await {
            warn!(error = %e, "animation task failed");
        }
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns per-frame tasks on the tokio runtime that created it.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    runtime: Handle,
    period: Duration,
}

impl FrameScheduler {
    /// Must be called from inside a tokio runtime.
    pub fn new(frames_per_second: u32) -> Self {
        Self::with_handle(Handle::current(), frames_per_second)
    }

    pub fn with_handle(runtime: Handle, frames_per_second: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / frames_per_second.max(1) as f64);
        FrameScheduler { runtime, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance `target` once per frame until cancelled or dropped by its owner.
    pub fn schedule<T: Animate>(&self, target: Weak<Mutex<T>>) -> AnimationHandle {
        let token = CancelToken::new();
        let task_token = token.clone();
        let period = self.period;

        let join = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if task_token.is_cancelled() {
                    break;
                }
                let Some(live) = target.upgrade() else {
                    break;
                };
                if let Ok(mut value) = live.lock() {
                    // cancel() may have landed while this task waited on the lock
                    if task_token.is_cancelled() {
                        break;
                    }
                    value.advance();
                }
            }
            trace!("animation task stopped");
        });

        AnimationHandle { token, join: Some(join) }
    }
}

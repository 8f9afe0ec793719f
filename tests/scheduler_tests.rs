//! Frame scheduler behaviour on a paused tokio clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use icon_drift::{
    Animate, DriftConfig, FrameScheduler, IconField, Offset, Particle, Velocity, Viewport,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Default)]
struct Counter(u64);

impl Animate for Counter {
    fn advance(&mut self) {
        self.0 += 1;
    }
}

fn frames(scheduler: &FrameScheduler, n: u32) -> Duration {
    scheduler.period() * n
}

#[tokio::test(start_paused = true)]
async fn scheduled_target_advances_every_frame() {
    let scheduler = FrameScheduler::new(60);
    let counter = Arc::new(Mutex::new(Counter::default()));
    let _handle = scheduler.schedule(Arc::downgrade(&counter));

    tokio::time::sleep(frames(&scheduler, 10)).await;
    let ticks = counter.lock().unwrap().0;
    assert!((9..=12).contains(&ticks), "ticks = {ticks}");
}

#[tokio::test(start_paused = true)]
async fn cancelled_particle_never_moves_again() {
    let scheduler = FrameScheduler::new(60);
    let particle = Arc::new(Mutex::new(Particle::from_parts(
        0,
        50.0,
        Offset::new(40.0, 40.0),
        Velocity::new(-0.013, -0.014),
        Viewport::new(1280, 800),
    )));
    let mut handle = scheduler.schedule(Arc::downgrade(&particle));

    tokio::time::sleep(frames(&scheduler, 5)).await;
    handle.cancel();
    let frozen = particle.lock().unwrap().clone();
    assert!(frozen.frames() > 0);

    tokio::time::sleep(frames(&scheduler, 100)).await;
    assert_eq!(*particle.lock().unwrap(), frozen);

    handle.finished().await;
}

#[tokio::test(start_paused = true)]
async fn dropping_the_target_ends_the_task() {
    let scheduler = FrameScheduler::new(30);
    let counter = Arc::new(Mutex::new(Counter::default()));
    let handle = scheduler.schedule(Arc::downgrade(&counter));

    tokio::time::sleep(frames(&scheduler, 2)).await;
    drop(counter);
    tokio::time::sleep(frames(&scheduler, 3)).await;

    assert!(handle.is_finished());
    assert!(!handle.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn unmounting_a_field_stops_its_animations() {
    let scheduler = FrameScheduler::new(60);
    let mut field = IconField::new(DriftConfig::default(), Viewport::new(1440, 900));
    let mut rng = StdRng::seed_from_u64(11);

    field.mount(&mut rng);
    field.animate(&scheduler);
    assert!(field.is_animated());

    let start = field.particles();
    tokio::time::sleep(frames(&scheduler, 20)).await;
    let moved = field.particles();
    for (a, b) in start.iter().zip(&moved) {
        assert!(b.frames() > a.frames());
        assert_ne!(a.position(), b.position());
    }

    // manual ticks leave scheduled particles alone
    field.tick();
    let after_tick = field.particles();
    assert!(after_tick.iter().zip(&moved).all(|(a, b)| a.frames() == b.frames()));

    field.unmount();
    assert!(field.is_empty());
    assert!(!field.is_animated());
}

#[tokio::test(start_paused = true)]
async fn resize_across_breakpoint_needs_reanimation() {
    let scheduler = FrameScheduler::new(60);
    let mut field = IconField::new(DriftConfig::default(), Viewport::new(1280, 800));
    let mut rng = StdRng::seed_from_u64(5);

    field.mount(&mut rng);
    field.animate(&scheduler);

    field.resize(Viewport::new(400, 800), &mut rng);
    assert!(field.is_empty());

    field.resize(Viewport::new(1280, 800), &mut rng);
    assert!(!field.is_animated());
    field.animate(&scheduler);
    assert!(field.is_animated());

    tokio::time::sleep(frames(&scheduler, 3)).await;
    assert!(field.particles().iter().all(|p| p.frames() > 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancel_while_target_is_locked_skips_the_pending_tick() {
    let scheduler = FrameScheduler::new(120);
    let counter = Arc::new(Mutex::new(Counter::default()));
    let mut handle = scheduler.schedule(Arc::downgrade(&counter));

    tokio::time::sleep(Duration::from_millis(30)).await;
    let at_cancel = {
        let guard = counter.lock().unwrap();
        // the task reaches its next tick and blocks on the lock
        std::thread::sleep(scheduler.period() * 3);
        handle.cancel();
        guard.0
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(counter.lock().unwrap().0, at_cancel);

    handle.finished().await;
    assert!(handle.is_finished());
}

struct Faulty;

impl Animate for Faulty {
    fn advance(&mut self) {
        panic!("advance failed");
    }
}

#[tokio::test(start_paused = true)]
async fn finished_survives_a_panicking_task_and_repeat_calls() {
    let scheduler = FrameScheduler::new(60);
    let target = Arc::new(Mutex::new(Faulty));
    let mut handle = scheduler.schedule(Arc::downgrade(&target));

    handle.finished().await;
    assert!(handle.is_finished());

    // already joined: returns at once instead of polling a spent JoinHandle
    tokio::time::timeout(Duration::from_millis(1), handle.finished())
        .await
        .expect("second finished() should not wait");
}

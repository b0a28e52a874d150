//! Frame pacing.
//!
//! A [`FrameLoop`] calls a closure once per display refresh until
//! somebody asks it to stop through its [`Teardown`] handle. How long
//! a refresh takes is up to the [`RefreshScheduler`].

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use fps_clock::FpsClock;

/// Used when the display doesn't report a refresh rate.
pub const FALLBACK_FPS: u32 = 60;

pub trait RefreshScheduler {
    /// Blocks until the next frame is due.
    fn wait_next_frame(&mut self);
}

/// Fixed-rate scheduler on top of a sleeping clock.
pub struct TimerScheduler {
    clock: FpsClock,
    fps: u32,
}

impl TimerScheduler {
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);

        Self {
            clock: FpsClock::new(fps),
            fps,
        }
    }

    /// Rounds a refresh rate in millihertz to whole frames per second.
    pub fn from_milli_hz(milli_hz: u32) -> Self {
        Self::new(milli_hz.saturating_add(500) / 1000)
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_FPS)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl RefreshScheduler for TimerScheduler {
    fn wait_next_frame(&mut self) {
        self.clock.tick();
    }
}

/// Asks a running [`FrameLoop`] to stop. No frame is started after
/// the request is seen.
#[derive(Debug, Clone, Default)]
pub struct Teardown {
    requested: Arc<AtomicBool>,
}

impl Teardown {
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

pub struct FrameLoop<S> {
    scheduler: S,
    teardown: Teardown,
}

impl<S: RefreshScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            teardown: Teardown::default(),
        }
    }

    pub fn teardown(&self) -> Teardown {
        self.teardown.clone()
    }

    /// Runs `frame` once per refresh until teardown is requested.
    /// Returns the number of frames that ran.
    pub fn run<F: FnMut()>(&mut self, mut frame: F) -> u64 {
        let mut frames = 0;

        while !self.teardown.is_requested() {
            frame();
            frames += 1;

            if self.teardown.is_requested() {
                break;
            }

            self.scheduler.wait_next_frame();
        }

        tracing::debug!(frames, "frame loop finished");

        frames
    }
}

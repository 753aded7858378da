//! Time management utilities
//!
//! The [`FramePacer`] enforces a minimum wall-clock interval between frames
//! and clamps the reported delta time so a stall (debugger pause, slow load)
//! never turns into one huge simulation step.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Minimum interval between frames (~60 FPS)
pub const DEFAULT_MIN_FRAME: Duration = Duration::from_millis(16);

/// Upper bound on the delta time handed to the simulation, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.05;

/// Monotonic time source used by the pacer
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Block until `now()` reaches `deadline`
    fn wait_until(&mut self, deadline: Duration);
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wait_until(&mut self, deadline: Duration) {
        loop {
            let now = self.now();
            if now >= deadline {
                break;
            }
            let remaining = deadline - now;
            // Sleep granularity is coarse; spin for the last millisecond.
            if remaining > Duration::from_millis(2) {
                std::thread::sleep(remaining - Duration::from_millis(1));
            } else {
                std::hint::spin_loop();
            }
        }
    }
}

/// Manually driven clock for tests and deterministic replays.
///
/// Clones share the same time value, so a test can keep one handle and give
/// another to the pacer. Waiting jumps the clock straight to the deadline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Set the absolute time
    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn wait_until(&mut self, deadline: Duration) {
        if self.now.get() < deadline {
            self.now.set(deadline);
        }
    }
}

/// Fixed-cadence frame pacer with clamped delta time
pub struct FramePacer {
    clock: Box<dyn Clock>,
    min_frame: Duration,
    max_delta: f32,
    last_tick: Duration,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePacer {
    /// Create a pacer on the system clock with default limits
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock::new()))
    }

    /// Create a pacer on a custom clock with default limits
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        let last_tick = clock.now();
        Self {
            clock,
            min_frame: DEFAULT_MIN_FRAME,
            max_delta: DEFAULT_MAX_DELTA,
            last_tick,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Override the minimum frame interval and delta clamp.
    ///
    /// The clamp can be tightened but never raised above
    /// [`DEFAULT_MAX_DELTA`].
    pub fn with_limits(mut self, min_frame: Duration, max_delta: f32) -> Self {
        self.min_frame = min_frame;
        self.max_delta = max_delta.clamp(0.0, DEFAULT_MAX_DELTA);
        self
    }

    /// Restart timing from the current instant.
    ///
    /// Call once after loading so load time is not counted as a frame.
    pub fn reset(&mut self) {
        self.last_tick = self.clock.now();
    }

    /// Wait out the minimum frame interval and return the clamped delta time
    pub fn tick(&mut self) -> f32 {
        let deadline = self.last_tick + self.min_frame;
        self.clock.wait_until(deadline);

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_tick).as_secs_f32();
        self.delta_time = elapsed.min(self.max_delta);
        self.last_tick = now;

        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Delta time reported by the last tick, in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of all reported delta times
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Minimum frame interval
    pub fn min_frame(&self) -> Duration {
        self.min_frame
    }

    /// Delta time clamp, in seconds
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Average FPS over simulated time
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// FPS based on the last frame
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

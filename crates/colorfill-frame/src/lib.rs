//! Frame clock for the Colorfill client.
//!
//! The simulation advances once per rendered frame by the wall-clock time
//! since the previous frame. [`FrameClock`] paces those frames at a target
//! rate and reports the measured delta, clamped so a stalled process does
//! not hand the simulation one enormous step.
//!
//! # Idle mode
//!
//! With `rate_hz == 0`, or while paused, [`FrameClock::wait_for_frame`]
//! pends forever. This lets the clock sit in a `tokio::select!` loop while
//! no round is being played:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(event) = events.recv() => { /* lobby, level, messages */ }
//!         frame = clock.wait_for_frame() => {
//!             field.advance(frame.dt.as_secs_f64());
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the frame clock.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Target frames per second. 0 = idle (never fires).
    pub rate_hz: u32,
    /// Upper bound on the delta reported for one frame.
    pub max_delta: Duration,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            rate_hz: 60,
            max_delta: Duration::from_millis(250),
        }
    }
}

impl FrameConfig {
    /// Maximum supported frame rate.
    pub const MAX_RATE_HZ: u32 = 240;

    /// Create a config for a specific frame rate with default clamping.
    pub fn with_rate(rate_hz: u32) -> Self {
        Self {
            rate_hz,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// - `rate_hz` capped to [`Self::MAX_RATE_HZ`] (0 stays idle).
    /// - `max_delta` raised to at least one frame.
    pub fn validated(mut self) -> Self {
        if self.rate_hz > Self::MAX_RATE_HZ {
            warn!(
                rate = self.rate_hz,
                max = Self::MAX_RATE_HZ,
                "frame rate exceeds maximum, clamping"
            );
            self.rate_hz = Self::MAX_RATE_HZ;
        }
        if let Some(frame) = self.frame_duration() {
            self.max_delta = self.max_delta.max(frame);
        }
        self
    }

    /// Duration of one frame at the target rate; `None` when idle.
    pub fn frame_duration(&self) -> Option<Duration> {
        (self.rate_hz > 0).then(|| Duration::from_secs_f64(1.0 / self.rate_hz as f64))
    }
}

// ---------------------------------------------------------------------------
// Frame info
// ---------------------------------------------------------------------------

/// One frame, as returned by [`FrameClock::wait_for_frame`].
#[derive(Debug, Clone)]
pub struct FrameInfo {
    /// Monotonically increasing frame number (starts at 1).
    pub frame: u64,
    /// Time since the previous frame, clamped to `max_delta`.
    pub dt: Duration,
    /// `true` if the measured delta was clamped.
    pub clamped: bool,
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Paces simulation frames.
pub struct FrameClock {
    config: FrameConfig,
    frame_duration: Option<Duration>,
    frame_count: u64,
    next_frame: Option<Instant>,
    last_frame: Instant,
    paused: bool,
}

impl FrameClock {
    pub fn new(config: FrameConfig) -> Self {
        let config = config.validated();
        let frame_duration = config.frame_duration();
        let now = Instant::now();

        debug!(
            rate_hz = config.rate_hz,
            max_delta_ms = config.max_delta.as_secs_f64() * 1000.0,
            "frame clock created"
        );

        Self {
            next_frame: frame_duration.map(|d| now + d),
            config,
            frame_duration,
            frame_count: 0,
            last_frame: now,
            paused: false,
        }
    }

    /// Create a clock for a specific frame rate with default settings.
    pub fn with_rate(rate_hz: u32) -> Self {
        Self::new(FrameConfig::with_rate(rate_hz))
    }

    /// Wait until the next frame is due.
    ///
    /// Pends forever while idle or paused; `tokio::select!` will still
    /// service other branches.
    pub async fn wait_for_frame(&mut self) -> FrameInfo {
        let (next, frame_dur) = match (self.next_frame, self.frame_duration) {
            (Some(next), Some(dur)) if !self.paused => (next, dur),
            _ => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_frame);
        let clamped = elapsed > self.config.max_delta;
        let dt = elapsed.min(self.config.max_delta);
        if clamped {
            warn!(
                frame = self.frame_count + 1,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "frame delta clamped"
            );
        }

        self.frame_count += 1;
        self.last_frame = now;
        // Late frames are not caught up; the next one is a full frame away.
        self.next_frame = Some(now + frame_dur);

        trace!(frame = self.frame_count, dt_ms = dt.as_secs_f64() * 1000.0, "frame");

        FrameInfo {
            frame: self.frame_count,
            dt,
            clamped,
        }
    }

    /// Stop producing frames until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(frame = self.frame_count, "frame clock paused");
        }
    }

    /// Resume after a pause. The first frame after resuming reports one
    /// frame of delta, not the time spent paused.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            let now = Instant::now();
            self.last_frame = now;
            self.next_frame = self.frame_duration.map(|d| now + d);
            debug!(frame = self.frame_count, "frame clock resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_idle(&self) -> bool {
        self.frame_duration.is_none()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn rate_hz(&self) -> u32 {
        self.config.rate_hz
    }

    pub fn frame_duration(&self) -> Option<Duration> {
        self.frame_duration
    }
}

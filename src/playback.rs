//! Playback clock: advances route progress over wall-clock time.
//!
//! The clock holds no timer of its own. Whatever drives rendering calls
//! [`PlaybackState::tick`] once per frame with the seconds elapsed since the
//! previous frame, so playback speed does not depend on frame rate.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::polyline::clamp_progress;

/// Fraction of the route covered per second at 1x (~8.3 s end to end).
pub const BASE_RATE: f64 = 0.12;

pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 5.0;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    /// Progress moved forward and playback continues.
    Advanced,
    /// Progress reached the end and playback stopped.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPlaybackState")]
pub struct PlaybackState {
    is_playing: bool,
    progress: f64,
    speed: f64,
}

/// Wire form of [`PlaybackState`]; clamped on the way in.
#[derive(Deserialize)]
struct RawPlaybackState {
    #[serde(default)]
    is_playing: bool,
    #[serde(default)]
    progress: f64,
    #[serde(default = "default_speed")]
    speed: f64,
}

fn default_speed() -> f64 {
    1.0
}

impl From<RawPlaybackState> for PlaybackState {
    fn from(raw: RawPlaybackState) -> Self {
        Self {
            is_playing: raw.is_playing,
            progress: clamp_progress(raw.progress),
            speed: clamp_speed(raw.speed),
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            progress: 0.0,
            speed: default_speed(),
        }
    }
}

fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        default_speed()
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

impl PlaybackState {
    pub fn new(speed: f64) -> Self {
        Self {
            speed: clamp_speed(speed),
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Start or resume. A completed run restarts from the beginning.
    pub fn play(&mut self) {
        if self.progress >= 1.0 {
            self.progress = 0.0;
        }
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Stop and rewind to the start.
    pub fn reset(&mut self) {
        self.is_playing = false;
        self.progress = 0.0;
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = clamp_speed(speed);
    }

    /// Jump to progress `t`, e.g. while scrubbing. Does not change play state.
    pub fn seek(&mut self, t: f64) {
        self.progress = clamp_progress(t);
    }

    pub fn tick(&mut self, dt_secs: f64) -> TickOutcome {
        self.tick_at_rate(dt_secs, BASE_RATE)
    }

    /// Advance by `dt_secs` at `base_rate` progress per second at 1x.
    pub fn tick_at_rate(&mut self, dt_secs: f64, base_rate: f64) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Idle;
        }

        let dt = if dt_secs.is_finite() {
            dt_secs.max(0.0)
        } else {
            0.0
        };
        let next = self.progress + dt * self.speed * base_rate.max(0.0);

        if next >= 1.0 {
            self.progress = 1.0;
            self.is_playing = false;
            return TickOutcome::Completed;
        }

        self.progress = next;
        TickOutcome::Advanced
    }
}

/// Turns per-frame timestamps into elapsed seconds.
///
/// The first frame after construction or [`clear`](Self::clear) reports 0, so
/// time spent paused never counts toward progress.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame.
    pub fn frame(&mut self, now: Instant) -> f64 {
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

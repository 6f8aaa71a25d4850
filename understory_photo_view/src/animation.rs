// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time‑stepped zoom and fling animations.
//!
//! The driver owns at most one run. Starting a run cancels the previous one
//! immediately. The host advances the run by calling
//! [`AnimationDriver::step`] once per frame with a monotonic timestamp; the
//! first step latches the start time, so starting a run needs no clock.

use kurbo::{Point, Vec2};

use crate::bounds::ScaleBoundsPolicy;
use crate::transform::{MatrixChange, TransformState};

/// Default duration of programmatic and double‑tap zoom transitions.
pub const DEFAULT_ZOOM_DURATION_MS: u64 = 200;

/// Default fling deceleration, in pixels per second squared.
pub const DEFAULT_FLING_DECELERATION: f64 = 2000.0;

/// A fling whose remaining speed drops below this (px/s) is finished.
const FLING_STOP_VELOCITY: f64 = 1.0;

/// Result of advancing the driver by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// No run is active.
    Idle,
    /// The run advanced and continues.
    Running(Option<MatrixChange>),
    /// The run advanced to its end and was cleared.
    Finished(Option<MatrixChange>),
}

impl StepOutcome {
    /// The matrix change produced by this step, if any.
    #[must_use]
    pub fn change(self) -> Option<MatrixChange> {
        match self {
            Self::Idle => None,
            Self::Running(change) | Self::Finished(change) => change,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ZoomRun {
    from: f64,
    to: f64,
    focus: Point,
    duration_ms: u64,
    start: Option<u64>,
}

#[derive(Clone, Copy, Debug)]
struct FlingRun {
    direction: Vec2,
    speed: f64,
    deceleration: f64,
    duration_ms: u64,
    range_min: Vec2,
    range_max: Vec2,
    travelled: Vec2,
    start: Option<u64>,
}

#[derive(Clone, Copy, Debug)]
enum Run {
    Zoom(ZoomRun),
    Fling(FlingRun),
}

/// Drives zoom transitions and fling deceleration.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    active: Option<Run>,
    zoom_duration_ms: u64,
    fling_deceleration: f64,
}

impl AnimationDriver {
    /// Creates an idle driver with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: None,
            zoom_duration_ms: DEFAULT_ZOOM_DURATION_MS,
            fling_deceleration: DEFAULT_FLING_DECELERATION,
        }
    }

    /// Whether a run is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the active run is a fling.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        matches!(self.active, Some(Run::Fling(_)))
    }

    /// Duration used by [`start_zoom`](Self::start_zoom).
    #[must_use]
    pub fn zoom_duration_ms(&self) -> u64 {
        self.zoom_duration_ms
    }

    /// Sets the zoom transition duration. Zero makes zooms complete on the first step.
    pub fn set_zoom_duration_ms(&mut self, duration_ms: u64) {
        self.zoom_duration_ms = duration_ms;
    }

    /// Fling deceleration in pixels per second squared.
    #[must_use]
    pub fn fling_deceleration(&self) -> f64 {
        self.fling_deceleration
    }

    /// Sets the fling deceleration; non‑positive values restore the default.
    pub fn set_fling_deceleration(&mut self, deceleration: f64) {
        self.fling_deceleration = if deceleration.is_finite() && deceleration > 0.0 {
            deceleration
        } else {
            DEFAULT_FLING_DECELERATION
        };
    }

    /// Stops the active run, if any, leaving the transform where it is.
    pub fn cancel(&mut self) {
        #[cfg(feature = "tracing")]
        if self.active.is_some() {
            tracing::debug!("animation cancelled");
        }
        self.active = None;
    }

    /// Starts a zoom from `from` to `to` about `focus`, replacing any active run.
    pub fn start_zoom(&mut self, from: f64, to: f64, focus: Point) {
        #[cfg(feature = "tracing")]
        tracing::debug!(from, to, "zoom animation started");
        self.active = Some(Run::Zoom(ZoomRun {
            from,
            to,
            focus,
            duration_ms: self.zoom_duration_ms,
            start: None,
        }));
    }

    /// Starts a fling at `velocity` (px/s), replacing any active run.
    ///
    /// The reachable translation range is fixed here from the current display
    /// rect, so every later step stays inside the clamped bounds. Returns
    /// `false` (and leaves the driver idle) when there is nothing to fling.
    pub fn start_fling(
        &mut self,
        velocity: Vec2,
        state: &TransformState,
        policy: &ScaleBoundsPolicy,
    ) -> bool {
        self.active = None;
        let Some(display) = state.display_rect() else {
            return false;
        };
        let speed = velocity.hypot();
        if !speed.is_finite() || speed < FLING_STOP_VELOCITY {
            return false;
        }
        let (range_min, range_max) =
            policy.translation_range(display, state.viewport().to_rect());
        if range_min == Vec2::ZERO && range_max == Vec2::ZERO {
            return false;
        }
        let deceleration = self.fling_deceleration;
        let duration_s = speed / deceleration;
        #[cfg(feature = "tracing")]
        tracing::debug!(speed, duration_s, "fling started");
        #[expect(
            clippy::cast_possible_truncation,
            reason = "fling durations are a few seconds at most"
        )]
        let duration_ms = (duration_s * 1000.0) as u64;
        self.active = Some(Run::Fling(FlingRun {
            direction: velocity / speed,
            speed,
            deceleration,
            duration_ms,
            range_min,
            range_max,
            travelled: Vec2::ZERO,
            start: None,
        }));
        true
    }

    /// Advances the active run to `now_ms` and applies it to `state`.
    pub fn step(
        &mut self,
        now_ms: u64,
        state: &mut TransformState,
        policy: &ScaleBoundsPolicy,
    ) -> StepOutcome {
        let Some(run) = self.active.as_mut() else {
            return StepOutcome::Idle;
        };
        let (change, done) = match run {
            Run::Zoom(zoom) => {
                let start = *zoom.start.get_or_insert(now_ms);
                let t = progress(now_ms - start.min(now_ms), zoom.duration_ms);
                let scale = zoom.from + (zoom.to - zoom.from) * ease(t);
                (state.set_scale(scale, zoom.focus, policy), t >= 1.0)
            }
            Run::Fling(fling) => {
                let start = *fling.start.get_or_insert(now_ms);
                let elapsed_ms = (now_ms - start.min(now_ms)).min(fling.duration_ms);
                let t = elapsed_ms as f64 / 1000.0;
                let distance = fling.speed * t - 0.5 * fling.deceleration * t * t;
                let offset = fling.direction * distance;
                let offset = Vec2::new(
                    offset.x.clamp(fling.range_min.x, fling.range_max.x),
                    offset.y.clamp(fling.range_min.y, fling.range_max.y),
                );
                let delta = offset - fling.travelled;
                fling.travelled = offset;
                let remaining = fling.speed - fling.deceleration * t;
                let done = elapsed_ms >= fling.duration_ms || remaining < FLING_STOP_VELOCITY;
                let change = if delta == Vec2::ZERO {
                    None
                } else {
                    state.translate(delta, policy)
                };
                (change, done)
            }
        };
        if done {
            #[cfg(feature = "tracing")]
            tracing::debug!("animation finished");
            self.active = None;
            StepOutcome::Finished(change)
        } else {
            StepOutcome::Running(change)
        }
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn progress(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    (elapsed_ms as f64 / duration_ms as f64).min(1.0)
}

/// Accelerate‑decelerate easing (smoothstep).
fn ease(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{AnimationDriver, StepOutcome, ease};
    use crate::bounds::ScaleBoundsPolicy;
    use crate::transform::TransformState;

    fn ready(image: Size) -> (TransformState, ScaleBoundsPolicy) {
        let mut policy = ScaleBoundsPolicy::default();
        let mut state = TransformState::new();
        state.set_viewport(Size::new(1000.0, 1000.0));
        state.set_image(Some(image));
        state.reset(&mut policy);
        (state, policy)
    }

    #[test]
    fn easing_is_monotonic_with_fixed_ends() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=10 {
            let v = ease(f64::from(i) / 10.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn zoom_reaches_target_after_duration() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0));
        let mut driver = AnimationDriver::new();
        driver.start_zoom(1.0, 3.0, Point::new(500.0, 500.0));
        assert!(matches!(
            driver.step(1000, &mut state, &policy),
            StepOutcome::Running(None)
        ));
        assert!(matches!(
            driver.step(1100, &mut state, &policy),
            StepOutcome::Running(Some(_))
        ));
        let mid = state.current_scale(&policy);
        assert!(mid > 1.0 && mid < 3.0);
        assert!(matches!(
            driver.step(1200, &mut state, &policy),
            StepOutcome::Finished(Some(_))
        ));
        assert!((state.current_scale(&policy) - 3.0).abs() < 1e-9);
        assert!(!driver.is_active());
        assert_eq!(driver.step(1300, &mut state, &policy), StepOutcome::Idle);
    }

    #[test]
    fn zero_duration_completes_on_first_step() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0));
        let mut driver = AnimationDriver::new();
        driver.set_zoom_duration_ms(0);
        driver.start_zoom(1.0, 2.0, Point::new(0.0, 0.0));
        assert!(matches!(
            driver.step(5, &mut state, &policy),
            StepOutcome::Finished(Some(_))
        ));
    }

    #[test]
    fn new_run_replaces_previous() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0));
        let mut driver = AnimationDriver::new();
        driver.start_zoom(1.0, 3.0, Point::new(500.0, 500.0));
        driver.step(0, &mut state, &policy);
        driver.start_zoom(state.current_scale(&policy), 1.0, Point::new(500.0, 500.0));
        driver.step(10, &mut state, &policy);
        driver.step(210, &mut state, &policy);
        assert!((state.current_scale(&policy) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn fling_without_room_does_not_start() {
        let (state, policy) = ready(Size::new(1000.0, 1000.0));
        let mut driver = AnimationDriver::new();
        assert!(!driver.start_fling(Vec2::new(3000.0, 0.0), &state, &policy));
        assert!(!driver.is_active());
    }

    #[test]
    fn fling_decelerates_and_stops_inside_bounds() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0));
        state.set_scale(3.0, Point::new(500.0, 500.0), &policy);
        let mut driver = AnimationDriver::new();
        assert!(driver.start_fling(Vec2::new(-4000.0, 0.0), &state, &policy));

        let mut now = 0;
        let mut last_x = state.display_rect().unwrap().x0;
        let mut last_step = f64::INFINITY;
        loop {
            let outcome = driver.step(now, &mut state, &policy);
            let rect = state.display_rect().unwrap();
            assert!(rect.x0 <= 1e-9 && rect.x1 >= 1000.0 - 1e-9);
            let moved = last_x - rect.x0;
            assert!(moved >= 0.0 && moved <= last_step + 1e-9);
            if now > 0 {
                last_step = moved;
            }
            last_x = rect.x0;
            if matches!(outcome, StepOutcome::Finished(_)) {
                break;
            }
            now += 16;
            assert!(now <= 2_016, "fling did not finish within its envelope");
        }
        assert!((state.display_rect().unwrap().x1 - 1000.0).abs() < 1e-6);
    }
}

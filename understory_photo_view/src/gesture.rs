// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture interpreter: classify raw pointer events into drag, pinch, fling,
//! tap, double tap, and long press intents.
//!
//! ## Usage
//!
//! 1) Feed every pointer event to [`GestureInterpreter::handle`] and act on the
//!    returned [`GestureIntent`]s.
//! 2) While [`GestureInterpreter::needs_poll`] is `true`, call
//!    [`GestureInterpreter::poll`] on each frame. Single‑tap confirmation and
//!    long press depend on time passing without further input.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_photo_view::gesture::{GestureIntent, GestureInterpreter, PointerEvent};
//!
//! let mut gestures = GestureInterpreter::default();
//!
//! gestures.handle(PointerEvent::down(0, Point::new(100.0, 100.0), 0));
//! let intents = gestures.handle(PointerEvent::moved(0, Point::new(130.0, 100.0), 16));
//! assert!(matches!(intents[0], GestureIntent::Drag { .. }));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Identifier of a pointer (finger, pen, mouse button) within a touch sequence.
pub type PointerId = u32;

/// Phase of a raw pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// A pointer touched down.
    Down,
    /// A tracked pointer moved.
    Move,
    /// A tracked pointer lifted.
    Up,
    /// The host cancelled the whole touch sequence.
    Cancel,
}

/// A raw pointer event in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer this event belongs to.
    pub id: PointerId,
    /// Phase of the event.
    pub kind: PointerKind,
    /// Position in viewport coordinates.
    pub position: Point,
    /// Timestamp in milliseconds on the host's monotonic clock.
    pub time_ms: u64,
}

impl PointerEvent {
    /// A pointer‑down event.
    #[must_use]
    pub fn down(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self {
            id,
            kind: PointerKind::Down,
            position,
            time_ms,
        }
    }

    /// A pointer‑move event.
    #[must_use]
    pub fn moved(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self {
            id,
            kind: PointerKind::Move,
            position,
            time_ms,
        }
    }

    /// A pointer‑up event.
    #[must_use]
    pub fn up(id: PointerId, position: Point, time_ms: u64) -> Self {
        Self {
            id,
            kind: PointerKind::Up,
            position,
            time_ms,
        }
    }

    /// A cancel event; `id` and `position` are ignored.
    #[must_use]
    pub fn cancel(time_ms: u64) -> Self {
        Self {
            id: 0,
            kind: PointerKind::Cancel,
            position: Point::ORIGIN,
            time_ms,
        }
    }
}

/// Thresholds used to classify gestures.
///
/// Distances are in viewport pixels, durations in milliseconds, velocities in
/// pixels per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Movement below this distance keeps a press eligible for tapping.
    pub touch_slop: f64,
    /// Maximum delay between the first tap's release and the second press.
    pub double_tap_timeout_ms: u64,
    /// Maximum distance between the two presses of a double tap.
    pub double_tap_slop: f64,
    /// Press duration after which a still pointer is a long press.
    pub long_press_timeout_ms: u64,
    /// Release speed below which a drag does not fling.
    pub min_fling_velocity: f64,
    /// Release speed is capped to this value.
    pub max_fling_velocity: f64,
    /// Largest per‑event pinch factor; its reciprocal is the smallest.
    pub max_scale_step: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_timeout_ms: 300,
            double_tap_slop: 100.0,
            long_press_timeout_ms: 500,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            max_scale_step: 1.5,
        }
    }
}

/// What a pointer event (or the passage of time) means.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureIntent {
    /// A new touch sequence started; running animations should stop.
    Begin,
    /// Move the image by `delta`.
    Drag {
        /// Movement since the previous drag event.
        delta: Vec2,
    },
    /// Scale the image by `factor` about `focus`.
    Scale {
        /// Ratio of the current to the previous inter‑pointer distance.
        factor: f64,
        /// Midpoint between the two pointers.
        focus: Point,
    },
    /// The last pointer lifted while moving fast enough to fling.
    Fling {
        /// Release velocity in pixels per second.
        velocity: Vec2,
    },
    /// A tap that was not followed by a second one in time.
    SingleTapConfirmed {
        /// Tap position.
        position: Point,
    },
    /// The second press of a double tap.
    DoubleTap {
        /// Position of the first tap.
        position: Point,
    },
    /// A press or release belonging to the second tap of a double tap.
    DoubleTapEvent {
        /// Event position.
        position: Point,
    },
    /// A press held still past the long‑press timeout.
    LongPress {
        /// Press position.
        position: Point,
    },
    /// The sequence was cancelled; no drag or fling follows.
    Cancelled,
}

/// Intents produced by a single input.
pub type Intents = SmallVec<[GestureIntent; 3]>;

/// Interpretation phase of the current touch sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No pointer is down.
    #[default]
    Idle,
    /// One pointer is down and has not moved past the touch slop.
    Pressed,
    /// One pointer is dragging.
    Dragging,
    /// Two or more pointers are pinching.
    Scaling,
}

const VELOCITY_WINDOW_MS: u64 = 100;

#[derive(Clone, Debug)]
struct GestureSession {
    pointers: SmallVec<[(PointerId, Point); 2]>,
    phase: GesturePhase,
    down_pos: Point,
    down_time: u64,
    last_pos: Point,
    last_span: f64,
    samples: SmallVec<[(u64, Point); 8]>,
    tap_eligible: bool,
    second_tap: bool,
}

impl GestureSession {
    fn new(id: PointerId, pos: Point, time: u64) -> Self {
        let mut samples = SmallVec::new();
        samples.push((time, pos));
        Self {
            pointers: smallvec::smallvec![(id, pos)],
            phase: GesturePhase::Pressed,
            down_pos: pos,
            down_time: time,
            last_pos: pos,
            last_span: 0.0,
            samples,
            tap_eligible: true,
            second_tap: false,
        }
    }

    fn position_of(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|(p, _)| *p == id)
    }

    /// Span and midpoint of the first two pointers.
    fn pinch(&self) -> Option<(f64, Point)> {
        match self.pointers.as_slice() {
            [(_, a), (_, b), ..] => Some(((*b - *a).hypot(), a.midpoint(*b))),
            _ => None,
        }
    }

    fn record(&mut self, time: u64, pos: Point) {
        self.samples.retain(|(t, _)| time.saturating_sub(*t) <= VELOCITY_WINDOW_MS);
        if self.samples.len() == self.samples.inline_size() {
            self.samples.remove(0);
        }
        self.samples.push((time, pos));
    }

    fn velocity(&self) -> Vec2 {
        match (self.samples.first(), self.samples.last()) {
            (Some((t0, p0)), Some((t1, p1))) if t1 > t0 => {
                (*p1 - *p0) * (1000.0 / (t1 - t0) as f64)
            }
            _ => Vec2::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingTap {
    position: Point,
    up_time: u64,
}

/// Pointer‑event state machine.
///
/// `Idle → Pressed → Dragging | Scaling → Idle`. Only the first two pointers
/// take part in a pinch; further pointers are tracked but otherwise ignored.
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    session: Option<GestureSession>,
    pending_tap: Option<PendingTap>,
    long_press_fired: bool,
    zoomable: bool,
}

impl GestureInterpreter {
    /// Creates an interpreter with the given thresholds.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            pending_tap: None,
            long_press_fired: false,
            zoomable: true,
        }
    }

    /// Current thresholds.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Replaces the thresholds; takes effect from the next event.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Whether drag, pinch, and fling intents are produced.
    #[must_use]
    pub fn is_zoomable(&self) -> bool {
        self.zoomable
    }

    /// When `false`, only tap‑family intents pass through.
    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.zoomable = zoomable;
    }

    /// Phase of the current touch sequence.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.session.as_ref().map_or(GesturePhase::Idle, |s| s.phase)
    }

    /// Whether a touch sequence is in progress.
    #[must_use]
    pub fn in_gesture(&self) -> bool {
        self.session.is_some()
    }

    /// Whether [`poll`](Self::poll) may still produce an intent.
    #[must_use]
    pub fn needs_poll(&self) -> bool {
        self.pending_tap.is_some()
            || self
                .session
                .as_ref()
                .is_some_and(|s| s.phase == GesturePhase::Pressed && s.tap_eligible)
    }

    /// Produces time‑based intents: single‑tap confirmation and long press.
    pub fn poll(&mut self, now_ms: u64) -> Intents {
        let mut out = Intents::new();
        if let Some(tap) = self.pending_tap {
            if now_ms.saturating_sub(tap.up_time) > self.config.double_tap_timeout_ms {
                self.pending_tap = None;
                out.push(GestureIntent::SingleTapConfirmed {
                    position: tap.position,
                });
            }
        }
        if let Some(session) = self.session.as_mut() {
            if session.phase == GesturePhase::Pressed
                && session.tap_eligible
                && !session.second_tap
                && now_ms.saturating_sub(session.down_time) >= self.config.long_press_timeout_ms
            {
                session.tap_eligible = false;
                self.long_press_fired = true;
                out.push(GestureIntent::LongPress {
                    position: session.down_pos,
                });
            }
        }
        out
    }

    /// Interprets one pointer event.
    pub fn handle(&mut self, event: PointerEvent) -> Intents {
        let mut out = match event.kind {
            PointerKind::Down => self.on_down(event),
            PointerKind::Move => self.on_move(event),
            PointerKind::Up => self.on_up(event),
            PointerKind::Cancel => self.on_cancel(),
        };
        if !self.zoomable {
            out.retain(|intent| {
                !matches!(
                    intent,
                    GestureIntent::Drag { .. }
                        | GestureIntent::Scale { .. }
                        | GestureIntent::Fling { .. }
                )
            });
        }
        out
    }

    fn on_down(&mut self, event: PointerEvent) -> Intents {
        let mut out = Intents::new();
        let PointerEvent {
            id,
            position,
            time_ms,
            ..
        } = event;

        if let Some(session) = self.session.as_mut() {
            if session.position_of(id).is_some() {
                return out;
            }
            session.pointers.push((id, position));
            session.tap_eligible = false;
            if session.pointers.len() == 2 {
                session.phase = GesturePhase::Scaling;
                if let Some((span, _)) = session.pinch() {
                    session.last_span = span;
                }
                #[cfg(feature = "tracing")]
                tracing::trace!("gesture: scaling");
            }
            return out;
        }

        out.push(GestureIntent::Begin);
        let mut session = GestureSession::new(id, position, time_ms);
        self.long_press_fired = false;
        if let Some(tap) = self.pending_tap.take() {
            let near = (position - tap.position).hypot() <= self.config.double_tap_slop;
            let in_time =
                time_ms.saturating_sub(tap.up_time) <= self.config.double_tap_timeout_ms;
            if near && in_time {
                session.second_tap = true;
                out.push(GestureIntent::DoubleTap {
                    position: tap.position,
                });
                out.push(GestureIntent::DoubleTapEvent { position });
            } else {
                out.push(GestureIntent::SingleTapConfirmed {
                    position: tap.position,
                });
            }
        }
        self.session = Some(session);
        out
    }

    fn on_move(&mut self, event: PointerEvent) -> Intents {
        let mut out = Intents::new();
        let slop = self.config.touch_slop;
        let step = self.config.max_scale_step.max(1.0);
        let Some(session) = self.session.as_mut() else {
            return out;
        };
        let Some(index) = session.position_of(event.id) else {
            return out;
        };
        session.pointers[index].1 = event.position;

        match session.phase {
            GesturePhase::Idle => {}
            GesturePhase::Pressed => {
                session.record(event.time_ms, event.position);
                if (event.position - session.down_pos).hypot() > slop {
                    session.phase = GesturePhase::Dragging;
                    session.tap_eligible = false;
                    #[cfg(feature = "tracing")]
                    tracing::trace!("gesture: dragging");
                    out.push(GestureIntent::Drag {
                        delta: event.position - session.last_pos,
                    });
                    session.last_pos = event.position;
                }
            }
            GesturePhase::Dragging => {
                session.record(event.time_ms, event.position);
                out.push(GestureIntent::Drag {
                    delta: event.position - session.last_pos,
                });
                session.last_pos = event.position;
            }
            GesturePhase::Scaling => {
                if let Some((span, focus)) = session.pinch() {
                    if session.last_span > 0.0 && span > 0.0 {
                        let factor = (span / session.last_span).clamp(1.0 / step, step);
                        out.push(GestureIntent::Scale { factor, focus });
                    }
                    session.last_span = span;
                }
            }
        }
        out
    }

    fn on_up(&mut self, event: PointerEvent) -> Intents {
        let mut out = Intents::new();
        let Some(session) = self.session.as_mut() else {
            return out;
        };
        let Some(index) = session.position_of(event.id) else {
            return out;
        };
        if session.phase == GesturePhase::Dragging {
            session.record(event.time_ms, event.position);
        }
        session.pointers.remove(index);

        if !session.pointers.is_empty() {
            match session.pointers.len() {
                1 => {
                    // Continue as a drag with the remaining pointer.
                    let remaining = session.pointers[0].1;
                    session.phase = GesturePhase::Dragging;
                    session.last_pos = remaining;
                    session.samples.clear();
                    session.samples.push((event.time_ms, remaining));
                }
                _ => {
                    if let Some((span, _)) = session.pinch() {
                        session.last_span = span;
                    }
                }
            }
            return out;
        }

        let Some(session) = self.session.take() else {
            return out;
        };
        match session.phase {
            GesturePhase::Dragging => {
                let velocity = session.velocity();
                let speed = velocity.hypot();
                if speed >= self.config.min_fling_velocity {
                    let capped = if speed > self.config.max_fling_velocity {
                        velocity * (self.config.max_fling_velocity / speed)
                    } else {
                        velocity
                    };
                    out.push(GestureIntent::Fling { velocity: capped });
                }
            }
            GesturePhase::Pressed if session.tap_eligible && !self.long_press_fired => {
                if session.second_tap {
                    out.push(GestureIntent::DoubleTapEvent {
                        position: event.position,
                    });
                } else {
                    self.pending_tap = Some(PendingTap {
                        position: session.down_pos,
                        up_time: event.time_ms,
                    });
                }
            }
            _ => {}
        }
        out
    }

    fn on_cancel(&mut self) -> Intents {
        let mut out = Intents::new();
        self.pending_tap = None;
        self.long_press_fired = false;
        if self.session.take().is_some() {
            #[cfg(feature = "tracing")]
            tracing::trace!("gesture: cancelled");
            out.push(GestureIntent::Cancelled);
        }
        out
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

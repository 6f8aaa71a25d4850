// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener hub: one observer slot per event kind, with optional binding to a
//! peer hub.
//!
//! ## Binding
//!
//! [`ListenerHub::bind`] snapshots the peer's listeners at bind time. Later
//! dispatches call the local listener first and then the peer's, each one
//! independently of whether the other is set. The peer's listeners are held
//! through [`Weak`] references: binding never keeps them alive, and a peer
//! listener that has since been dropped is skipped.
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_photo_view::listeners::{listener, EventKind, ListenerHub, PhotoEvent};
//!
//! let calls = Rc::new(Cell::new(0));
//! let mut a = ListenerHub::new();
//! let mut b = ListenerHub::new();
//! let c = calls.clone();
//! b.set(EventKind::OutsidePhotoTap, Some(listener(move |_| { c.set(c.get() + 1); true })));
//!
//! a.bind(&b);
//! assert!(a.dispatch(&PhotoEvent::OutsidePhotoTap));
//! assert_eq!(calls.get(), 1);
//! ```

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use kurbo::{Point, Rect, Vec2};

/// Kinds of events a [`ListenerHub`] fans out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The rendered matrix changed.
    MatrixChanged,
    /// A confirmed single tap landed on the image.
    PhotoTap,
    /// A confirmed single tap landed outside the image.
    OutsidePhotoTap,
    /// A confirmed single tap landed anywhere in the view.
    ViewTap,
    /// A pinch changed the scale.
    ScaleChanged,
    /// A drag was released fast enough to fling.
    SingleFling,
    /// A drag moved the view.
    ViewDrag,
    /// A press was held past the long‑press timeout.
    LongClick,
    /// A confirmed single tap, before the tap‑position events.
    Click,
    /// Raw single‑tap confirmation (double‑tap family).
    SingleTapConfirmed,
    /// The second press of a double tap (double‑tap family).
    DoubleTap,
    /// An event inside the second tap of a double tap (double‑tap family).
    DoubleTapEvent,
}

impl EventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 12;

    /// All event kinds, in slot order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::MatrixChanged,
        Self::PhotoTap,
        Self::OutsidePhotoTap,
        Self::ViewTap,
        Self::ScaleChanged,
        Self::SingleFling,
        Self::ViewDrag,
        Self::LongClick,
        Self::Click,
        Self::SingleTapConfirmed,
        Self::DoubleTap,
        Self::DoubleTapEvent,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// An event delivered to listeners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhotoEvent {
    /// See [`EventKind::MatrixChanged`].
    MatrixChanged {
        /// Display rect after the change; `None` without an image.
        display_rect: Option<Rect>,
    },
    /// See [`EventKind::PhotoTap`]. Coordinates are relative to the display
    /// rect, in `0.0..=1.0`.
    PhotoTap {
        /// Horizontal fraction of the image width.
        x: f64,
        /// Vertical fraction of the image height.
        y: f64,
    },
    /// See [`EventKind::OutsidePhotoTap`].
    OutsidePhotoTap,
    /// See [`EventKind::ViewTap`].
    ViewTap {
        /// Tap position in viewport coordinates.
        position: Point,
    },
    /// See [`EventKind::ScaleChanged`].
    ScaleChanged {
        /// Per‑event pinch factor.
        factor: f64,
        /// Pinch focal point in viewport coordinates.
        focus: Point,
    },
    /// See [`EventKind::SingleFling`].
    SingleFling {
        /// Release velocity in pixels per second.
        velocity: Vec2,
    },
    /// See [`EventKind::ViewDrag`].
    ViewDrag {
        /// Drag movement in viewport pixels.
        delta: Vec2,
    },
    /// See [`EventKind::LongClick`].
    LongClick {
        /// Press position in viewport coordinates.
        position: Point,
    },
    /// See [`EventKind::Click`].
    Click,
    /// See [`EventKind::SingleTapConfirmed`].
    SingleTapConfirmed {
        /// Tap position in viewport coordinates.
        position: Point,
    },
    /// See [`EventKind::DoubleTap`].
    DoubleTap {
        /// Position of the first tap in viewport coordinates.
        position: Point,
    },
    /// See [`EventKind::DoubleTapEvent`].
    DoubleTapEvent {
        /// Event position in viewport coordinates.
        position: Point,
    },
}

impl PhotoEvent {
    /// Slot this event is dispatched to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MatrixChanged { .. } => EventKind::MatrixChanged,
            Self::PhotoTap { .. } => EventKind::PhotoTap,
            Self::OutsidePhotoTap => EventKind::OutsidePhotoTap,
            Self::ViewTap { .. } => EventKind::ViewTap,
            Self::ScaleChanged { .. } => EventKind::ScaleChanged,
            Self::SingleFling { .. } => EventKind::SingleFling,
            Self::ViewDrag { .. } => EventKind::ViewDrag,
            Self::LongClick { .. } => EventKind::LongClick,
            Self::Click => EventKind::Click,
            Self::SingleTapConfirmed { .. } => EventKind::SingleTapConfirmed,
            Self::DoubleTap { .. } => EventKind::DoubleTap,
            Self::DoubleTapEvent { .. } => EventKind::DoubleTapEvent,
        }
    }
}

type ListenerFn = dyn FnMut(&PhotoEvent) -> bool;

/// A shared event observer.
///
/// The return value reports whether the listener handled the event. It only
/// matters for kinds with a default action ([`EventKind::DoubleTap`] and
/// [`EventKind::SingleFling`]); a `true` suppresses that action.
pub type Listener = Rc<RefCell<ListenerFn>>;

/// Wraps a closure as a [`Listener`].
pub fn listener(f: impl FnMut(&PhotoEvent) -> bool + 'static) -> Listener {
    Rc::new(RefCell::new(f))
}

/// Per‑widget listener slots.
pub struct ListenerHub {
    local: [Option<Listener>; EventKind::COUNT],
    bound: [Option<Weak<RefCell<ListenerFn>>>; EventKind::COUNT],
}

impl ListenerHub {
    /// Creates a hub with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            local: [const { None }; EventKind::COUNT],
            bound: [const { None }; EventKind::COUNT],
        }
    }

    /// Replaces the listener for `kind`; `None` clears the slot.
    pub fn set(&mut self, kind: EventKind, listener: Option<Listener>) {
        self.local[kind.index()] = listener;
    }

    /// The local listener for `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: EventKind) -> Option<&Listener> {
        self.local[kind.index()].as_ref()
    }

    /// Whether `kind` has a local listener or a live bound one.
    #[must_use]
    pub fn has_listener(&self, kind: EventKind) -> bool {
        let i = kind.index();
        self.local[i].is_some()
            || self.bound[i]
                .as_ref()
                .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Composes `peer`'s current listeners after this hub's own.
    ///
    /// The snapshot is taken now; listeners `peer` registers later are not
    /// picked up. Binding again replaces the previous binding entirely.
    pub fn bind(&mut self, peer: &Self) {
        for kind in EventKind::ALL {
            let i = kind.index();
            self.bound[i] = peer.local[i].as_ref().map(Rc::downgrade);
        }
    }

    /// Whether a peer binding is in place.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound.iter().any(Option::is_some)
    }

    /// Delivers `event` to the local listener, then to the bound one.
    ///
    /// Returns the local listener's verdict, or the bound listener's when no
    /// local listener is set, or `false` when neither is. A listener that is
    /// already running (re‑entrant dispatch) is skipped.
    pub fn dispatch(&self, event: &PhotoEvent) -> bool {
        let i = event.kind().index();
        let local = self.local[i].as_ref().and_then(|l| call(l, event));
        let bound = self.bound[i]
            .as_ref()
            .and_then(Weak::upgrade)
            .and_then(|l| call(&l, event));
        local.or(bound).unwrap_or(false)
    }
}

fn call(listener: &Listener, event: &PhotoEvent) -> Option<bool> {
    let mut f = listener.try_borrow_mut().ok()?;
    Some((*f)(event))
}

impl Default for ListenerHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListenerHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for kind in EventKind::ALL {
            if self.has_listener(kind) {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::Point;

    use super::{EventKind, ListenerHub, PhotoEvent, listener};

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recording(log: &Log, name: &'static str, verdict: bool) -> super::Listener {
        let log = log.clone();
        listener(move |_| {
            log.borrow_mut().push(name);
            verdict
        })
    }

    const TAP: PhotoEvent = PhotoEvent::PhotoTap { x: 0.5, y: 0.5 };

    #[test]
    fn event_kinds_match_slot_order() {
        for (i, kind) in EventKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(PhotoEvent::Click.kind(), EventKind::Click);
        assert_eq!(
            PhotoEvent::DoubleTap {
                position: Point::ORIGIN
            }
            .kind(),
            EventKind::DoubleTap
        );
    }

    #[test]
    fn set_replaces_previous_listener() {
        let log: Log = Rc::default();
        let mut hub = ListenerHub::new();
        hub.set(EventKind::PhotoTap, Some(recording(&log, "first", false)));
        hub.set(EventKind::PhotoTap, Some(recording(&log, "second", true)));
        assert!(hub.dispatch(&TAP));
        assert_eq!(*log.borrow(), vec!["second"]);

        hub.set(EventKind::PhotoTap, None);
        assert!(!hub.dispatch(&TAP));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn bound_dispatch_calls_local_then_peer_once_each() {
        let log: Log = Rc::default();
        let mut a = ListenerHub::new();
        let mut b = ListenerHub::new();
        a.set(EventKind::PhotoTap, Some(recording(&log, "a", false)));
        b.set(EventKind::PhotoTap, Some(recording(&log, "b", true)));
        a.bind(&b);

        assert!(!a.dispatch(&TAP));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn bound_listeners_fire_independently() {
        let log: Log = Rc::default();
        let mut a = ListenerHub::new();
        let mut b = ListenerHub::new();
        b.set(EventKind::Click, Some(recording(&log, "b", true)));
        a.set(EventKind::ViewTap, Some(recording(&log, "a", false)));
        a.bind(&b);

        assert!(a.dispatch(&PhotoEvent::Click));
        a.dispatch(&PhotoEvent::ViewTap {
            position: Point::ORIGIN,
        });
        assert_eq!(*log.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn binding_is_a_snapshot_and_rebinding_replaces() {
        let log: Log = Rc::default();
        let mut a = ListenerHub::new();
        let mut b = ListenerHub::new();
        let mut c = ListenerHub::new();
        b.set(EventKind::PhotoTap, Some(recording(&log, "b", false)));
        c.set(EventKind::PhotoTap, Some(recording(&log, "c", false)));
        a.bind(&b);
        a.bind(&c);
        a.dispatch(&TAP);
        assert_eq!(*log.borrow(), vec!["c"]);

        // Later registrations on the peer are not picked up.
        c.set(EventKind::OutsidePhotoTap, Some(recording(&log, "late", false)));
        a.dispatch(&PhotoEvent::OutsidePhotoTap);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn binding_does_not_keep_peer_listeners_alive() {
        let log: Log = Rc::default();
        let mut a = ListenerHub::new();
        let mut b = ListenerHub::new();
        b.set(EventKind::PhotoTap, Some(recording(&log, "b", false)));
        a.bind(&b);
        assert!(a.has_listener(EventKind::PhotoTap));
        drop(b);
        assert!(!a.has_listener(EventKind::PhotoTap));
        assert!(!a.dispatch(&TAP));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn reentrant_dispatch_skips_busy_listener() {
        let hub = Rc::new(RefCell::new(ListenerHub::new()));
        let inner = hub.clone();
        let depth = Rc::new(RefCell::new(0));
        let d = depth.clone();
        hub.borrow_mut().set(
            EventKind::Click,
            Some(listener(move |event| {
                *d.borrow_mut() += 1;
                inner.borrow().dispatch(event);
                true
            })),
        );
        assert!(hub.borrow().dispatch(&PhotoEvent::Click));
        assert_eq!(*depth.borrow(), 1);
    }
}

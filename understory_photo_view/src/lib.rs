// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_photo_view --heading-base-level=0

//! Understory Photo View: a headless zoomable, pannable image view.
//!
//! This crate turns a raw pointer‑event stream into an affine transform for a
//! displayed image. It focuses on:
//! - Fitting an image into a viewport ([`FitMode`]) and layering a user
//!   pan/zoom/rotate transform on top ([`TransformState`]).
//! - Scale levels and edge clamping ([`ScaleBoundsPolicy`]).
//! - Gesture recognition: drag, pinch, fling, tap, double tap, long press
//!   ([`gesture::GestureInterpreter`]).
//! - Zoom transitions and fling deceleration ([`AnimationDriver`]).
//! - Listener fan‑out ([`listeners::ListenerHub`]), and binding one view to
//!   another so the peer hears its events and follows its drags, pinches, and
//!   flings ([`PhotoView::bind_photo_view`]).
//!
//! It does **not** decode images, own a window, or render anything. The host
//! calls into [`PhotoView`] at well‑defined points:
//! - [`PhotoView::on_viewport_resized`] after layout.
//! - [`PhotoView::on_image_changed`] with the image's pixel size.
//! - [`PhotoView::on_pointer_event`] for every pointer event, honoring
//!   [`PointerResponse::allow_parent_intercept`] when nested in a scroll container.
//! - [`PhotoView::on_render_tick`] on frames requested through [`FrameScheduler`].
//! - [`PhotoView::matrix`] when drawing.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_photo_view::PhotoView;
//! use understory_photo_view::gesture::PointerEvent;
//!
//! let mut view = PhotoView::new();
//! view.on_viewport_resized(Size::new(1000.0, 1000.0));
//! view.on_image_changed(Some(Size::new(2000.0, 1000.0)));
//!
//! // Fit‑center: half size, letterboxed vertically.
//! assert_eq!(view.minimum_scale(), 0.5);
//! assert_eq!(view.display_rect(), Some(Rect::new(0.0, 250.0, 1000.0, 750.0)));
//!
//! // Double tap zooms to the medium level over the transition duration.
//! let p = Point::new(500.0, 500.0);
//! view.on_pointer_event(PointerEvent::down(0, p, 0));
//! view.on_pointer_event(PointerEvent::up(0, p, 50));
//! view.on_pointer_event(PointerEvent::down(0, p, 150));
//! view.on_pointer_event(PointerEvent::up(0, p, 200));
//! view.on_render_tick(216);
//! view.on_render_tick(416);
//! assert!((view.scale() - view.medium_scale()).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Scale levels are configured as multipliers of the fitted scale and
//!   resolved into absolute scales (viewport pixels per image pixel) whenever
//!   the image or viewport changes. Every other scale in the API is absolute.
//! - Everything runs on the host's UI thread; listeners are `Rc`‑based and the
//!   view is intentionally `!Send`.
//! - Time is passed in by the host as milliseconds on a monotonic clock.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod animation;
mod bounds;
mod config;
mod error;
mod fit;
pub mod gesture;
pub mod listeners;
mod transform;
mod view;

pub use animation::{
    AnimationDriver, DEFAULT_FLING_DECELERATION, DEFAULT_ZOOM_DURATION_MS, StepOutcome,
};
pub use bounds::{ScaleBoundsPolicy, ScaleLevels, ScrollEdges};
pub use config::PhotoViewConfig;
pub use error::ConfigError;
pub use fit::FitMode;
pub use transform::{MatrixChange, RotationMode, TransformState};
pub use view::{FrameScheduler, PhotoView, PointerResponse};

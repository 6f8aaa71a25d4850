// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::animation::AnimationDriver;
use crate::bounds::{ScaleBoundsPolicy, ScaleLevels};
use crate::config::PhotoViewConfig;
use crate::error::ConfigError;
use crate::fit::FitMode;
use crate::gesture::{GestureConfig, GestureIntent, GestureInterpreter, GesturePhase, PointerEvent};
use crate::listeners::{EventKind, Listener, ListenerHub, PhotoEvent};
use crate::transform::{MatrixChange, RotationMode, TransformState};

/// Relative tolerance used to decide whether the view is at its minimum scale.
const SCALE_EPSILON: f64 = 1e-3;

/// Host hook for per‑frame callbacks.
///
/// The view calls [`request_frame`](Self::request_frame) whenever it needs
/// [`PhotoView::on_render_tick`] to be called on an upcoming frame, and
/// [`cancel_frame`](Self::cancel_frame) when a previously requested frame is no
/// longer needed. Both are called on the UI thread, from inside view methods.
pub trait FrameScheduler {
    /// Schedule one call to [`PhotoView::on_render_tick`].
    fn request_frame(&mut self);

    /// Drop a pending frame request, if the host supports it.
    fn cancel_frame(&mut self) {}
}

/// What the host should do with a pointer event after the view handled it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerResponse {
    /// The view consumed the event.
    pub handled: bool,
    /// The parent scroll container may take over this drag.
    pub allow_parent_intercept: bool,
}

#[derive(Clone, Copy, Debug)]
struct PendingScale {
    scale: f64,
    focus: Option<Point>,
    animate: bool,
}

/// The transform side of a view: everything a bound peer drives.
struct Stage {
    policy: ScaleBoundsPolicy,
    transform: TransformState,
    animator: AnimationDriver,
    scheduler: Option<Box<dyn FrameScheduler>>,
    frame_requested: bool,
}

impl Stage {
    fn scale(&self) -> f64 {
        self.transform.current_scale(&self.policy)
    }

    fn at_minimum(&self) -> bool {
        let minimum = self.policy.levels().minimum();
        self.scale() <= minimum * (1.0 + SCALE_EPSILON)
    }

    fn viewport_center(&self) -> Point {
        self.transform.viewport().to_rect().center()
    }

    fn reset(&mut self) -> Option<MatrixChange> {
        self.animator.cancel();
        self.transform.reset(&mut self.policy)
    }

    fn translate(&mut self, delta: Vec2) -> Option<MatrixChange> {
        self.transform.translate(delta, &self.policy)
    }

    fn scale_by(&mut self, factor: f64, focus: Point) -> Option<MatrixChange> {
        self.transform.scale_by(factor, focus, &self.policy)
    }

    fn set_scale(&mut self, scale: f64, focus: Point) -> Option<MatrixChange> {
        self.animator.cancel();
        self.transform.set_scale(scale, focus, &self.policy)
    }

    fn start_zoom(&mut self, target: f64, focus: Point) {
        let from = self.scale();
        let to = self.policy.clamp(target);
        self.animator.start_zoom(from, to, focus);
    }

    fn start_fling(&mut self, velocity: Vec2) -> bool {
        self.animator
            .start_fling(velocity, &self.transform, &self.policy)
    }

    fn step(&mut self, now_ms: u64) -> Option<MatrixChange> {
        self.animator
            .step(now_ms, &mut self.transform, &self.policy)
            .change()
    }

    /// Requests or cancels frames; `polling` adds the gesture interpreter's needs.
    fn schedule(&mut self, polling: bool) {
        let needed = self.animator.is_active() || polling;
        let Some(scheduler) = self.scheduler.as_mut() else {
            return;
        };
        if needed && !self.frame_requested {
            scheduler.request_frame();
            self.frame_requested = true;
        } else if !needed && self.frame_requested {
            scheduler.cancel_frame();
            self.frame_requested = false;
        }
    }

    /// Requests a frame for a running animation, never cancelling one.
    fn wake(&mut self) {
        if !self.animator.is_active() || self.frame_requested {
            return;
        }
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.request_frame();
            self.frame_requested = true;
        }
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("policy", &self.policy)
            .field("transform", &self.transform)
            .field("animator", &self.animator)
            .field("frame_requested", &self.frame_requested)
            .finish_non_exhaustive()
    }
}

/// Zoomable, pannable image view.
///
/// `PhotoView` owns the transform, scale policy, gesture interpreter,
/// animation driver, and listener hub, and exposes the host contract:
/// - [`on_viewport_resized`](Self::on_viewport_resized) after layout.
/// - [`on_image_changed`](Self::on_image_changed) when the displayed image changes.
/// - [`on_pointer_event`](Self::on_pointer_event) for every raw pointer event.
/// - [`on_render_tick`](Self::on_render_tick) on frames requested through the
///   [`FrameScheduler`].
/// - [`matrix`](Self::matrix) when drawing.
///
/// ## Scale units
///
/// Scales reported by the view ([`scale`](Self::scale),
/// [`minimum_scale`](Self::minimum_scale), ...) and accepted by
/// [`set_scale`](Self::set_scale) are absolute: viewport pixels per image
/// pixel. Scale levels are configured as multipliers of the fitted scale
/// ([`set_scale_multipliers`](Self::set_scale_multipliers),
/// [`scale_multipliers`](Self::scale_multipliers)) so they follow the image
/// and viewport through resets.
pub struct PhotoView {
    stage: Rc<RefCell<Stage>>,
    peer: Option<Weak<RefCell<Stage>>>,
    gestures: GestureInterpreter,
    listeners: ListenerHub,
    allow_parent_intercept_on_edge: bool,
    pending_scale: Option<PendingScale>,
    reset_pending: bool,
}

impl PhotoView {
    /// Creates a view with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PhotoViewConfig::default())
    }

    /// Creates a view with the given configuration.
    #[must_use]
    pub fn with_config(config: PhotoViewConfig) -> Self {
        let mut policy = ScaleBoundsPolicy::new(config.scale_multipliers, config.fit_mode);
        policy.set_edge_allowance(config.edge_allowance);
        let mut gestures = GestureInterpreter::new(config.gesture);
        gestures.set_zoomable(config.zoomable);
        let mut animator = AnimationDriver::new();
        animator.set_zoom_duration_ms(config.zoom_transition_duration_ms);
        animator.set_fling_deceleration(config.fling_deceleration);
        Self {
            stage: Rc::new(RefCell::new(Stage {
                policy,
                transform: TransformState::new(),
                animator,
                scheduler: None,
                frame_requested: false,
            })),
            peer: None,
            gestures,
            listeners: ListenerHub::new(),
            allow_parent_intercept_on_edge: config.allow_parent_intercept_on_edge,
            pending_scale: None,
            reset_pending: false,
        }
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> PhotoViewConfig {
        let stage = self.stage.borrow();
        PhotoViewConfig {
            scale_multipliers: stage.policy.configured_levels(),
            fit_mode: stage.policy.fit_mode(),
            zoomable: self.gestures.is_zoomable(),
            allow_parent_intercept_on_edge: self.allow_parent_intercept_on_edge,
            zoom_transition_duration_ms: stage.animator.zoom_duration_ms(),
            fling_deceleration: stage.animator.fling_deceleration(),
            edge_allowance: stage.policy.edge_allowance(),
            gesture: self.gestures.config(),
        }
    }

    // --- Host contract -------------------------------------------------------

    /// Layout produced a new viewport size.
    pub fn on_viewport_resized(&mut self, viewport: Size) {
        {
            let mut stage = self.stage.borrow_mut();
            if stage.transform.viewport() == viewport {
                return;
            }
            stage.transform.set_viewport(viewport);
        }
        self.request_reset();
        self.schedule();
    }

    /// The displayed image changed; `None` clears it.
    pub fn on_image_changed(&mut self, image: Option<Size>) {
        {
            let mut stage = self.stage.borrow_mut();
            stage.animator.cancel();
            stage.transform.set_image(image);
        }
        self.request_reset();
        self.schedule();
    }

    /// Feeds one raw pointer event through the gesture interpreter.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> PointerResponse {
        let mut response = PointerResponse {
            handled: self.stage.borrow().transform.image().is_some(),
            allow_parent_intercept: false,
        };
        for intent in self.gestures.handle(event) {
            self.apply_intent(intent, &mut response);
        }
        if self.reset_pending && !self.gestures.in_gesture() {
            self.reset();
        }
        self.schedule();
        response
    }

    /// Advances animations and time‑based gestures to `now_ms`.
    ///
    /// Returns whether further frames are needed; the view has already asked
    /// the [`FrameScheduler`] for one in that case.
    pub fn on_render_tick(&mut self, now_ms: u64) -> bool {
        self.stage.borrow_mut().frame_requested = false;
        let mut response = PointerResponse::default();
        for intent in self.gestures.poll(now_ms) {
            self.apply_intent(intent, &mut response);
        }
        let change = self.stage.borrow_mut().step(now_ms);
        self.notify(change);
        self.schedule();
        self.needs_frames()
    }

    /// Rendered matrix to apply when drawing the image.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.stage.borrow().transform.matrix()
    }

    /// Installs the host's frame scheduler.
    pub fn set_frame_scheduler(&mut self, scheduler: Box<dyn FrameScheduler>) {
        {
            let mut stage = self.stage.borrow_mut();
            stage.scheduler = Some(scheduler);
            stage.frame_requested = false;
        }
        self.schedule();
    }

    // --- Queries -------------------------------------------------------------

    /// Bounding box of the displayed image in viewport coordinates.
    #[must_use]
    pub fn display_rect(&self) -> Option<Rect> {
        self.stage.borrow().transform.display_rect()
    }

    /// Current absolute scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.stage.borrow().scale()
    }

    /// Resolved absolute scale levels for the current image and viewport.
    #[must_use]
    pub fn scale_levels(&self) -> ScaleLevels {
        self.stage.borrow().policy.levels()
    }

    /// Configured scale levels, as multipliers of the fitted scale.
    #[must_use]
    pub fn scale_multipliers(&self) -> ScaleLevels {
        self.stage.borrow().policy.configured_levels()
    }

    /// Resolved absolute minimum scale.
    #[must_use]
    pub fn minimum_scale(&self) -> f64 {
        self.scale_levels().minimum()
    }

    /// Resolved absolute medium scale.
    #[must_use]
    pub fn medium_scale(&self) -> f64 {
        self.scale_levels().medium()
    }

    /// Resolved absolute maximum scale.
    #[must_use]
    pub fn maximum_scale(&self) -> f64 {
        self.scale_levels().maximum()
    }

    /// Current rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.stage.borrow().transform.rotation()
    }

    /// Fit‑to‑viewport matrix.
    #[must_use]
    pub fn base_matrix(&self) -> Affine {
        self.stage.borrow().transform.base_matrix()
    }

    /// User matrix layered on top of the base matrix.
    #[must_use]
    pub fn user_matrix(&self) -> Affine {
        self.stage.borrow().transform.user_matrix()
    }

    /// Whether drag, pinch, and fling are enabled.
    #[must_use]
    pub fn is_zoomable(&self) -> bool {
        self.gestures.is_zoomable()
    }

    /// Current fit mode.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.stage.borrow().policy.fit_mode()
    }

    /// Whether a zoom or fling animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.stage.borrow().animator.is_active()
    }

    /// Phase of the current touch sequence.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    // --- Configuration -------------------------------------------------------

    /// Replaces all three scale multipliers.
    pub fn set_scale_multipliers(
        &mut self,
        minimum: f64,
        medium: f64,
        maximum: f64,
    ) -> Result<(), ConfigError> {
        let levels = logged(ScaleLevels::new(minimum, medium, maximum))?;
        self.apply_levels(levels);
        Ok(())
    }

    /// Replaces the minimum multiplier, keeping the others.
    pub fn set_minimum_multiplier(&mut self, minimum: f64) -> Result<(), ConfigError> {
        let levels = logged(self.scale_multipliers().with_minimum(minimum))?;
        self.apply_levels(levels);
        Ok(())
    }

    /// Replaces the medium multiplier, keeping the others.
    pub fn set_medium_multiplier(&mut self, medium: f64) -> Result<(), ConfigError> {
        let levels = logged(self.scale_multipliers().with_medium(medium))?;
        self.apply_levels(levels);
        Ok(())
    }

    /// Replaces the maximum multiplier, keeping the others.
    pub fn set_maximum_multiplier(&mut self, maximum: f64) -> Result<(), ConfigError> {
        let levels = logged(self.scale_multipliers().with_maximum(maximum))?;
        self.apply_levels(levels);
        Ok(())
    }

    /// Changes the fit mode and resets the transform.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        {
            let mut stage = self.stage.borrow_mut();
            if stage.policy.fit_mode() == mode {
                return;
            }
            stage.policy.set_fit_mode(mode);
        }
        self.request_reset();
        self.schedule();
    }

    /// Enables or disables drag, pinch, and fling.
    pub fn set_zoomable(&mut self, zoomable: bool) {
        self.gestures.set_zoomable(zoomable);
        let mut stage = self.stage.borrow_mut();
        if !zoomable && stage.animator.is_flinging() {
            stage.animator.cancel();
        }
    }

    /// Lets a parent scroll container take over drags at the image edge.
    pub fn set_allow_parent_intercept_on_edge(&mut self, allow: bool) {
        self.allow_parent_intercept_on_edge = allow;
    }

    /// Duration of programmatic and double‑tap zoom transitions.
    pub fn set_zoom_transition_duration(&mut self, duration_ms: u64) {
        self.stage
            .borrow_mut()
            .animator
            .set_zoom_duration_ms(duration_ms);
    }

    /// Fling deceleration in pixels per second squared.
    pub fn set_fling_deceleration(&mut self, deceleration: f64) {
        self.stage
            .borrow_mut()
            .animator
            .set_fling_deceleration(deceleration);
    }

    /// Empty space a larger‑than‑viewport image may reveal at its edges.
    pub fn set_edge_allowance(&mut self, allowance: f64) {
        let change = {
            let mut stage = self.stage.borrow_mut();
            stage.policy.set_edge_allowance(allowance);
            stage.translate(Vec2::ZERO)
        };
        self.notify(change);
    }

    /// Replaces the gesture thresholds.
    pub fn set_gesture_config(&mut self, config: GestureConfig) {
        self.gestures.set_config(config);
    }

    /// Rotates to an absolute angle, kept across resets.
    pub fn set_rotation_to(&mut self, degrees: f64) {
        self.rotate(degrees, RotationMode::Absolute);
    }

    /// Rotates by an angle relative to the current rotation.
    pub fn set_rotation_by(&mut self, degrees: f64) {
        self.rotate(degrees, RotationMode::Relative);
    }

    /// Sets the absolute scale about the viewport center, without animation.
    pub fn set_scale(&mut self, scale: f64) {
        self.set_scale_inner(scale, None, false);
    }

    /// Sets the absolute scale about the viewport center.
    pub fn set_scale_animated(&mut self, scale: f64, animate: bool) {
        self.set_scale_inner(scale, None, animate);
    }

    /// Sets the absolute scale about a focal point in viewport coordinates.
    ///
    /// Before an image and viewport are available the request is stored and
    /// applied on the next reset.
    pub fn set_scale_about(&mut self, scale: f64, focus: Point, animate: bool) {
        self.set_scale_inner(scale, Some(focus), animate);
    }

    /// Replaces the user matrix. Returns `false` when there is no image.
    pub fn set_user_matrix(&mut self, user: Affine) -> bool {
        let change = {
            let mut guard = self.stage.borrow_mut();
            let stage = &mut *guard;
            if stage.transform.image().is_none() {
                return false;
            }
            stage.animator.cancel();
            stage.transform.set_user_matrix(user, &stage.policy)
        };
        self.notify(change);
        self.schedule();
        true
    }

    // --- Listeners -----------------------------------------------------------

    /// Replaces the listener for `kind`; `None` clears it.
    pub fn set_listener(&mut self, kind: EventKind, listener: Option<Listener>) {
        self.listeners.set(kind, listener);
    }

    /// Listener hub of this view.
    #[must_use]
    pub fn listeners(&self) -> &ListenerHub {
        &self.listeners
    }

    /// Mutable listener hub of this view.
    pub fn listeners_mut(&mut self) -> &mut ListenerHub {
        &mut self.listeners
    }

    /// Binds this view to `other`.
    ///
    /// This view's events are replayed onto `other`'s current listeners (see
    /// [`ListenerHub::bind`]), and drags, pinches, and flings recognized here
    /// are applied to `other`'s transform as well, within `other`'s own scale
    /// and edge bounds. The binding does not keep `other` alive; once it is
    /// dropped, forwarding stops. Binding again replaces the previous peer.
    pub fn bind_photo_view(&mut self, other: &Self) {
        self.listeners.bind(&other.listeners);
        self.peer = Some(Rc::downgrade(&other.stage));
    }

    // --- Internals -----------------------------------------------------------

    fn apply_levels(&mut self, levels: ScaleLevels) {
        let change = {
            let mut stage = self.stage.borrow_mut();
            stage.policy.set_configured_levels(levels);
            let (viewport, image) = (stage.transform.viewport(), stage.transform.image());
            stage.policy.update(viewport, image);
            if stage.transform.is_ready() {
                let (current, center) = (stage.scale(), stage.viewport_center());
                stage.set_scale(current, center)
            } else {
                None
            }
        };
        self.notify(change);
        self.schedule();
    }

    fn rotate(&mut self, degrees: f64, mode: RotationMode) {
        let change = {
            let mut guard = self.stage.borrow_mut();
            let stage = &mut *guard;
            stage.transform.set_rotation(degrees, mode, &stage.policy)
        };
        self.notify(change);
    }

    fn set_scale_inner(&mut self, scale: f64, focus: Option<Point>, animate: bool) {
        let change = {
            let mut stage = self.stage.borrow_mut();
            if !stage.transform.is_ready() {
                self.pending_scale = Some(PendingScale {
                    scale,
                    focus,
                    animate,
                });
                return;
            }
            let focus = focus.unwrap_or_else(|| stage.viewport_center());
            if animate {
                stage.start_zoom(scale, focus);
                None
            } else {
                stage.set_scale(scale, focus)
            }
        };
        self.notify(change);
        self.schedule();
    }

    fn request_reset(&mut self) {
        if self.gestures.in_gesture() {
            self.reset_pending = true;
        } else {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.reset_pending = false;
        let (change, ready) = {
            let mut stage = self.stage.borrow_mut();
            (stage.reset(), stage.transform.is_ready())
        };
        self.notify(change);
        if ready {
            if let Some(pending) = self.pending_scale.take() {
                self.set_scale_inner(pending.scale, pending.focus, pending.animate);
            }
        }
    }

    /// Applies `f` to the bound peer's stage, if it is still alive and free.
    fn forward(&self, f: impl FnOnce(&mut Stage)) {
        let Some(peer) = self.peer.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let Ok(mut stage) = peer.try_borrow_mut() else {
            return;
        };
        f(&mut stage);
        stage.wake();
    }

    fn apply_intent(&mut self, intent: GestureIntent, response: &mut PointerResponse) {
        match intent {
            GestureIntent::Begin => self.stage.borrow_mut().animator.cancel(),
            GestureIntent::Drag { delta } => {
                self.listeners.dispatch(&PhotoEvent::ViewDrag { delta });
                let (change, yield_to_parent) = {
                    let mut stage = self.stage.borrow_mut();
                    let change = stage.translate(delta);
                    let yield_to_parent = self.allow_parent_intercept_on_edge
                        && self.gestures.phase() != GesturePhase::Scaling
                        && stage.at_minimum()
                        && stage.transform.scroll_edges().blocks(delta);
                    (change, yield_to_parent)
                };
                self.notify(change);
                self.forward(|peer| {
                    peer.translate(delta);
                });
                if yield_to_parent {
                    response.allow_parent_intercept = true;
                }
            }
            GestureIntent::Scale { factor, focus } => {
                let scale = self.scale();
                let levels = self.scale_levels();
                if (scale < levels.maximum() || factor < 1.0)
                    && (scale > levels.minimum() || factor > 1.0)
                {
                    self.listeners
                        .dispatch(&PhotoEvent::ScaleChanged { factor, focus });
                    let change = self.stage.borrow_mut().scale_by(factor, focus);
                    self.notify(change);
                    self.forward(|peer| {
                        peer.scale_by(factor, focus);
                    });
                }
            }
            GestureIntent::Fling { velocity } => {
                if !self
                    .listeners
                    .dispatch(&PhotoEvent::SingleFling { velocity })
                {
                    self.stage.borrow_mut().start_fling(velocity);
                    self.forward(|peer| {
                        peer.start_fling(velocity);
                    });
                }
            }
            GestureIntent::SingleTapConfirmed { position } => {
                if !self
                    .listeners
                    .dispatch(&PhotoEvent::SingleTapConfirmed { position })
                {
                    self.dispatch_tap(position);
                }
            }
            GestureIntent::DoubleTap { position } => {
                if !self.listeners.dispatch(&PhotoEvent::DoubleTap { position })
                    && self.gestures.is_zoomable()
                {
                    self.double_tap_zoom(position);
                }
            }
            GestureIntent::DoubleTapEvent { position } => {
                self.listeners
                    .dispatch(&PhotoEvent::DoubleTapEvent { position });
            }
            GestureIntent::LongPress { position } => {
                self.listeners.dispatch(&PhotoEvent::LongClick { position });
            }
            GestureIntent::Cancelled => {}
        }
    }

    fn dispatch_tap(&mut self, position: Point) {
        self.listeners.dispatch(&PhotoEvent::Click);
        self.listeners.dispatch(&PhotoEvent::ViewTap { position });
        let Some(rect) = self.display_rect() else {
            return;
        };
        if rect.contains(position) && rect.width() > 0.0 && rect.height() > 0.0 {
            self.listeners.dispatch(&PhotoEvent::PhotoTap {
                x: (position.x - rect.x0) / rect.width(),
                y: (position.y - rect.y0) / rect.height(),
            });
        } else {
            self.listeners.dispatch(&PhotoEvent::OutsidePhotoTap);
        }
    }

    fn double_tap_zoom(&mut self, focus: Point) {
        let mut stage = self.stage.borrow_mut();
        if !stage.transform.is_ready() {
            return;
        }
        let levels = stage.policy.levels();
        let target = if stage.at_minimum() {
            levels.medium()
        } else {
            levels.minimum()
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(target, "double tap zoom");
        stage.start_zoom(target, focus);
    }

    fn notify(&mut self, change: Option<MatrixChange>) {
        if let Some(change) = change {
            self.listeners.dispatch(&PhotoEvent::MatrixChanged {
                display_rect: change.display_rect,
            });
        }
    }

    fn needs_frames(&self) -> bool {
        self.stage.borrow().animator.is_active() || self.gestures.needs_poll()
    }

    fn schedule(&mut self) {
        let polling = self.gestures.needs_poll();
        self.stage.borrow_mut().schedule(polling);
    }
}

impl Default for PhotoView {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PhotoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoView")
            .field("stage", &self.stage)
            .field("bound", &self.peer.is_some())
            .field("gestures", &self.gestures)
            .field("listeners", &self.listeners)
            .field("allow_parent_intercept_on_edge", &self.allow_parent_intercept_on_edge)
            .field("pending_scale", &self.pending_scale)
            .field("reset_pending", &self.reset_pending)
            .finish()
    }
}

fn logged<T>(result: Result<T, ConfigError>) -> Result<T, ConfigError> {
    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        tracing::warn!(%err, "rejected photo view configuration");
    }
    result
}

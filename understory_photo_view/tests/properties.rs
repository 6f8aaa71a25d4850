// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for scale clamping and translation bounds.

use kurbo::{Point, Rect, Size, Vec2};
use proptest::prelude::*;
use understory_photo_view::gesture::PointerEvent;
use understory_photo_view::{FitMode, PhotoView, ScaleBoundsPolicy, ScaleLevels, TransformState};

const VIEW: Size = Size::new(1000.0, 1000.0);

fn levels() -> impl Strategy<Value = ScaleLevels> {
    (0.1..10.0_f64, 1.0..4.0_f64, 1.0..4.0_f64).prop_map(|(min, a, b)| {
        ScaleLevels::new(min, min * a, min * a * b).expect("ordered positive levels")
    })
}

fn drags() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-3000.0..3000.0_f64, -3000.0..3000.0_f64), 1..12)
}

proptest! {
    #[test]
    fn clamp_stays_within_levels(levels in levels(), requested in -100.0..100.0_f64) {
        let policy = ScaleBoundsPolicy::new(levels, FitMode::FitCenter);
        let clamped = policy.clamp(requested);
        prop_assert!(clamped >= levels.minimum() && clamped <= levels.maximum());
        if requested >= levels.minimum() && requested <= levels.maximum() {
            prop_assert_eq!(clamped, requested);
        } else if requested < levels.minimum() {
            prop_assert_eq!(clamped, levels.minimum());
        } else {
            prop_assert_eq!(clamped, levels.maximum());
        }
    }

    #[test]
    fn smaller_axis_stays_centered(
        width in 1000.0..5000.0_f64,
        height in 50.0..900.0_f64,
        drags in drags(),
    ) {
        let mut policy = ScaleBoundsPolicy::default();
        let mut state = TransformState::new();
        state.set_viewport(VIEW);
        state.set_image(Some(Size::new(width * 2.0, height)));
        state.reset(&mut policy);
        for (dx, dy) in drags {
            state.translate(Vec2::new(dx, dy), &policy);
            let rect = state.display_rect().expect("image present");
            prop_assert!((rect.center().y - 500.0).abs() < 1e-6);
            prop_assert!(rect.x0 <= 1e-6 && rect.x1 >= 1000.0 - 1e-6);
        }
    }

    #[test]
    fn zoomed_image_always_covers_viewport(
        scale in 1.0..5.0_f64,
        focus in (0.0..1000.0_f64, 0.0..1000.0_f64),
        drags in drags(),
    ) {
        let mut view = PhotoView::new();
        view.on_viewport_resized(VIEW);
        view.on_image_changed(Some(Size::new(1000.0, 1000.0)));
        view.set_scale_about(scale, Point::new(focus.0, focus.1), false);
        let mut now = 0;
        for (dx, dy) in drags {
            let from = Point::new(500.0, 500.0);
            view.on_pointer_event(PointerEvent::down(0, from, now));
            view.on_pointer_event(PointerEvent::moved(0, from + Vec2::new(dx, dy), now + 50));
            view.on_pointer_event(PointerEvent::up(0, from + Vec2::new(dx, dy), now + 60));
            while view.on_render_tick(now + 100) {
                now += 16;
            }
            now += 1000;
            let rect = view.display_rect().expect("image present");
            let viewport = Rect::from_origin_size(Point::ORIGIN, VIEW);
            prop_assert!(rect.x0 <= viewport.x0 + 1e-6 && rect.y0 <= viewport.y0 + 1e-6);
            prop_assert!(rect.x1 >= viewport.x1 - 1e-6 && rect.y1 >= viewport.y1 - 1e-6);
            prop_assert!((view.scale() - scale).abs() < 1e-6);
        }
    }
}

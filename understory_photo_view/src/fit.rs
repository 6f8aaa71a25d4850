// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Size, Vec2};

/// How the image's native bounds are mapped into the viewport at minimum scale.
///
/// The mode determines the base matrix that the user transform is layered on
/// top of, and the alignment used when the image is smaller than the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Scale uniformly so the whole image fits, and center it.
    #[default]
    FitCenter,
    /// Scale each axis independently so the image fills the viewport exactly.
    FitXy,
    /// Scale uniformly so the whole image fits, aligned to the top‑left.
    FitStart,
    /// Scale uniformly so the whole image fits, aligned to the bottom‑right.
    FitEnd,
    /// Scale uniformly so the image covers the viewport, and center it.
    CropFill,
    /// Do not scale; center the image at its native size.
    None,
    /// Like [`FitMode::FitCenter`], but never enlarge past native size.
    CenterInside,
}

/// Alignment of an image axis that is smaller than the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Align {
    Start,
    Center,
    End,
}

impl FitMode {
    /// Uniform scale factor this mode applies to an image of `image` size in a
    /// viewport of `viewport` size.
    ///
    /// For [`FitMode::FitXy`], which scales the axes independently, the
    /// smaller of the two axis factors is reported.
    #[must_use]
    pub fn fit_scale(self, viewport: Size, image: Size) -> f64 {
        if !is_usable(viewport) || !is_usable(image) {
            return 1.0;
        }
        let sx = viewport.width / image.width;
        let sy = viewport.height / image.height;
        match self {
            Self::None => 1.0,
            Self::CropFill => sx.max(sy),
            Self::CenterInside => sx.min(sy).min(1.0),
            Self::FitCenter | Self::FitXy | Self::FitStart | Self::FitEnd => sx.min(sy),
        }
    }

    /// Base matrix mapping image space into viewport space for this mode.
    ///
    /// Returns the identity when either size is empty.
    #[must_use]
    pub fn base_matrix(self, viewport: Size, image: Size) -> Affine {
        if !is_usable(viewport) || !is_usable(image) {
            return Affine::IDENTITY;
        }
        if self == Self::FitXy {
            return Affine::scale_non_uniform(
                viewport.width / image.width,
                viewport.height / image.height,
            );
        }
        let scale = self.fit_scale(viewport, image);
        let scaled = image * scale;
        let free = Vec2::new(viewport.width - scaled.width, viewport.height - scaled.height);
        let offset = match self.align() {
            Align::Start => Vec2::ZERO,
            Align::Center => free * 0.5,
            Align::End => free,
        };
        Affine::translate(offset) * Affine::scale(scale)
    }

    pub(crate) fn align(self) -> Align {
        match self {
            Self::FitStart => Align::Start,
            Self::FitEnd => Align::End,
            _ => Align::Center,
        }
    }
}

fn is_usable(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0 && size.is_finite()
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::FitMode;

    const VIEW: Size = Size::new(1000.0, 1000.0);
    const WIDE: Size = Size::new(2000.0, 1000.0);

    fn mapped(mode: FitMode, view: Size, image: Size) -> Rect {
        mode.base_matrix(view, image)
            .transform_rect_bbox(image.to_rect())
    }

    #[test]
    fn fit_center_letterboxes_wide_image() {
        assert_eq!(FitMode::FitCenter.fit_scale(VIEW, WIDE), 0.5);
        assert_eq!(
            mapped(FitMode::FitCenter, VIEW, WIDE),
            Rect::new(0.0, 250.0, 1000.0, 750.0)
        );
    }

    #[test]
    fn fit_start_and_end_align_to_opposite_edges() {
        assert_eq!(
            mapped(FitMode::FitStart, VIEW, WIDE),
            Rect::new(0.0, 0.0, 1000.0, 500.0)
        );
        assert_eq!(
            mapped(FitMode::FitEnd, VIEW, WIDE),
            Rect::new(0.0, 500.0, 1000.0, 1000.0)
        );
    }

    #[test]
    fn fit_xy_fills_viewport() {
        assert_eq!(mapped(FitMode::FitXy, VIEW, WIDE), VIEW.to_rect());
        assert_eq!(FitMode::FitXy.fit_scale(VIEW, WIDE), 0.5);
    }

    #[test]
    fn crop_fill_covers_viewport() {
        assert_eq!(FitMode::CropFill.fit_scale(VIEW, WIDE), 1.0);
        assert_eq!(
            mapped(FitMode::CropFill, VIEW, WIDE),
            Rect::new(-500.0, 0.0, 1500.0, 1000.0)
        );
    }

    #[test]
    fn none_centers_without_scaling() {
        let small = Size::new(200.0, 100.0);
        assert_eq!(FitMode::None.fit_scale(VIEW, small), 1.0);
        assert_eq!(
            mapped(FitMode::None, VIEW, small),
            Rect::new(400.0, 450.0, 600.0, 550.0)
        );
    }

    #[test]
    fn center_inside_never_enlarges() {
        let small = Size::new(200.0, 100.0);
        assert_eq!(FitMode::CenterInside.fit_scale(VIEW, small), 1.0);
        assert_eq!(FitMode::CenterInside.fit_scale(VIEW, WIDE), 0.5);
    }

    #[test]
    fn empty_sizes_yield_identity() {
        let m = FitMode::FitCenter.base_matrix(Size::ZERO, WIDE);
        assert_eq!(m * Point::new(3.0, 4.0), Point::new(3.0, 4.0));
        assert_eq!(FitMode::CropFill.fit_scale(VIEW, Size::ZERO), 1.0);
    }
}

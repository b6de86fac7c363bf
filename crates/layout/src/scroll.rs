//! Scroll offset arithmetic for wheel, pan and scrollbar-thumb input.
//!
//! None of these clamp: the offset may run past either end of the content.

use crate::geometry::{Point, ScrollOffset, TextDimensions, Viewport};

/// Smallest thumb length, in pixels.
pub const MIN_THUMB_LENGTH: f64 = 30.0;
/// Thickness of a scrollbar track.
pub const SCROLLBAR_WIDTH: f64 = 12.0;

/// A pure vertical baseline. Wheel input at this angle scrolls sideways.
pub const UPRIGHT_DEGREES: f64 = 90.0;

#[inline]
fn is_upright(angle_degrees: f64) -> bool {
    angle_degrees == UPRIGHT_DEGREES
}

/// Applies a wheel step of `delta_y` so it reads as "down the page".
///
/// The step is split along and across the baseline and scaled by
/// `1 / sqrt(1 + tan²θ)`, keeping the on-screen speed the same at every
/// angle. At exactly 90° that direction degenerates and the whole step goes
/// to the horizontal component.
#[must_use]
pub fn wheel(offset: ScrollOffset, delta_y: f64, angle_degrees: f64) -> ScrollOffset {
    if is_upright(angle_degrees) {
        return ScrollOffset::new(offset.x + delta_y, offset.y);
    }

    let tan = angle_degrees.to_radians().tan();
    let normalize = 1.0 / (1.0 + tan * tan).sqrt();
    let dy = delta_y * normalize;
    let dx = -tan * dy;

    ScrollOffset::new(offset.x + dx, offset.y + dy)
}

/// Pans by a raw pointer delta. Content follows the pointer, so the offset
/// moves the opposite way.
#[must_use]
pub fn drag(offset: ScrollOffset, delta: Point) -> ScrollOffset {
    ScrollOffset::new(offset.x - delta.x, offset.y - delta.y)
}

/// Placement of one scrollbar thumb along its track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbGeometry {
    /// Visible length along the axis (track length).
    pub view: f64,
    /// Total content length along the axis.
    pub content: f64,
    pub length: f64,
    pub start: f64,
}

impl ThumbGeometry {
    fn new(view: f64, content: f64, offset: f64) -> Self {
        let length = MIN_THUMB_LENGTH.max(view / content * view);
        let start = offset / (content - view) * (view - length);

        Self {
            view,
            content,
            length,
            start,
        }
    }

    /// Converts a thumb movement into a content offset change.
    #[must_use]
    pub fn content_delta(&self, pointer_delta: f64) -> f64 {
        let travel = self.view - self.length;

        if travel <= 0.0 {
            return 0.0;
        }

        pointer_delta / travel * (self.content - self.view)
    }

    /// Whether `along` (a coordinate on the track axis) falls on the thumb.
    #[must_use]
    pub fn contains(&self, along: f64) -> bool {
        along >= self.start && along <= self.start + self.length
    }
}

/// Which scrollbars are showing and where their thumbs sit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scrollbars {
    /// Right edge. Shown for every angle except 90° when the text is taller
    /// than the canvas.
    pub vertical: Option<ThumbGeometry>,
    /// Bottom edge. Shown only at 90°, when the laid-out text outgrows the
    /// canvas width.
    pub horizontal: Option<ThumbGeometry>,
}

#[must_use]
pub fn scrollbars(
    dimensions: TextDimensions,
    viewport: Viewport,
    offset: ScrollOffset,
    angle_degrees: f64,
) -> Scrollbars {
    let upright = is_upright(angle_degrees);
    let total = dimensions.height;

    let vertical = (!upright && total > viewport.height)
        .then(|| ThumbGeometry::new(viewport.height, total, offset.y));
    let horizontal = (upright && total > viewport.width)
        .then(|| ThumbGeometry::new(viewport.width, total, offset.x));

    Scrollbars {
        vertical,
        horizontal,
    }
}

/// Offset after dragging the vertical thumb `pointer_delta` pixels from where
/// the drag started.
///
/// The vertical step is paired with the horizontal shift that keeps the
/// slanted reading line in place, the same pairing [`wheel`] uses.
#[must_use]
pub fn drag_vertical_thumb(
    start: ScrollOffset,
    pointer_delta: f64,
    thumb: &ThumbGeometry,
    angle_degrees: f64,
) -> ScrollOffset {
    let y = start.y + thumb.content_delta(pointer_delta);
    let x = start.x - angle_degrees.to_radians().tan() * (y - start.y);

    ScrollOffset::new(x, y)
}

/// Offset after dragging the horizontal thumb `pointer_delta` pixels from
/// where the drag started.
///
/// Upright text runs its lines right to left, so a thumb moved right scrolls
/// toward the earlier lines and the offset shrinks.
#[must_use]
pub fn drag_horizontal_thumb(
    start: ScrollOffset,
    pointer_delta: f64,
    thumb: &ThumbGeometry,
) -> ScrollOffset {
    ScrollOffset::new(start.x - thumb.content_delta(pointer_delta), start.y)
}

//! Drag gestures as an explicit state machine.
//!
//! A drag holds on to pointer input for its whole duration. Entering
//! [`DragGesture::Dragging`] yields [`DragTransition::Attach`] and leaving it
//! yields [`DragTransition::Detach`]; the widget maps those to grabbing and
//! releasing the pointer. Every path out of `Dragging`, normal release or
//! forced cancel, produces exactly one `Detach`.

use tracing::debug;

use crate::geometry::{Point, ScrollOffset};
use crate::scroll::ThumbGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// What a drag is moving.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragTarget {
    /// Grab-and-pull panning of the canvas.
    Canvas { button: PointerButton },
    VerticalThumb(ThumbDrag),
    HorizontalThumb(ThumbDrag),
}

/// State captured when a thumb drag starts. Thumb drags are resolved against
/// their start, not incrementally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbDrag {
    pub start_offset: ScrollOffset,
    pub start_pointer: Point,
    pub thumb: ThumbGeometry,
    pub angle_degrees: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging { target: DragTarget, last: Point },
}

/// Entry and exit actions of the `Dragging` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTransition {
    Attach,
    Detach,
}

impl DragGesture {
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragGesture::Dragging { .. })
    }

    /// Starts a drag. Ignored (returns `None`) if one is already running, so a
    /// second button going down mid-drag cannot attach twice.
    pub fn begin(&mut self, target: DragTarget, at: Point) -> Option<DragTransition> {
        if self.is_dragging() {
            return None;
        }

        debug!(?target, "drag begin");
        *self = DragGesture::Dragging { target, last: at };

        Some(DragTransition::Attach)
    }

    /// Feeds a pointer move and returns the new scroll offset, if dragging.
    pub fn motion(&mut self, at: Point, offset: ScrollOffset) -> Option<ScrollOffset> {
        let DragGesture::Dragging { target, last } = self else {
            return None;
        };

        let next = match target {
            DragTarget::Canvas { .. } => crate::scroll::drag(offset, at - *last),
            DragTarget::VerticalThumb(drag) => crate::scroll::drag_vertical_thumb(
                drag.start_offset,
                at.y - drag.start_pointer.y,
                &drag.thumb,
                drag.angle_degrees,
            ),
            DragTarget::HorizontalThumb(drag) => crate::scroll::drag_horizontal_thumb(
                drag.start_offset,
                at.x - drag.start_pointer.x,
                &drag.thumb,
            ),
        };

        *last = at;

        Some(next)
    }

    /// Ends the drag on pointer release. Returns the target that was being
    /// dragged alongside the exit action.
    pub fn end(&mut self) -> Option<(DragTarget, DragTransition)> {
        match std::mem::take(self) {
            DragGesture::Idle => None,
            DragGesture::Dragging { target, .. } => {
                debug!(?target, "drag end");
                Some((target, DragTransition::Detach))
            }
        }
    }

    /// Forced cleanup (focus loss, widget hidden). Same exit action as
    /// [`DragGesture::end`].
    pub fn cancel(&mut self) -> Option<DragTransition> {
        self.end().map(|(_, transition)| transition)
    }
}

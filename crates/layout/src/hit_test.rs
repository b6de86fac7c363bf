use crate::geometry::{CharBox, Point, ScrollOffset};

/// Maps a canvas-space pointer position to the nearest character slot.
///
/// Nearest means the smallest squared distance to a box centre as it appears
/// under `scroll`. Boxes are scanned in index order and only a strictly
/// smaller distance replaces the current best, so on a tie the earlier buffer
/// position wins. Linear in the number of boxes.
///
/// Returns `None` when there are no boxes.
#[must_use]
pub fn hit_test(boxes: &[CharBox], point: Point, scroll: ScrollOffset) -> Option<usize> {
    let mut closest_distance = f64::INFINITY;
    let mut closest_index = None;

    for char_box in boxes {
        let distance = point.distance_squared(char_box.screen_center(scroll));

        if distance < closest_distance {
            closest_distance = distance;
            closest_index = Some(char_box.index);
        }
    }

    closest_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{LayoutParams, layout};
    use crate::font::FontSettings;
    use crate::geometry::Viewport;
    use crate::metrics::FixedAdvance;
    use editor_core::text::TextBuffer;

    fn unit_box(x: f64, y: f64, index: usize) -> CharBox {
        CharBox {
            x,
            y,
            width: 10.0,
            height: 10.0,
            index,
        }
    }

    fn setup(text: &str, scroll: ScrollOffset) -> Vec<CharBox> {
        let params = LayoutParams {
            font: FontSettings::default(),
            scroll,
            viewport: Viewport::new(600.0, 400.0),
            ..LayoutParams::default()
        };

        layout(&TextBuffer::from_text(text), &params, &mut FixedAdvance::default()).boxes
    }

    #[test]
    fn test_no_boxes_no_match() {
        assert_eq!(hit_test(&[], Point::new(5.0, 5.0), ScrollOffset::ORIGIN), None);
    }

    #[test]
    fn test_center_of_box_hits_that_box() {
        let boxes = setup("ABCD\nEF", ScrollOffset::ORIGIN);
        let target = boxes[2];

        let hit = hit_test(&boxes, target.screen_center(ScrollOffset::ORIGIN), ScrollOffset::ORIGIN);

        assert_eq!(hit, Some(2));
    }

    #[test]
    fn test_center_hit_under_scroll() {
        let scroll = ScrollOffset::new(37.0, -21.0);
        let boxes = setup("ABCD\nEF", scroll);

        for target in &boxes {
            let hit = hit_test(&boxes, target.screen_center(scroll), scroll);
            assert_eq!(hit, Some(target.index));
        }
    }

    #[test]
    fn test_repeat_click_is_idempotent() {
        let boxes = setup("hello\nworld", ScrollOffset::ORIGIN);
        let point = Point::new(41.3, 28.9);

        let first = hit_test(&boxes, point, ScrollOffset::ORIGIN);

        for _ in 0..10 {
            assert_eq!(hit_test(&boxes, point, ScrollOffset::ORIGIN), first);
        }
    }

    #[test]
    fn test_tie_goes_to_earlier_index() {
        let boxes = [unit_box(0.0, 0.0, 0), unit_box(20.0, 0.0, 1)];

        // Exactly halfway between the two centres (5,5) and (25,5).
        let hit = hit_test(&boxes, Point::new(15.0, 5.0), ScrollOffset::ORIGIN);

        assert_eq!(hit, Some(0));
    }

    #[test]
    fn test_far_click_snaps_to_nearest_slot() {
        let boxes = [unit_box(0.0, 0.0, 0), unit_box(20.0, 0.0, 1), unit_box(40.0, 0.0, 2)];

        let hit = hit_test(&boxes, Point::new(900.0, 7.0), ScrollOffset::ORIGIN);

        assert_eq!(hit, Some(2));
    }

    #[test]
    fn test_click_on_empty_line_lands_on_its_sentinel() {
        let boxes = setup("A\n\nB", ScrollOffset::ORIGIN);
        let sentinel = boxes.iter().find(|b| b.index == 2).unwrap();

        let hit = hit_test(&boxes, sentinel.screen_center(ScrollOffset::ORIGIN), ScrollOffset::ORIGIN);

        assert_eq!(hit, Some(2));
    }
}

//! Current page from viewport overlap

use std::ops::RangeInclusive;

use super::{LayoutMode, PageSlot, ScrollOffset};
use crate::mapping::actual_rect;
use crate::{DeviceRect, Size};

/// Pages that take part in painting and hit testing
///
/// Continuous modes use every page; single mode only the current one.
pub fn active_range(
    mode: LayoutMode,
    page_count: usize,
    current_page: i32,
) -> Option<RangeInclusive<usize>> {
    if page_count == 0 {
        return None;
    }

    match mode {
        LayoutMode::Single => {
            let current = usize::try_from(current_page).ok()?;
            (current < page_count).then(|| current..=current)
        }
        _ => Some(0..=page_count - 1),
    }
}

/// Page whose actual rect covers the most viewport area, or -1
///
/// Ties keep the lowest index. Pages that do not touch the viewport never win.
pub fn resolve_current_page(
    slots: &[PageSlot],
    scroll: ScrollOffset,
    viewport: Size,
    range: Option<RangeInclusive<usize>>,
) -> i32 {
    let Some(range) = range else {
        return -1;
    };

    let view = DeviceRect::new(0, 0, viewport.width as i32, viewport.height as i32);
    let mut best: i32 = -1;
    let mut best_area: i64 = 0;

    for index in range {
        let Some(slot) = slots.get(index) else {
            break;
        };
        let area = actual_rect(&slot.rect, scroll)
            .intersection(&view)
            .map_or(0, |r| r.area());
        if area > best_area {
            best_area = area;
            best = index as i32;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageRotation;
    use crate::{DevicePoint, Rect};

    fn slots(rects: &[Rect]) -> Vec<PageSlot> {
        rects
            .iter()
            .map(|rect| PageSlot {
                size: rect.size(),
                rotation: PageRotation::Rotate0,
                rect: *rect,
            })
            .collect()
    }

    fn stacked(count: usize) -> Vec<PageSlot> {
        let rects: Vec<Rect> = (0..count)
            .map(|i| Rect::new(0.0, i as f32 * 100.0, 100.0, 100.0))
            .collect();
        slots(&rects)
    }

    #[test]
    fn test_active_range() {
        assert_eq!(active_range(LayoutMode::Vertical, 0, 0), None);
        assert_eq!(active_range(LayoutMode::Vertical, 4, -1), Some(0..=3));
        assert_eq!(active_range(LayoutMode::Single, 4, 2), Some(2..=2));
        assert_eq!(active_range(LayoutMode::Single, 4, -1), None);
        assert_eq!(active_range(LayoutMode::Single, 4, 9), None);
    }

    #[test]
    fn test_largest_overlap_wins() {
        let pages = stacked(3);
        let viewport = Size::new(100.0, 100.0);
        let range = active_range(LayoutMode::Vertical, 3, 0);

        assert_eq!(
            resolve_current_page(&pages, DevicePoint::new(0, 0), viewport, range.clone()),
            0
        );
        assert_eq!(
            resolve_current_page(&pages, DevicePoint::new(0, 170), viewport, range),
            2
        );
    }

    #[test]
    fn test_tie_keeps_lowest_index() {
        let pages = stacked(3);
        let range = active_range(LayoutMode::Vertical, 3, 0);
        // Pages 0 and 1 each show 50 rows
        let current =
            resolve_current_page(&pages, DevicePoint::new(0, 50), Size::new(100.0, 100.0), range);
        assert_eq!(current, 0);
    }

    #[test]
    fn test_no_visible_page() {
        let pages = stacked(2);
        let range = active_range(LayoutMode::Vertical, 2, 0);
        let current =
            resolve_current_page(&pages, DevicePoint::new(0, 5000), Size::new(100.0, 100.0), range);
        assert_eq!(current, -1);

        assert_eq!(
            resolve_current_page(&[], DevicePoint::default(), Size::new(100.0, 100.0), None),
            -1
        );
    }

    #[test]
    fn test_zero_area_pages_are_skipped() {
        let pages = slots(&[Rect::new(0.0, 0.0, 0.0, 0.0), Rect::new(0.0, 0.0, 10.0, 10.0)]);
        let range = active_range(LayoutMode::Vertical, 2, 0);
        let current =
            resolve_current_page(&pages, DevicePoint::default(), Size::new(100.0, 100.0), range);
        assert_eq!(current, 1);
    }

    #[test]
    fn test_single_mode_only_checks_current() {
        let pages = stacked(3);
        let range = active_range(LayoutMode::Single, 3, 2);
        // Page 0 fills the viewport but is outside the active range
        let current =
            resolve_current_page(&pages, DevicePoint::default(), Size::new(100.0, 100.0), range);
        assert_eq!(current, -1);
    }
}

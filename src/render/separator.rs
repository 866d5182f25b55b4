//! Separator lines between pages

use std::ops::RangeInclusive;

use smallvec::SmallVec;

use crate::layout::{LayoutMode, Margin};
use crate::{DevicePoint, DeviceRect};

/// Line segment in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separator {
    pub from: DevicePoint,
    pub to: DevicePoint,
}

impl Separator {
    pub fn new(from: DevicePoint, to: DevicePoint) -> Self {
        Self { from, to }
    }

    /// Line along the gap below a page
    fn below(rect: &DeviceRect, margin: &Margin) -> Self {
        let y = rect.bottom().saturating_add(margin.bottom as i32);
        Self::new(DevicePoint::new(rect.x, y), DevicePoint::new(rect.right(), y))
    }

    /// Line along the gap right of a page
    fn right_of(rect: &DeviceRect, margin: &Margin) -> Self {
        let x = rect.right().saturating_add(margin.right as i32);
        Self::new(DevicePoint::new(x, rect.y), DevicePoint::new(x, rect.bottom()))
    }

    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }
}

/// Separators drawn after one page
///
/// `last_page` is the final page of the active range, which never gets one.
pub fn separators_for_page(
    rect: &DeviceRect,
    page: usize,
    last_page: usize,
    mode: LayoutMode,
    tile_count: usize,
    margin: &Margin,
) -> SmallVec<[Separator; 2]> {
    let mut lines = SmallVec::new();
    if page >= last_page {
        return lines;
    }

    match mode {
        LayoutMode::Single => {}
        LayoutMode::Vertical => lines.push(Separator::below(rect, margin)),
        LayoutMode::Horizontal => lines.push(Separator::right_of(rect, margin)),
        LayoutMode::TiledVertical => {
            let tiles = tile_count.max(1);
            if (page + 1) % tiles != 0 {
                lines.push(Separator::right_of(rect, margin));
            }
            if page + tiles <= last_page {
                lines.push(Separator::below(rect, margin));
            }
        }
    }

    lines
}

/// Separators for every page in `range`
///
/// `actual_rects` is indexed by page number.
pub fn compute_separators(
    actual_rects: &[DeviceRect],
    mode: LayoutMode,
    tile_count: usize,
    range: RangeInclusive<usize>,
    margin: &Margin,
) -> Vec<Separator> {
    let last_page = *range.end();
    range
        .filter_map(|page| actual_rects.get(page).map(|rect| (page, rect)))
        .flat_map(|(page, rect)| {
            separators_for_page(rect, page, last_page, mode, tile_count, margin)
        })
        .collect()
}

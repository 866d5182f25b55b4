//! Page placement for every layout mode
//!
//! Layout is always recomputed wholesale: each pass rewrites the placement
//! rect of every page and returns the total scrollable extent.

use super::fit::{align_in_viewport, render_size};
use super::{LayoutMode, ViewerConfig};
use crate::document::PageRotation;
use crate::{Rect, Size};

/// Per-page arena entry, indexed by page number
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSlot {
    /// Intrinsic size at the original rotation
    pub size: Size,
    /// Rotation applied by the viewer on top of the original one
    pub rotation: PageRotation,
    /// Placement in content space, margins already removed
    pub rect: Rect,
}

impl PageSlot {
    pub fn new(size: Size, rotation: PageRotation) -> Self {
        Self {
            size,
            rotation,
            rect: Rect::default(),
        }
    }

    /// Size as displayed, after the rotation delta
    pub fn oriented_size(&self) -> Size {
        if self.rotation.swaps_axes() {
            self.size.transposed()
        } else {
            self.size
        }
    }
}

/// Result of a standalone layout pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub rects: Vec<Rect>,
    pub extent: Size,
}

/// Inputs shared by every layout strategy
struct LayoutContext<'a> {
    config: &'a ViewerConfig,
    viewport: Size,
    current_page: i32,
}

impl LayoutContext<'_> {
    fn render_size(&self, slot: &PageSlot) -> Size {
        render_size(
            slot.oriented_size(),
            self.config.fit_mode,
            self.viewport,
            self.config.zoom,
        )
    }

    /// Slot at (x, y) of the given size, shrunk by the margin on all sides
    fn inset(&self, x: f32, y: f32, size: Size) -> Rect {
        let m = &self.config.margin;
        Rect::new(
            x + m.left,
            y + m.top,
            (size.width - m.left - m.right).max(0.0),
            (size.height - m.top - m.bottom).max(0.0),
        )
    }
}

type LayoutFn = fn(&mut [PageSlot], &LayoutContext<'_>) -> Size;

impl LayoutMode {
    fn strategy(self) -> LayoutFn {
        match self {
            LayoutMode::Single => layout_single,
            LayoutMode::Vertical => layout_vertical,
            LayoutMode::Horizontal => layout_horizontal,
            LayoutMode::TiledVertical => layout_tiled_vertical,
        }
    }
}

/// Place every page and return the total content extent
///
/// `current_page` only matters in [`LayoutMode::Single`], where the extent
/// is that of the current page alone.
pub fn compute_layout(
    slots: &mut [PageSlot],
    config: &ViewerConfig,
    viewport: Size,
    current_page: i32,
) -> Size {
    if slots.is_empty() {
        return Size::ZERO;
    }

    let ctx = LayoutContext {
        config,
        viewport,
        current_page,
    };
    let extent = (config.layout_mode.strategy())(slots, &ctx);

    log::trace!(
        "layout {:?}/{:?}: {} pages in {}x{} viewport -> extent {}x{}",
        config.layout_mode,
        config.fit_mode,
        slots.len(),
        viewport.width,
        viewport.height,
        extent.width,
        extent.height
    );

    extent
}

/// Layout a plain list of unrotated page sizes
pub fn layout_pages(
    sizes: &[Size],
    config: &ViewerConfig,
    viewport: Size,
    current_page: i32,
) -> Layout {
    let mut slots: Vec<PageSlot> = sizes
        .iter()
        .map(|size| PageSlot::new(*size, PageRotation::Rotate0))
        .collect();
    let extent = compute_layout(&mut slots, config, viewport, current_page);
    Layout {
        rects: slots.iter().map(|slot| slot.rect).collect(),
        extent,
    }
}

fn layout_vertical(slots: &mut [PageSlot], ctx: &LayoutContext<'_>) -> Size {
    let mut y: f32 = 0.0;
    let mut width: f32 = 0.0;

    for slot in slots.iter_mut() {
        let size = ctx.render_size(slot);
        let location = align_in_viewport(size, ctx.viewport, ctx.config.alignment);
        slot.rect = ctx.inset(location.x, y, size);
        y += size.height;
        width = width.max(size.width);
    }

    Size::new(width, y)
}

fn layout_horizontal(slots: &mut [PageSlot], ctx: &LayoutContext<'_>) -> Size {
    let mut x: f32 = 0.0;
    let mut height: f32 = 0.0;

    for slot in slots.iter_mut() {
        let size = ctx.render_size(slot);
        let location = align_in_viewport(size, ctx.viewport, ctx.config.alignment);
        slot.rect = ctx.inset(x, location.y, size);
        x += size.width;
        height = height.max(size.height);
    }

    Size::new(x, height)
}

fn layout_tiled_vertical(slots: &mut [PageSlot], ctx: &LayoutContext<'_>) -> Size {
    let tiles = ctx.config.tile_count.max(1);
    let divisor = tiles as f32;
    let mut y: f32 = 0.0;
    let mut width: f32 = 0.0;

    for row in slots.chunks_mut(tiles) {
        let mut x: f32 = 0.0;
        let mut row_height: f32 = 0.0;

        for slot in row.iter_mut() {
            let full = ctx.render_size(slot);
            // Thumbnail scaling: both axes shrink by the tile count
            let size = Size::new(full.width / divisor, full.height / divisor);
            slot.rect = ctx.inset(x, y, size);
            x += size.width;
            row_height = row_height.max(size.height);
        }

        width = width.max(x);
        y += row_height;
    }

    Size::new(width, y)
}

fn layout_single(slots: &mut [PageSlot], ctx: &LayoutContext<'_>) -> Size {
    let mut extent = Size::ZERO;

    for (index, slot) in slots.iter_mut().enumerate() {
        let size = ctx.render_size(slot);
        let location = align_in_viewport(size, ctx.viewport, ctx.config.alignment);
        slot.rect = ctx.inset(location.x, location.y, size);
        if index as i32 == ctx.current_page {
            extent = size;
        }
    }

    extent
}

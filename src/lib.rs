//! Page-Viewer: layout and coordinate-mapping core for a multi-page document viewer
//!
//! This crate provides the geometry engine behind a scrollable page viewer:
//! - Page placement for single, vertical, horizontal and tiled layouts
//! - Fit-width / fit-height / fit-both / fixed-zoom sizing
//! - Device <-> page coordinate mapping with per-page rotation
//! - Current-page tracking from viewport overlap
//! - Cross-page text selection and separator lines for painting

pub mod document;
pub mod events;
pub mod layout;
pub mod mapping;
pub mod render;
pub mod selection;
pub mod viewer;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::{RenderBuffer, ViewerError, WasmViewer};

// Re-export primary types
pub use document::{
    DocumentSource, InMemoryDocument, PageBitmap, PageRotation, PageSpec, RenderFlags,
};
pub use events::{Property, ViewerEvent};
pub use layout::{Alignment, FitMode, Layout, LayoutMode, Margin, PageSlot, ViewerConfig};
pub use render::{DisplayItem, DisplayList, DisplayPage, Separator};
pub use selection::{SelectionRange, SelectionState};
pub use viewer::{PointerButton, Viewer};

/// Point in content or page space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Swap width and height (quarter-turn rotation)
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// True when either side is zero, negative or not a number
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Float rectangle in content space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Integer point in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DevicePoint {
    pub x: i32,
    pub y: i32,
}

impl DevicePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DeviceRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Truncate a content-space rect to whole pixels
    pub fn truncate(rect: &Rect) -> Self {
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width as i32,
            height: rect.height as i32,
        }
    }

    /// Rect spanning two corners in any order
    pub fn from_corners(a: DevicePoint, b: DevicePoint) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.max(b.x).saturating_sub(x),
            height: a.y.max(b.y).saturating_sub(y),
        }
    }

    /// Right edge, saturating at `i32::MAX` for oversized rects
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: DevicePoint) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn intersects(&self, other: &DeviceRect) -> bool {
        other.x < self.right()
            && self.x < other.right()
            && other.y < self.bottom()
            && self.y < other.bottom()
    }

    /// Overlapping region, `None` when the rects do not overlap
    pub fn intersection(&self, other: &DeviceRect) -> Option<DeviceRect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(DeviceRect::new(
            x,
            y,
            right.saturating_sub(x),
            bottom.saturating_sub(y),
        ))
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }
}

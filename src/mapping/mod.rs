//! Device <-> page coordinate mapping
//!
//! Page space has its origin at the bottom-left corner of the unrotated page
//! with y growing upward, measured in document units. Device space is the
//! viewport in pixels, origin top-left, y growing downward.
//!
//! A page is displayed inside its actual rect (placement rect truncated to
//! whole pixels, then shifted by the scroll offset). The rotation delta turns
//! the page clockwise inside that rect. The mapping is affine:
//!
//! ```text
//! device = P0 + u * (P2 - P0) + v * (P1 - P0)      u = x / width, v = y / height
//! ```
//!
//! where P0, P1 and P2 are where the page's bottom-left, top-left and
//! bottom-right corners land on screen.

use crate::document::PageRotation;
use crate::layout::PageSlot;
use crate::{DevicePoint, DeviceRect, Point, Rect, Size};

/// Placement rect as seen on screen for a given scroll offset
pub fn actual_rect(placement: &Rect, scroll: DevicePoint) -> DeviceRect {
    DeviceRect::truncate(placement).translate(-scroll.x, -scroll.y)
}

/// Affine map between one page and its on-screen rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    pub rect: DeviceRect,
    pub page_size: Size,
    pub rotation: PageRotation,
}

#[derive(Debug, Clone, Copy)]
struct Vec2 {
    x: f64,
    y: f64,
}

impl Vec2 {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl PageTransform {
    pub fn new(rect: DeviceRect, page_size: Size, rotation: PageRotation) -> Self {
        Self {
            rect,
            page_size,
            rotation,
        }
    }

    /// Transform of a laid-out page at the given scroll offset
    pub fn for_slot(slot: &PageSlot, scroll: DevicePoint) -> Self {
        Self::new(actual_rect(&slot.rect, scroll), slot.size, slot.rotation)
    }

    /// Device positions of the page's bottom-left, top-left and bottom-right corners
    fn corners(&self) -> (Vec2, Vec2, Vec2) {
        let l = f64::from(self.rect.x);
        let t = f64::from(self.rect.y);
        let r = f64::from(self.rect.right());
        let b = f64::from(self.rect.bottom());

        match self.rotation {
            PageRotation::Rotate0 => (Vec2::new(l, b), Vec2::new(l, t), Vec2::new(r, b)),
            PageRotation::Rotate90 => (Vec2::new(l, t), Vec2::new(r, t), Vec2::new(l, b)),
            PageRotation::Rotate180 => (Vec2::new(r, t), Vec2::new(r, b), Vec2::new(l, t)),
            PageRotation::Rotate270 => (Vec2::new(r, b), Vec2::new(l, b), Vec2::new(r, t)),
        }
    }

    /// Page point to fractional device coordinates
    pub fn page_to_device_f(&self, point: Point) -> Point {
        if self.page_size.is_degenerate() {
            return Point::new(self.rect.x as f32, self.rect.y as f32);
        }

        let (p0, p1, p2) = self.corners();
        let u = f64::from(point.x) / f64::from(self.page_size.width);
        let v = f64::from(point.y) / f64::from(self.page_size.height);

        let x = p0.x + u * (p2.x - p0.x) + v * (p1.x - p0.x);
        let y = p0.y + u * (p2.y - p0.y) + v * (p1.y - p0.y);
        Point::new(x as f32, y as f32)
    }

    /// Page point to device pixels; rounding happens only here
    pub fn page_to_device(&self, point: Point) -> DevicePoint {
        let device = self.page_to_device_f(point);
        DevicePoint::new(device.x.round() as i32, device.y.round() as i32)
    }

    /// Fractional device coordinates back to page space, without a bounds test
    ///
    /// Returns `None` only when the rect or the page has no area.
    pub fn device_to_page_f(&self, device: Point) -> Option<Point> {
        if self.page_size.is_degenerate() {
            return None;
        }

        let (p0, p1, p2) = self.corners();
        let eu = Vec2::new(p2.x - p0.x, p2.y - p0.y);
        let ev = Vec2::new(p1.x - p0.x, p1.y - p0.y);
        let det = eu.x * ev.y - eu.y * ev.x;
        if det == 0.0 {
            return None;
        }

        let dx = f64::from(device.x) - p0.x;
        let dy = f64::from(device.y) - p0.y;
        let u = (dx * ev.y - dy * ev.x) / det;
        let v = (eu.x * dy - eu.y * dx) / det;

        Some(Point::new(
            (u * f64::from(self.page_size.width)) as f32,
            (v * f64::from(self.page_size.height)) as f32,
        ))
    }

    /// Device pixel to page space, `None` when the pixel is outside the page
    pub fn device_to_page(&self, device: DevicePoint) -> Option<Point> {
        if !self.rect.contains(device) {
            return None;
        }
        self.device_to_page_f(Point::new(device.x as f32, device.y as f32))
    }
}

/// Map a device pixel into a page, if it lands on it
pub fn device_to_page(
    device: DevicePoint,
    rect: DeviceRect,
    page_size: Size,
    rotation: PageRotation,
) -> Option<Point> {
    PageTransform::new(rect, page_size, rotation).device_to_page(device)
}

/// Map a page point onto the screen
pub fn page_to_device(
    point: Point,
    rect: DeviceRect,
    page_size: Size,
    rotation: PageRotation,
) -> DevicePoint {
    PageTransform::new(rect, page_size, rotation).page_to_device(point)
}

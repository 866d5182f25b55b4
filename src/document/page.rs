//! Per-page value types shared with the document collaborator

use serde::{Deserialize, Serialize};

/// Page rotation in clockwise quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageRotation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl PageRotation {
    /// Build from any number of quarter turns, wrapping modulo 4
    pub fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => PageRotation::Rotate0,
            1 => PageRotation::Rotate90,
            2 => PageRotation::Rotate180,
            _ => PageRotation::Rotate270,
        }
    }

    pub fn quarter_turns(self) -> i32 {
        match self {
            PageRotation::Rotate0 => 0,
            PageRotation::Rotate90 => 1,
            PageRotation::Rotate180 => 2,
            PageRotation::Rotate270 => 3,
        }
    }

    /// Rotation applied on top of the original one: `(current - original) mod 4`
    pub fn delta(current: PageRotation, original: PageRotation) -> Self {
        Self::from_quarter_turns(current.quarter_turns() - original.quarter_turns())
    }

    /// True for 90 and 270 degrees, where width and height trade places
    pub fn swaps_axes(self) -> bool {
        self.quarter_turns() % 2 == 1
    }
}

/// Flags forwarded untouched to the page renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderFlags(pub u32);

impl RenderFlags {
    pub const NONE: RenderFlags = RenderFlags(0);
    /// Draw annotations
    pub const ANNOTATIONS: RenderFlags = RenderFlags(0x01);
    /// Sub-pixel text rendering
    pub const LCD_TEXT: RenderFlags = RenderFlags(0x02);
    /// Render in grayscale
    pub const GRAYSCALE: RenderFlags = RenderFlags(0x08);
    /// Render for printing
    pub const PRINTING: RenderFlags = RenderFlags(0x800);

    pub fn contains(self, other: RenderFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for RenderFlags {
    type Output = RenderFlags;

    fn bitor(self, rhs: RenderFlags) -> RenderFlags {
        RenderFlags(self.0 | rhs.0)
    }
}

/// Glyph bounding box in page space (y grows upward, so `top > bottom`)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TextRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Rasterized page returned by the renderer (ARGB, row-major)
#[derive(Debug, Clone, PartialEq)]
pub struct PageBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl PageBitmap {
    /// Bitmap filled with a single color
    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![argb; width as usize * height as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_delta_wraps() {
        assert_eq!(
            PageRotation::delta(PageRotation::Rotate0, PageRotation::Rotate90),
            PageRotation::Rotate270
        );
        assert_eq!(
            PageRotation::delta(PageRotation::Rotate270, PageRotation::Rotate90),
            PageRotation::Rotate180
        );
        assert_eq!(PageRotation::from_quarter_turns(-5), PageRotation::Rotate270);
        assert_eq!(PageRotation::from_quarter_turns(6), PageRotation::Rotate180);
    }

    #[test]
    fn test_render_flags() {
        let flags = RenderFlags::ANNOTATIONS | RenderFlags::GRAYSCALE;
        assert!(flags.contains(RenderFlags::ANNOTATIONS));
        assert!(!flags.contains(RenderFlags::PRINTING));
    }
}

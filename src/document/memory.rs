//! Fixed-pitch in-memory document
//!
//! Characters are laid out left to right, top to bottom on a grid inside
//! each page, which makes glyph geometry predictable for tests and for the
//! JS playground.

use super::{DocumentSource, PageBitmap, PageRotation, RenderFlags, TextRect};
use crate::{Point, Size};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Glyph advance in page units
pub const CHAR_WIDTH: f32 = 6.0;

/// Line pitch in page units
pub const LINE_HEIGHT: f32 = 12.0;

/// Blank border around the text grid
pub const TEXT_INSET: f32 = 36.0;

/// Opaque white
const PAGE_BACKGROUND: u32 = 0xFFFF_FFFF;

/// Serializable page description (used by the JS bridge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rotation: PageRotation,
}

#[derive(Debug, Clone)]
struct MemoryPage {
    size: Size,
    chars: Vec<char>,
    original_rotation: PageRotation,
}

impl MemoryPage {
    fn columns(&self) -> usize {
        let usable = self.size.width - 2.0 * TEXT_INSET;
        if usable < CHAR_WIDTH {
            1
        } else {
            (usable / CHAR_WIDTH).floor() as usize
        }
    }

    fn char_rect(&self, index: usize) -> TextRect {
        let columns = self.columns();
        let col = index % columns;
        let row = index / columns;
        let left = TEXT_INSET + col as f32 * CHAR_WIDTH;
        let top = self.size.height - TEXT_INSET - row as f32 * LINE_HEIGHT;
        TextRect::new(left, top, left + CHAR_WIDTH, top - LINE_HEIGHT)
    }

    fn clamp_range(&self, start: usize, len: usize) -> (usize, usize) {
        let start = start.min(self.chars.len());
        let end = start.saturating_add(len).min(self.chars.len());
        (start, end)
    }
}

/// Document kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    pages: Vec<MemoryPage>,
    /// Rotations changed after loading, keyed by page index
    rotations: FxHashMap<usize, PageRotation>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank pages of the given sizes
    pub fn from_sizes(sizes: &[Size]) -> Self {
        let mut doc = Self::new();
        for size in sizes {
            doc.push_page(*size, "");
        }
        doc
    }

    /// Pages described by [`PageSpec`]s
    pub fn from_specs(specs: &[PageSpec]) -> Self {
        let mut doc = Self::new();
        for spec in specs {
            doc.pages.push(MemoryPage {
                size: Size::new(spec.width, spec.height),
                chars: spec.text.chars().collect(),
                original_rotation: spec.rotation,
            });
        }
        doc
    }

    /// Append a page with its text
    pub fn push_page(&mut self, size: Size, text: &str) -> &mut Self {
        self.pages.push(MemoryPage {
            size,
            chars: text.chars().collect(),
            original_rotation: PageRotation::Rotate0,
        });
        self
    }

    fn page(&self, page: usize) -> Option<&MemoryPage> {
        self.pages.get(page)
    }
}

impl DocumentSource for InMemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, page: usize) -> Size {
        self.page(page).map(|p| p.size).unwrap_or(Size::ZERO)
    }

    fn char_count(&self, page: usize) -> usize {
        self.page(page).map(|p| p.chars.len()).unwrap_or(0)
    }

    fn char_index_at(
        &self,
        page: usize,
        point: Point,
        tolerance_x: f32,
        tolerance_y: f32,
    ) -> Option<usize> {
        let page = self.page(page)?;
        let mut best: Option<(usize, f32)> = None;

        for index in 0..page.chars.len() {
            let rect = page.char_rect(index);
            let dx = if point.x < rect.left {
                rect.left - point.x
            } else if point.x > rect.right {
                point.x - rect.right
            } else {
                0.0
            };
            let dy = if point.y > rect.top {
                point.y - rect.top
            } else if point.y < rect.bottom {
                rect.bottom - point.y
            } else {
                0.0
            };

            if dx > tolerance_x || dy > tolerance_y {
                continue;
            }

            let dist = dx * dx + dy * dy;
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((index, dist));
            }
        }

        best.map(|(index, _)| index)
    }

    fn text_rects(&self, page: usize, start: usize, len: usize) -> Vec<TextRect> {
        let Some(page) = self.page(page) else {
            return Vec::new();
        };
        let (start, end) = page.clamp_range(start, len);
        let columns = page.columns();

        // One rect per grid row, like a text engine merging a run of glyphs
        let mut rects: Vec<TextRect> = Vec::new();
        let mut current_row = usize::MAX;
        for index in start..end {
            let rect = page.char_rect(index);
            let row = index / columns;
            match rects.last_mut() {
                Some(last) if row == current_row => last.right = rect.right,
                _ => {
                    rects.push(rect);
                    current_row = row;
                }
            }
        }
        rects
    }

    fn text(&self, page: usize, start: usize, len: usize) -> String {
        let Some(page) = self.page(page) else {
            return String::new();
        };
        let (start, end) = page.clamp_range(start, len);
        page.chars[start..end].iter().collect()
    }

    fn render_page(
        &self,
        page: usize,
        width: u32,
        height: u32,
        rotation: PageRotation,
        flags: RenderFlags,
    ) -> PageBitmap {
        log::trace!(
            "render page {} at {}x{} rotation {:?} flags {:#x}",
            page,
            width,
            height,
            rotation,
            flags.0
        );
        PageBitmap::filled(width, height, PAGE_BACKGROUND)
    }

    fn page_rotation(&self, page: usize) -> PageRotation {
        self.rotations
            .get(&page)
            .copied()
            .unwrap_or_else(|| self.original_rotation(page))
    }

    fn original_rotation(&self, page: usize) -> PageRotation {
        self.page(page)
            .map(|p| p.original_rotation)
            .unwrap_or_default()
    }

    fn set_page_rotation(&mut self, page: usize, rotation: PageRotation) {
        if page < self.pages.len() {
            self.rotations.insert(page, rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter_page(text: &str) -> InMemoryDocument {
        let mut doc = InMemoryDocument::new();
        doc.push_page(Size::new(612.0, 792.0), text);
        doc
    }

    #[test]
    fn test_text_is_clamped() {
        let doc = letter_page("Hello, World!");
        assert_eq!(doc.char_count(0), 13);
        assert_eq!(doc.text(0, 7, 5), "World");
        assert_eq!(doc.text(0, 7, 100), "World!");
        assert_eq!(doc.text(0, 100, 5), "");
        assert_eq!(doc.text(1, 0, 5), "");
    }

    #[test]
    fn test_char_index_at_glyph_center() {
        let doc = letter_page("abcdef");
        let rect = doc.pages[0].char_rect(3);
        let center = Point::new((rect.left + rect.right) / 2.0, (rect.top + rect.bottom) / 2.0);
        assert_eq!(doc.char_index_at(0, center, 0.0, 0.0), Some(3));
    }

    #[test]
    fn test_char_index_at_uses_tolerance() {
        let doc = letter_page("abc");
        // Just above the first row of glyphs
        let above = Point::new(TEXT_INSET + 1.0, 792.0 - TEXT_INSET + 5.0);
        assert_eq!(doc.char_index_at(0, above, 10.0, 10.0), Some(0));
        assert_eq!(doc.char_index_at(0, above, 1.0, 1.0), None);

        // Far away from any glyph
        assert_eq!(doc.char_index_at(0, Point::new(500.0, 10.0), 10.0, 10.0), None);
    }

    #[test]
    fn test_text_rects_merge_per_row() {
        let doc = letter_page(&"x".repeat(200));
        let columns = doc.pages[0].columns();
        assert_eq!(columns, 90);

        let rects = doc.text_rects(0, 85, 10);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].left, TEXT_INSET + 85.0 * CHAR_WIDTH);
        assert_eq!(rects[0].right, TEXT_INSET + 90.0 * CHAR_WIDTH);
        assert_eq!(rects[1].left, TEXT_INSET);
        assert_eq!(rects[1].top, 792.0 - TEXT_INSET - LINE_HEIGHT);
    }

    #[test]
    fn test_rotation_overrides() {
        let mut doc = InMemoryDocument::from_specs(&[PageSpec {
            width: 100.0,
            height: 200.0,
            text: String::new(),
            rotation: PageRotation::Rotate90,
        }]);
        assert_eq!(doc.rotation_delta(0), PageRotation::Rotate0);

        doc.set_page_rotation(0, PageRotation::Rotate180);
        assert_eq!(doc.page_rotation(0), PageRotation::Rotate180);
        assert_eq!(doc.rotation_delta(0), PageRotation::Rotate90);

        // Out of range pages are ignored
        doc.set_page_rotation(5, PageRotation::Rotate90);
        assert_eq!(doc.page_rotation(5), PageRotation::Rotate0);
    }

    #[test]
    fn test_page_spec_from_json() {
        let specs: Vec<PageSpec> =
            serde_json::from_str(r#"[{"width": 612, "height": 792, "text": "hi"}]"#).unwrap();
        assert_eq!(specs[0].rotation, PageRotation::Rotate0);
        let doc = InMemoryDocument::from_specs(&specs);
        assert_eq!(doc.text(0, 0, 2), "hi");
    }
}

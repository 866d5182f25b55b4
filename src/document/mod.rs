//! Document capabilities consumed by the viewer
//!
//! The viewer never parses or rasterizes documents itself. Everything it
//! needs from the outside world is expressed by [`DocumentSource`]: page
//! sizes, text queries, rotation state and a "render into a bitmap" call.

mod memory;
mod page;

pub use memory::{InMemoryDocument, PageSpec};
pub use page::{PageBitmap, PageRotation, RenderFlags, TextRect};

use crate::{Point, Size};

/// Proximity tolerance (page units) used when hit-testing glyphs
pub const CHAR_HIT_TOLERANCE: f32 = 10.0;

/// Capabilities provided by the document collaborator
///
/// Page indices passed in are always within `0..page_count()`. Character
/// ranges may run past the end of a page; implementations clamp them.
pub trait DocumentSource {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Intrinsic page size at the page's original rotation
    fn page_size(&self, page: usize) -> Size;

    /// Number of characters on the page
    fn char_count(&self, page: usize) -> usize;

    /// Character under (or within tolerance of) a page-space point
    fn char_index_at(
        &self,
        page: usize,
        point: Point,
        tolerance_x: f32,
        tolerance_y: f32,
    ) -> Option<usize>;

    /// Page-space rectangles covering `len` characters from `start`
    fn text_rects(&self, page: usize, start: usize, len: usize) -> Vec<TextRect>;

    /// Text of `len` characters from `start`
    fn text(&self, page: usize, start: usize, len: usize) -> String;

    /// Rasterize a page into a bitmap of the given size
    fn render_page(
        &self,
        page: usize,
        width: u32,
        height: u32,
        rotation: PageRotation,
        flags: RenderFlags,
    ) -> PageBitmap;

    /// Current page rotation
    fn page_rotation(&self, page: usize) -> PageRotation;

    /// Rotation the page had when the document was opened
    fn original_rotation(&self, page: usize) -> PageRotation;

    /// Rotate a page
    fn set_page_rotation(&mut self, page: usize, rotation: PageRotation);

    /// Rotation applied by the viewer on top of the original one
    fn rotation_delta(&self, page: usize) -> PageRotation {
        PageRotation::delta(self.page_rotation(page), self.original_rotation(page))
    }
}

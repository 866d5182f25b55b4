//! Flat buffer protocol for zero-copy WASM bridge
//!
//! Binary format for one painted frame:
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header (offset table for random access):
//! [0]     MAGIC (0x50565244 = "PVRD" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     page_count (visible pages in this frame)
//! [3]     separator_count
//! [4]     selection_count
//! [5]     current_page (u32::MAX when there is none)
//! [6]     u32_separator_offset (0 if no separators)
//! [7]     u32_selection_offset (0 if no selections)
//! [8]     f32_separator_offset (0 if no separators)
//! [9]     f32_selection_offset (0 if no selections)
//! [10..]  page data...
//!
//! Per-page: [page_index, rotation (quarter turns), render_flags, flags]
//!   flags: bit0=rendered (rect has area), bit1=highlight as current page
//!
//! At u32_separator_offset: per-separator [orientation] (0 horizontal, 1 vertical)
//! At u32_selection_offset: per-selection [page_index]
//! ```
//!
//! ## f32 Buffer Layout:
//! ```text
//! Per-page: [x, y, width, height]
//! At f32_separator_offset (for each separator): [x1, y1, x2, y2]
//! At f32_selection_offset (for each selection): [x, y, width, height]
//! ```

use crate::render::{DisplayItem, DisplayList, Separator};
use crate::DeviceRect;

/// Magic number for format validation: "PVRD" (Page Viewer ReNDer)
pub const MAGIC: u32 = 0x50565244;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 10;

/// Page flags bitmask
pub const FLAG_RENDERED: u32 = 0b0001;
pub const FLAG_CURRENT_HIGHLIGHT: u32 = 0b0010;

/// Separator orientation opcodes
pub const SEPARATOR_HORIZONTAL: u32 = 0;
pub const SEPARATOR_VERTICAL: u32 = 1;

/// Marker for "no current page"
pub const NO_PAGE: u32 = u32::MAX;

/// Number of u32 values per page: [page_index, rotation, render_flags, flags]
pub const U32_PER_PAGE: usize = 4;

/// Number of f32 values per page: [x, y, width, height]
pub const F32_PER_PAGE: usize = 4;

/// Number of u32 values per separator
pub const U32_PER_SEPARATOR: usize = 1; // orientation

/// Number of f32 values per separator geometry
pub const F32_PER_SEPARATOR: usize = 4; // x1, y1, x2, y2

/// Number of u32 values per selection
pub const U32_PER_SELECTION: usize = 1; // page_index

/// Number of f32 values per selection geometry
pub const F32_PER_SELECTION: usize = 4; // x, y, width, height

/// Pending selection data (written to buffers in finalize())
struct PendingSelection {
    rect: DeviceRect,
    page_index: usize,
}

/// Render buffer for zero-copy WASM transfer
pub struct RenderBuffer {
    /// Integer data (indices, counts, offsets, opcodes)
    pub u32_data: Vec<u32>,
    /// Float data (positions, dimensions)
    pub f32_data: Vec<f32>,

    // Written in finalize() so offsets stay correct regardless of call order
    pending_separators: Vec<Separator>,
    pending_selections: Vec<PendingSelection>,
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            u32_data: Vec::with_capacity(256),
            f32_data: Vec::with_capacity(256),
            pending_separators: Vec::new(),
            pending_selections: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.u32_data.clear();
        self.f32_data.clear();
        self.pending_separators.clear();
        self.pending_selections.clear();
    }

    /// Pre-allocate buffers so JS-held pointers survive the frame
    ///
    /// Call before write_header() with exact or estimated counts.
    pub fn prepare(&mut self, pages: usize, separators: usize, selections: usize) {
        let u32_target = HEADER_SIZE
            + pages * U32_PER_PAGE
            + separators * U32_PER_SEPARATOR
            + selections * U32_PER_SELECTION
            + 32;
        let f32_target = pages * F32_PER_PAGE
            + separators * F32_PER_SEPARATOR
            + selections * F32_PER_SELECTION
            + 32;

        // Reuse buffers if capacity is sufficient
        if self.u32_data.capacity() < u32_target {
            self.u32_data = Vec::with_capacity(u32_target);
        } else {
            self.u32_data.clear();
        }

        if self.f32_data.capacity() < f32_target {
            self.f32_data = Vec::with_capacity(f32_target);
        } else {
            self.f32_data.clear();
        }

        self.pending_separators.clear();
        self.pending_selections.clear();
    }

    /// Write header with offset table placeholders
    pub fn write_header(&mut self, page_count: u32, current_page: i32) {
        self.u32_data.push(MAGIC); // [0] magic number
        self.u32_data.push(SCHEMA_VERSION); // [1] schema version
        self.u32_data.push(page_count); // [2] page_count
        self.u32_data.push(0); // [3] separator_count (placeholder)
        self.u32_data.push(0); // [4] selection_count (placeholder)
        self.u32_data
            .push(u32::try_from(current_page).unwrap_or(NO_PAGE)); // [5] current_page
        self.u32_data.push(0); // [6] u32_separator_offset (placeholder)
        self.u32_data.push(0); // [7] u32_selection_offset (placeholder)
        self.u32_data.push(0); // [8] f32_separator_offset (placeholder)
        self.u32_data.push(0); // [9] f32_selection_offset (placeholder)
    }

    /// Write one page record
    pub fn write_page(
        &mut self,
        page_index: usize,
        rect: DeviceRect,
        rotation: u32,
        render_flags: u32,
        flags: u32,
    ) {
        self.u32_data.push(page_index as u32);
        self.u32_data.push(rotation);
        self.u32_data.push(render_flags);
        self.u32_data.push(flags);

        self.f32_data.push(rect.x as f32);
        self.f32_data.push(rect.y as f32);
        self.f32_data.push(rect.width as f32);
        self.f32_data.push(rect.height as f32);
    }

    /// Add pending separator (written in finalize())
    pub fn write_separator(&mut self, separator: Separator) {
        self.pending_separators.push(separator);
    }

    /// Add pending selection rectangle (written in finalize())
    pub fn write_selection(&mut self, rect: DeviceRect, page_index: usize) {
        self.pending_selections.push(PendingSelection { rect, page_index });
    }

    /// Finalize buffer: write pending separators/selections and synchronize header
    ///
    /// Must be called after all pages are written.
    pub fn finalize(&mut self) {
        if self.u32_data.len() < HEADER_SIZE {
            return;
        }

        if !self.pending_separators.is_empty() {
            self.u32_data[6] = self.u32_data.len() as u32;
            self.u32_data[8] = self.f32_data.len() as u32;

            for separator in &self.pending_separators {
                self.u32_data.push(if separator.is_horizontal() {
                    SEPARATOR_HORIZONTAL
                } else {
                    SEPARATOR_VERTICAL
                });
                self.f32_data.push(separator.from.x as f32);
                self.f32_data.push(separator.from.y as f32);
                self.f32_data.push(separator.to.x as f32);
                self.f32_data.push(separator.to.y as f32);
            }
            self.u32_data[3] = self.pending_separators.len() as u32;
        } else {
            self.u32_data[3] = 0;
            self.u32_data[6] = 0;
            self.u32_data[8] = 0;
        }

        if !self.pending_selections.is_empty() {
            self.u32_data[7] = self.u32_data.len() as u32;
            self.u32_data[9] = self.f32_data.len() as u32;

            for selection in &self.pending_selections {
                self.u32_data.push(selection.page_index as u32);
                self.f32_data.push(selection.rect.x as f32);
                self.f32_data.push(selection.rect.y as f32);
                self.f32_data.push(selection.rect.width as f32);
                self.f32_data.push(selection.rect.height as f32);
            }
            self.u32_data[4] = self.pending_selections.len() as u32;
        } else {
            self.u32_data[4] = 0;
            self.u32_data[7] = 0;
            self.u32_data[9] = 0;
        }

        #[cfg(debug_assertions)]
        self.validate_page_records();
    }

    /// Check that page records end where the trailing sections begin (debug builds only)
    #[cfg(debug_assertions)]
    fn validate_page_records(&self) {
        let page_count = self.u32_data[2] as usize;
        let pages_end = HEADER_SIZE + page_count * U32_PER_PAGE;
        debug_assert!(
            pages_end <= self.u32_data.len(),
            "page records overflow: {} pages need {} u32s, buffer has {}",
            page_count,
            pages_end,
            self.u32_data.len()
        );
        for offset in [self.u32_data[6], self.u32_data[7]] {
            debug_assert!(
                offset == 0 || offset as usize >= pages_end,
                "section offset {} points inside page records ending at {}",
                offset,
                pages_end
            );
        }
    }

    /// Encode a whole display list
    pub fn write_display_list(&mut self, list: &DisplayList, current_page: i32) {
        let selections: usize = list
            .pages
            .iter()
            .map(|page| page.selection_rects().count())
            .sum();
        self.prepare(list.pages.len(), list.separators.len(), selections);
        self.write_header(list.pages.len() as u32, current_page);

        for page in &list.pages {
            let mut flags = 0;
            let mut rotation = 0;
            let mut render_flags = 0;

            for item in &page.items {
                match item {
                    DisplayItem::Page { request, .. } => {
                        flags |= FLAG_RENDERED;
                        rotation = request.rotation.quarter_turns() as u32;
                        render_flags = request.flags.0;
                    }
                    DisplayItem::SelectionRect { rect } => {
                        self.write_selection(*rect, page.page_index);
                    }
                    DisplayItem::CurrentPageHighlight { .. } => {
                        flags |= FLAG_CURRENT_HIGHLIGHT;
                    }
                }
            }

            self.write_page(page.page_index, page.bounds, rotation, render_flags, flags);
        }

        for separator in &list.separators {
            self.write_separator(*separator);
        }

        self.finalize();
    }

    // Accessors for WASM
    // Return u32 instead of usize for explicit WASM contract (wasm32 linear memory uses u32 offsets)

    pub fn u32_ptr(&self) -> u32 {
        self.u32_data.as_ptr() as u32
    }

    pub fn u32_len(&self) -> u32 {
        self.u32_data.len() as u32
    }

    pub fn f32_ptr(&self) -> u32 {
        self.f32_data.as_ptr() as u32
    }

    pub fn f32_len(&self) -> u32 {
        self.f32_data.len() as u32
    }
}

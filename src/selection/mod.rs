//! Cross-page text selection

use crate::document::{DocumentSource, CHAR_HIT_TOLERANCE};
use crate::mapping::PageTransform;
use crate::{DeviceRect, Point};
use serde::{Deserialize, Serialize};

/// Joins the text of consecutive pages
pub const PAGE_TEXT_SEPARATOR: &str = "\r\n";

/// Selection endpoints as stored (anchor first, active end second)
///
/// `start_page < 0` means nothing is selected. An index of -1 marks a press
/// that did not land on a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRange {
    pub start_page: i32,
    pub start_index: i32,
    pub end_page: i32,
    pub end_index: i32,
}

impl Default for SelectionRange {
    fn default() -> Self {
        Self::NONE
    }
}

impl SelectionRange {
    pub const NONE: SelectionRange = SelectionRange {
        start_page: -1,
        start_index: -1,
        end_page: -1,
        end_index: -1,
    };

    pub fn new(start_page: i32, start_index: i32, end_page: i32, end_index: i32) -> Self {
        Self {
            start_page,
            start_index,
            end_page,
            end_index,
        }
    }

    /// Zero-length range at one position
    pub fn collapsed(page: i32, index: i32) -> Self {
        Self::new(page, index, page, index)
    }

    pub fn is_active(&self) -> bool {
        self.start_page >= 0
    }

    /// Same range with start before end; the stored value is left untouched
    pub fn normalized(&self) -> Self {
        if self.start_page < 0 || self.end_page < 0 {
            return *self;
        }

        let reversed = self.start_page > self.end_page
            || (self.start_page == self.end_page && self.start_index > self.end_index);
        if reversed {
            Self::new(self.end_page, self.end_index, self.start_page, self.start_index)
        } else {
            *self
        }
    }

    /// `(start, len)` of the selected characters on `page`
    ///
    /// Expects a normalized range. The end index is exclusive.
    pub fn span_on_page(&self, page: usize, char_count: usize) -> Option<(usize, usize)> {
        if self.start_page < 0 || self.start_index < 0 {
            return None;
        }
        let page_i = i32::try_from(page).ok()?;
        if page_i < self.start_page || page_i > self.end_page {
            return None;
        }

        let start: i64 = if page_i == self.start_page {
            i64::from(self.start_index)
        } else {
            0
        };
        let len: i64 = if page_i == self.end_page {
            i64::from(self.end_index) - start
        } else {
            char_count as i64 - start
        };

        if len <= 0 {
            return None;
        }
        Some((start as usize, len as usize))
    }
}

/// Selection plus the drag state of the pointer that builds it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    range: SelectionRange,
    dragging: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Range as stored
    pub fn raw(&self) -> SelectionRange {
        self.range
    }

    pub fn normalized(&self) -> SelectionRange {
        self.range.normalized()
    }

    pub fn is_active(&self) -> bool {
        self.range.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start a new selection at a press on `page`
    ///
    /// Returns true when a previous selection was replaced.
    pub fn begin_drag<D: DocumentSource>(&mut self, doc: &D, page: usize, point: Point) -> bool {
        let had_selection = self.range.is_active();
        let index = hit_index(doc, page, point);
        self.range = SelectionRange::collapsed(page as i32, index);
        self.dragging = true;
        had_selection
    }

    /// Move the active end while the button is held
    ///
    /// Only a press on a glyph moves it. Returns true when the range changed.
    pub fn extend_drag<D: DocumentSource>(&mut self, doc: &D, page: usize, point: Point) -> bool {
        if !self.dragging {
            return false;
        }
        let index = hit_index(doc, page, point);
        if index < 0 {
            return false;
        }

        let extended = SelectionRange {
            end_page: page as i32,
            end_index: index,
            ..self.range
        };
        let changed = extended != self.range;
        self.range = extended;
        changed
    }

    /// Release the button; returns true when a selection is present
    pub fn end_drag(&mut self) -> bool {
        self.dragging = false;
        self.range.is_active()
    }

    pub fn clear(&mut self) {
        self.range = SelectionRange::NONE;
        self.dragging = false;
    }

    /// Replace the selection, clamping pages and indices into the document
    ///
    /// Returns false (and changes nothing) for an empty document.
    pub fn select<D: DocumentSource>(
        &mut self,
        doc: &D,
        start_page: i32,
        start_index: i32,
        end_page: i32,
        end_index: i32,
    ) -> bool {
        let count = doc.page_count();
        if count == 0 {
            return false;
        }

        let last_page = count as i32 - 1;
        let start_page = start_page.clamp(0, last_page);
        let end_page = end_page.clamp(0, last_page);

        let clamp_index = |page: i32, index: i32| {
            let chars = doc.char_count(page as usize) as i32;
            index.clamp(0, (chars - 1).max(0))
        };

        self.range = SelectionRange::new(
            start_page,
            clamp_index(start_page, start_index),
            end_page,
            clamp_index(end_page, end_index),
        );
        self.dragging = false;
        true
    }

    /// Selected text, pages joined by CRLF
    pub fn selected_text<D: DocumentSource>(&self, doc: &D) -> String {
        let range = self.normalized();
        if !range.is_active() || range.start_index < 0 {
            return String::new();
        }

        let last_page = doc.page_count() as i32 - 1;
        let mut text = String::new();
        for page in range.start_page..=range.end_page.min(last_page) {
            let page = page as usize;
            if !text.is_empty() {
                text.push_str(PAGE_TEXT_SEPARATOR);
            }
            if let Some((start, len)) = range.span_on_page(page, doc.char_count(page)) {
                text.push_str(&doc.text(page, start, len));
            }
        }
        text
    }

    /// Device rects highlighting the selection on one page
    pub fn rects_on_page<D: DocumentSource>(
        &self,
        doc: &D,
        page: usize,
        transform: &PageTransform,
    ) -> Vec<DeviceRect> {
        let range = self.normalized();
        let Some((start, len)) = range.span_on_page(page, doc.char_count(page)) else {
            return Vec::new();
        };

        doc.text_rects(page, start, len)
            .iter()
            .map(|rc| {
                let top_left = transform.page_to_device(Point::new(rc.left, rc.top));
                let bottom_right = transform.page_to_device(Point::new(rc.right, rc.bottom));
                DeviceRect::from_corners(top_left, bottom_right)
            })
            .collect()
    }
}

fn hit_index<D: DocumentSource>(doc: &D, page: usize, point: Point) -> i32 {
    doc.char_index_at(page, point, CHAR_HIT_TOLERANCE, CHAR_HIT_TOLERANCE)
        .map_or(-1, |index| index as i32)
}

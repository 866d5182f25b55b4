//! Display list: what to paint for the current scroll position

use smallvec::SmallVec;

use super::separator::{separators_for_page, Separator};
use crate::document::{DocumentSource, PageBitmap, PageRotation, RenderFlags};
use crate::layout::{active_range, PageSlot, ScrollOffset, ViewerConfig};
use crate::mapping::PageTransform;
use crate::selection::SelectionState;
use crate::{DeviceRect, Size};

/// Ask the document to rasterize a page at its on-screen size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub page_index: usize,
    pub width: u32,
    pub height: u32,
    pub rotation: PageRotation,
    pub flags: RenderFlags,
}

/// A display item to paint, in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayItem {
    /// Page bitmap drawn at `rect`
    Page { rect: DeviceRect, request: RenderRequest },
    /// Text selection highlight
    SelectionRect { rect: DeviceRect },
    /// Outline around the current page
    CurrentPageHighlight { rect: DeviceRect },
}

/// Items for a single visible page, in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPage {
    pub page_index: usize,
    pub bounds: DeviceRect,
    pub items: SmallVec<[DisplayItem; 4]>,
}

impl DisplayPage {
    pub fn render_request(&self) -> Option<&RenderRequest> {
        self.items.iter().find_map(|item| match item {
            DisplayItem::Page { request, .. } => Some(request),
            _ => None,
        })
    }

    pub fn selection_rects(&self) -> impl Iterator<Item = &DeviceRect> + '_ {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::SelectionRect { rect } => Some(rect),
            _ => None,
        })
    }
}

/// Page bitmap with the rect it belongs at
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub page_index: usize,
    pub rect: DeviceRect,
    pub bitmap: PageBitmap,
}

/// Geometry of one frame: laid-out pages seen through the viewport
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub slots: &'a [PageSlot],
    pub config: &'a ViewerConfig,
    pub scroll: ScrollOffset,
    pub viewport: Size,
    pub current_page: i32,
}

impl Frame<'_> {
    pub fn viewport_rect(&self) -> DeviceRect {
        DeviceRect::new(0, 0, self.viewport.width as i32, self.viewport.height as i32)
    }

    pub fn transform(&self, page: usize) -> Option<PageTransform> {
        self.slots
            .get(page)
            .map(|slot| PageTransform::for_slot(slot, self.scroll))
    }
}

/// Complete display list for rendering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayList {
    pub pages: Vec<DisplayPage>,
    pub separators: Vec<Separator>,
}

impl DisplayList {
    /// Build the paint plan for every page that intersects the viewport
    pub fn build<D: DocumentSource>(doc: &D, frame: &Frame<'_>, selection: &SelectionState) -> Self {
        let config = frame.config;
        let Some(range) = active_range(config.layout_mode, frame.slots.len(), frame.current_page)
        else {
            return Self::default();
        };

        let viewport = frame.viewport_rect();
        let last_page = *range.end();
        let mut pages = Vec::new();
        let mut separators = Vec::new();

        for index in range {
            let Some(transform) = frame.transform(index) else {
                break;
            };
            let rect = transform.rect;
            if !rect.intersects(&viewport) {
                continue;
            }

            let mut items: SmallVec<[DisplayItem; 4]> = SmallVec::new();
            if rect.width > 0 && rect.height > 0 {
                items.push(DisplayItem::Page {
                    rect,
                    request: RenderRequest {
                        page_index: index,
                        width: rect.width as u32,
                        height: rect.height as u32,
                        rotation: transform.rotation,
                        flags: config.render_flags,
                    },
                });
            }

            items.extend(
                selection
                    .rects_on_page(doc, index, &transform)
                    .into_iter()
                    .map(|rect| DisplayItem::SelectionRect { rect }),
            );

            if config.highlight_current_page && index as i32 == frame.current_page {
                items.push(DisplayItem::CurrentPageHighlight { rect });
            }

            if config.show_page_separator {
                separators.extend(separators_for_page(
                    &rect,
                    index,
                    last_page,
                    config.layout_mode,
                    config.tile_count,
                    &config.margin,
                ));
            }

            pages.push(DisplayPage {
                page_index: index,
                bounds: rect,
                items,
            });
        }

        DisplayList { pages, separators }
    }

    /// Hand every render request to the document
    pub fn render<D: DocumentSource>(&self, doc: &D) -> Vec<RenderedPage> {
        self.pages
            .iter()
            .filter_map(|page| {
                let request = page.render_request()?;
                let bitmap = doc.render_page(
                    request.page_index,
                    request.width,
                    request.height,
                    request.rotation,
                    request.flags,
                );
                Some(RenderedPage {
                    page_index: page.page_index,
                    rect: page.bounds,
                    bitmap,
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

//! Viewer controller
//!
//! Owns the document, the configuration, the viewport and every piece of
//! derived state (page placement, scroll offset, current page, selection).
//! Each public mutation brings the derived state up to date before it
//! returns, then notifies listeners.

use crate::document::{DocumentSource, PageRotation, RenderFlags};
use crate::events::{Listeners, Property, ViewerEvent};
use crate::layout::{
    active_range, clamp_zoom, compute_layout, resolve_current_page, Alignment, FitMode,
    LayoutMode, Margin, PageSlot, ScrollOffset, ViewerConfig, MIN_TILE_COUNT,
};
use crate::mapping::PageTransform;
use crate::render::{DisplayList, Frame, RenderedPage};
use crate::selection::{SelectionRange, SelectionState};
use crate::{DevicePoint, DeviceRect, Point, Size};

/// Pointer button reported with pointer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Scrollable multi-page view over a [`DocumentSource`]
pub struct Viewer<D: DocumentSource> {
    document: Option<D>,
    config: ViewerConfig,
    viewport: Size,
    scroll: ScrollOffset,
    extent: Size,
    slots: Vec<PageSlot>,
    current_page: i32,
    start_page: usize,
    selection: SelectionState,
    listeners: Listeners,
}

impl<D: DocumentSource> Default for Viewer<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DocumentSource> Viewer<D> {
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            document: None,
            config: config.sanitized(),
            viewport: Size::ZERO,
            scroll: ScrollOffset::default(),
            extent: Size::ZERO,
            slots: Vec::new(),
            current_page: -1,
            start_page: 0,
            selection: SelectionState::new(),
            listeners: Listeners::new(),
        }
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&ViewerEvent) + 'static) {
        self.listeners.subscribe(listener);
    }

    // ---- Document lifecycle ----

    /// Replace the displayed document
    ///
    /// The previous document is closed first. The new one is laid out,
    /// the start page becomes current and is scrolled into view.
    pub fn load_document(&mut self, document: D) {
        self.close_document();

        self.slots = (0..document.page_count())
            .map(|page| PageSlot::new(document.page_size(page), document.rotation_delta(page)))
            .collect();
        self.document = Some(document);
        self.update_layout();

        log::debug!(
            "document loaded: {} pages, extent {}x{}",
            self.slots.len(),
            self.extent.width,
            self.extent.height
        );

        if !self.slots.is_empty() {
            let start = self.start_page.min(self.slots.len() - 1) as i32;
            self.set_current_page(start);
            self.scroll_to_page(start);
        }
        self.listeners.emit(ViewerEvent::DocumentLoaded);
    }

    /// Close the document and hand it back; derived state is reset
    pub fn close_document(&mut self) -> Option<D> {
        let document = self.document.take()?;

        self.slots.clear();
        self.selection.clear();
        self.extent = Size::ZERO;
        self.scroll = ScrollOffset::default();
        self.current_page = -1;

        log::debug!("document closed");
        self.listeners.emit(ViewerEvent::DocumentClosed);
        Some(document)
    }

    /// Page made current when the next document loads
    pub fn set_start_page(&mut self, page: usize) {
        self.start_page = page;
    }

    pub fn start_page(&self) -> usize {
        self.start_page
    }

    pub fn document(&self) -> Option<&D> {
        self.document.as_ref()
    }

    pub fn page_count(&self) -> usize {
        self.slots.len()
    }

    // ---- Configuration ----

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Apply a whole configuration, one property at a time
    pub fn set_config(&mut self, config: ViewerConfig) {
        let config = config.sanitized();
        self.set_layout_mode(config.layout_mode);
        self.set_fit_mode(config.fit_mode);
        self.set_zoom(config.zoom);
        self.set_margin(config.margin);
        self.set_alignment(config.alignment);
        self.set_tile_count(config.tile_count);
        self.set_show_page_separator(config.show_page_separator);
        self.set_highlight_current_page(config.highlight_current_page);
        self.set_render_flags(config.render_flags);
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.config.layout_mode
    }

    pub fn set_layout_mode(&mut self, layout_mode: LayoutMode) {
        self.update_config(
            ViewerConfig {
                layout_mode,
                ..self.config
            },
            Property::LayoutMode,
            true,
        );
    }

    pub fn fit_mode(&self) -> FitMode {
        self.config.fit_mode
    }

    pub fn set_fit_mode(&mut self, fit_mode: FitMode) {
        self.update_config(
            ViewerConfig {
                fit_mode,
                ..self.config
            },
            Property::FitMode,
            true,
        );
    }

    pub fn zoom(&self) -> f32 {
        self.config.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.update_config(
            ViewerConfig {
                zoom: clamp_zoom(zoom),
                ..self.config
            },
            Property::Zoom,
            true,
        );
    }

    pub fn margin(&self) -> Margin {
        self.config.margin
    }

    pub fn set_margin(&mut self, margin: Margin) {
        self.update_config(
            ViewerConfig {
                margin: margin.sanitized(),
                ..self.config
            },
            Property::Margin,
            true,
        );
    }

    pub fn alignment(&self) -> Alignment {
        self.config.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.update_config(
            ViewerConfig {
                alignment,
                ..self.config
            },
            Property::Alignment,
            true,
        );
    }

    pub fn tile_count(&self) -> usize {
        self.config.tile_count
    }

    /// Pages per row in tiled mode, never below two
    pub fn set_tile_count(&mut self, tile_count: usize) {
        self.update_config(
            ViewerConfig {
                tile_count: tile_count.max(MIN_TILE_COUNT),
                ..self.config
            },
            Property::TileCount,
            true,
        );
    }

    pub fn show_page_separator(&self) -> bool {
        self.config.show_page_separator
    }

    pub fn set_show_page_separator(&mut self, show: bool) {
        self.update_config(
            ViewerConfig {
                show_page_separator: show,
                ..self.config
            },
            Property::ShowPageSeparator,
            false,
        );
    }

    pub fn highlight_current_page(&self) -> bool {
        self.config.highlight_current_page
    }

    pub fn set_highlight_current_page(&mut self, highlight: bool) {
        self.update_config(
            ViewerConfig {
                highlight_current_page: highlight,
                ..self.config
            },
            Property::HighlightCurrentPage,
            false,
        );
    }

    pub fn render_flags(&self) -> RenderFlags {
        self.config.render_flags
    }

    pub fn set_render_flags(&mut self, render_flags: RenderFlags) {
        self.update_config(
            ViewerConfig {
                render_flags,
                ..self.config
            },
            Property::RenderFlags,
            false,
        );
    }

    fn update_config(&mut self, next: ViewerConfig, property: Property, relayout: bool) {
        if next == self.config {
            return;
        }
        self.config = next;
        if relayout {
            self.relayout();
        }
        self.listeners.emit(ViewerEvent::PropertyChanged(property));
    }

    // ---- Viewport and scrolling ----

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        let viewport = Size::new(width.max(0.0), height.max(0.0));
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.relayout();
    }

    /// Total scrollable content size
    pub fn total_extent(&self) -> Size {
        self.extent
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    /// Scroll to an absolute position and re-resolve the current page
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        if self.document.is_none() {
            return;
        }
        self.scroll = self.clamp_scroll(DevicePoint::new(x, y));
        self.sync_current_page();
    }

    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_to(
            self.scroll.x.saturating_add(dx),
            self.scroll.y.saturating_add(dy),
        );
    }

    /// Bring a page into view and make it current
    ///
    /// In single-page mode this only switches pages; otherwise the page's
    /// top-left corner is scrolled to the viewport origin as far as the
    /// content allows.
    pub fn scroll_to_page(&mut self, page: i32) {
        let Some(page) = self.clamp_page(page) else {
            return;
        };

        if self.config.layout_mode != LayoutMode::Single {
            let rect = DeviceRect::truncate(&self.slots[page].rect);
            self.scroll = self.clamp_scroll(DevicePoint::new(rect.x, rect.y));
        }
        self.set_current_page(page as i32);
    }

    fn clamp_scroll(&self, offset: DevicePoint) -> DevicePoint {
        let max_x = (self.extent.width as i32 - self.viewport.width as i32).max(0);
        let max_y = (self.extent.height as i32 - self.viewport.height as i32).max(0);
        DevicePoint::new(offset.x.clamp(0, max_x), offset.y.clamp(0, max_y))
    }

    // ---- Pages ----

    /// Current page index, -1 without a document
    pub fn current_page(&self) -> i32 {
        self.current_page
    }

    /// Make a page current; out-of-range indices are clamped
    pub fn set_current_page(&mut self, page: i32) {
        let Some(page) = self.clamp_page(page) else {
            return;
        };
        let page = page as i32;
        if page == self.current_page {
            return;
        }

        self.current_page = page;
        if self.config.layout_mode == LayoutMode::Single {
            self.update_layout();
        }

        log::debug!("current page -> {}", page);
        self.listeners.emit(ViewerEvent::CurrentPageChanged);
    }

    /// Set a page's rotation and lay everything out again
    pub fn rotate_page(&mut self, page: usize, rotation: PageRotation) {
        let Some(document) = self.document.as_mut() else {
            return;
        };
        if page >= self.slots.len() {
            return;
        }

        document.set_page_rotation(page, rotation);
        self.slots[page].rotation = document.rotation_delta(page);
        self.relayout();
    }

    fn clamp_page(&self, page: i32) -> Option<usize> {
        if self.document.is_none() || self.slots.is_empty() {
            return None;
        }
        Some(page.clamp(0, self.slots.len() as i32 - 1) as usize)
    }

    /// Lay out again, then let the new geometry pick the current page
    ///
    /// Single mode only ever sees the current page, so it keeps it.
    fn relayout(&mut self) {
        self.update_layout();
        if self.config.layout_mode != LayoutMode::Single {
            self.sync_current_page();
        }
    }

    fn update_layout(&mut self) {
        self.extent = compute_layout(
            &mut self.slots,
            &self.config,
            self.viewport,
            self.current_page,
        );
        self.scroll = self.clamp_scroll(self.scroll);
    }

    fn sync_current_page(&mut self) {
        let range = active_range(self.config.layout_mode, self.slots.len(), self.current_page);
        let page = resolve_current_page(&self.slots, self.scroll, self.viewport, range);
        if page >= 0 {
            self.set_current_page(page);
        }
    }

    // ---- Hit testing and mapping ----

    fn frame(&self) -> Frame<'_> {
        Frame {
            slots: &self.slots,
            config: &self.config,
            scroll: self.scroll,
            viewport: self.viewport,
            current_page: self.current_page,
        }
    }

    fn active_pages(&self) -> impl Iterator<Item = usize> {
        active_range(self.config.layout_mode, self.slots.len(), self.current_page)
            .into_iter()
            .flatten()
    }

    /// On-screen rect of a page at the current scroll offset
    pub fn actual_rect(&self, page: usize) -> Option<DeviceRect> {
        self.frame().transform(page).map(|t| t.rect)
    }

    /// Page under a device point, or -1
    pub fn point_in_page(&self, device: DevicePoint) -> i32 {
        let frame = self.frame();
        self.active_pages()
            .find(|&page| {
                frame
                    .transform(page)
                    .map_or(false, |t| t.rect.contains(device))
            })
            .map_or(-1, |page| page as i32)
    }

    /// Page and page-space point under a device point
    pub fn device_to_page(&self, device: DevicePoint) -> Option<(usize, Point)> {
        let frame = self.frame();
        self.active_pages().find_map(|page| {
            frame
                .transform(page)?
                .device_to_page(device)
                .map(|point| (page, point))
        })
    }

    /// Device position of a page-space point
    pub fn page_to_device(&self, page: usize, point: Point) -> Option<DevicePoint> {
        self.frame()
            .transform(page)
            .map(|transform| transform.page_to_device(point))
    }

    pub fn page_transform(&self, page: usize) -> Option<PageTransform> {
        self.frame().transform(page)
    }

    // ---- Pointer input ----

    /// Press: starts a new selection on the page under the pointer
    pub fn pointer_down(&mut self, device: DevicePoint, button: PointerButton) {
        if button != PointerButton::Left {
            return;
        }
        let Some((page, point)) = self.device_to_page(device) else {
            return;
        };
        let Some(document) = self.document.as_ref() else {
            return;
        };

        let replaced = self.selection.begin_drag(document, page, point);
        self.set_current_page(page as i32);
        if replaced {
            self.listeners.emit(ViewerEvent::SelectionChanged);
        }
    }

    /// Drag: moves the selection end while the left button is held
    pub fn pointer_move(&mut self, device: DevicePoint, button: Option<PointerButton>) {
        if button != Some(PointerButton::Left) || !self.selection.is_dragging() {
            return;
        }
        let Some((page, point)) = self.device_to_page(device) else {
            return;
        };
        if let Some(document) = self.document.as_ref() {
            self.selection.extend_drag(document, page, point);
        }
    }

    /// Release: ends the drag and reports the selection
    pub fn pointer_up(&mut self, _device: DevicePoint, _button: PointerButton) {
        let has_selection = self.selection.end_drag();
        if self.document.is_some() && has_selection {
            self.listeners.emit(ViewerEvent::SelectionChanged);
        }
    }

    // ---- Selection ----

    /// Select a range; pages and indices are clamped into the document
    pub fn select_text(&mut self, start_page: i32, start_index: i32, end_page: i32, end_index: i32) {
        let Some(document) = self.document.as_ref() else {
            return;
        };
        if self
            .selection
            .select(document, start_page, start_index, end_page, end_index)
        {
            self.listeners.emit(ViewerEvent::SelectionChanged);
        }
    }

    pub fn deselect_text(&mut self) {
        self.selection.clear();
        self.listeners.emit(ViewerEvent::SelectionChanged);
    }

    /// Stored selection, in the order it was made
    pub fn selection(&self) -> SelectionRange {
        self.selection.raw()
    }

    pub fn normalized_selection(&self) -> SelectionRange {
        self.selection.normalized()
    }

    pub fn selected_text(&self) -> String {
        self.document
            .as_ref()
            .map(|document| self.selection.selected_text(document))
            .unwrap_or_default()
    }

    /// Selection highlight rects on one page, in device pixels
    pub fn selection_rects(&self, page: usize) -> Vec<DeviceRect> {
        let (Some(document), Some(transform)) = (self.document.as_ref(), self.page_transform(page))
        else {
            return Vec::new();
        };
        self.selection.rects_on_page(document, page, &transform)
    }

    // ---- Painting ----

    pub fn build_display_list(&self) -> DisplayList {
        match self.document.as_ref() {
            Some(document) => DisplayList::build(document, &self.frame(), &self.selection),
            None => DisplayList::default(),
        }
    }

    /// Rasterize every visible page through the document
    pub fn render_visible_pages(&self) -> Vec<RenderedPage> {
        match self.document.as_ref() {
            Some(document) => self.build_display_list().render(document),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::InMemoryDocument;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TEXT: &str = "abcdefghijklmnop";

    fn document(count: usize) -> InMemoryDocument {
        let mut doc = InMemoryDocument::new();
        for _ in 0..count {
            doc.push_page(Size::new(200.0, 100.0), TEXT);
        }
        doc
    }

    fn config() -> ViewerConfig {
        ViewerConfig {
            fit_mode: FitMode::FixedZoom,
            margin: Margin::uniform(0.0),
            alignment: Alignment::TOP_LEFT,
            ..ViewerConfig::default()
        }
    }

    fn viewer(count: usize) -> Viewer<InMemoryDocument> {
        let mut viewer = Viewer::with_config(config());
        viewer.set_viewport_size(200.0, 150.0);
        viewer.load_document(document(count));
        viewer
    }

    fn record(viewer: &mut Viewer<InMemoryDocument>) -> Rc<RefCell<Vec<ViewerEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        viewer.subscribe(move |event| sink.borrow_mut().push(*event));
        events
    }

    /// Device position of glyph `index` on the first text row of a page at (0, 0)
    fn glyph(index: i32) -> DevicePoint {
        // Row spans page y 64..52, which is device y 36..48 on a 100 px tall page
        DevicePoint::new(36 + index * 6 + 3, 42)
    }

    #[test]
    fn test_load_document() {
        let mut viewer: Viewer<InMemoryDocument> = Viewer::with_config(config());
        let events = record(&mut viewer);
        viewer.set_viewport_size(200.0, 150.0);
        viewer.load_document(document(3));

        assert_eq!(viewer.page_count(), 3);
        assert_eq!(viewer.current_page(), 0);
        assert_eq!(viewer.total_extent(), Size::new(200.0, 300.0));
        assert_eq!(
            *events.borrow(),
            vec![ViewerEvent::CurrentPageChanged, ViewerEvent::DocumentLoaded]
        );
    }

    #[test]
    fn test_start_page_is_scrolled_into_view() {
        let mut viewer: Viewer<InMemoryDocument> = Viewer::with_config(config());
        viewer.set_viewport_size(200.0, 150.0);
        viewer.set_start_page(1);
        viewer.load_document(document(3));

        assert_eq!(viewer.current_page(), 1);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 100));
    }

    #[test]
    fn test_reload_closes_previous_document() {
        let mut viewer = viewer(2);
        let events = record(&mut viewer);
        viewer.load_document(document(4));

        assert_eq!(viewer.page_count(), 4);
        let events = events.borrow();
        assert_eq!(events.first(), Some(&ViewerEvent::DocumentClosed));
        assert_eq!(events.last(), Some(&ViewerEvent::DocumentLoaded));
    }

    #[test]
    fn test_scroll_updates_current_page() {
        let mut viewer = viewer(3);
        viewer.scroll_to(0, 120);
        assert_eq!(viewer.current_page(), 1);

        // Clamped to extent - viewport
        viewer.scroll_to(0, 10_000);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 150));
        assert_eq!(viewer.current_page(), 2);

        viewer.scroll_by(0, -1_000);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 0));
        assert_eq!(viewer.current_page(), 0);
    }

    #[test]
    fn test_scroll_to_page() {
        let mut viewer = viewer(3);
        viewer.scroll_to_page(2);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 150));
        assert_eq!(viewer.current_page(), 2);

        viewer.scroll_to_page(-4);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 0));
        assert_eq!(viewer.current_page(), 0);
    }

    #[test]
    fn test_set_current_page_clamps_and_fires_on_change() {
        let mut viewer = viewer(3);
        let events = record(&mut viewer);

        viewer.set_current_page(99);
        assert_eq!(viewer.current_page(), 2);
        viewer.set_current_page(2);
        assert_eq!(*events.borrow(), vec![ViewerEvent::CurrentPageChanged]);
    }

    #[test]
    fn test_relayout_re_resolves_current_page() {
        let mut viewer = viewer(3);
        viewer.scroll_to(0, 150);
        assert_eq!(viewer.current_page(), 2);

        let events = record(&mut viewer);
        // Everything fits at quarter size, so the scroll resets and page 0 wins the tie
        viewer.set_zoom(0.25);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 0));
        assert_eq!(viewer.current_page(), 0);
        assert_eq!(
            *events.borrow(),
            vec![
                ViewerEvent::CurrentPageChanged,
                ViewerEvent::PropertyChanged(Property::Zoom),
            ]
        );
    }

    #[test]
    fn test_viewport_resize_re_resolves_current_page() {
        let mut viewer = viewer(3);
        viewer.scroll_to(0, 150);
        assert_eq!(viewer.current_page(), 2);

        viewer.set_viewport_size(200.0, 400.0);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 0));
        assert_eq!(viewer.current_page(), 0);
    }

    #[test]
    fn test_single_mode_keeps_current_page_on_relayout() {
        let mut viewer = viewer(3);
        viewer.set_layout_mode(LayoutMode::Single);
        viewer.set_current_page(2);

        viewer.set_zoom(0.5);
        viewer.set_viewport_size(300.0, 300.0);
        assert_eq!(viewer.current_page(), 2);
        assert_eq!(viewer.total_extent(), Size::new(100.0, 50.0));
    }

    #[test]
    fn test_huge_zoom_stays_total() {
        let mut viewer = viewer(3);
        viewer.set_zoom(2.0e7);
        assert_eq!(viewer.total_extent(), Size::new(4.0e9, 6.0e9));
        assert_eq!(viewer.current_page(), 0);

        viewer.scroll_to(0, 1_000_000);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 1_000_000));
        assert_eq!(viewer.current_page(), 0);
        assert_eq!(viewer.point_in_page(DevicePoint::new(10, 10)), 0);
        assert!(viewer.device_to_page(DevicePoint::new(10, 10)).is_some());

        let list = viewer.build_display_list();
        assert_eq!(list.pages.len(), 1);
        assert_eq!(list.pages[0].page_index, 0);

        viewer.scroll_to(i32::MAX, i32::MAX);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(i32::MAX - 200, i32::MAX - 150));
        assert!(viewer.current_page() >= 0);
        viewer.scroll_by(i32::MAX, i32::MAX);
        viewer.scroll_to_page(2);
        assert_eq!(viewer.current_page(), 2);
        let _ = viewer.build_display_list();
        let _ = viewer.selection_rects(2);
    }

    #[test]
    fn test_property_events_fire_only_on_change() {
        let mut viewer = viewer(3);
        let events = record(&mut viewer);

        viewer.set_zoom(1.0);
        viewer.set_tile_count(1);
        viewer.set_margin(Margin::uniform(-5.0));
        assert!(events.borrow().is_empty());

        viewer.set_zoom(2.0);
        viewer.set_tile_count(3);
        viewer.set_render_flags(RenderFlags::ANNOTATIONS | RenderFlags::GRAYSCALE);
        assert_eq!(
            *events.borrow(),
            vec![
                ViewerEvent::PropertyChanged(Property::Zoom),
                ViewerEvent::PropertyChanged(Property::TileCount),
                ViewerEvent::PropertyChanged(Property::RenderFlags),
            ]
        );
        assert_eq!(viewer.total_extent(), Size::new(400.0, 600.0));
    }

    #[test]
    fn test_set_config_applies_every_field() {
        let mut viewer = viewer(4);
        let events = record(&mut viewer);
        viewer.set_config(ViewerConfig {
            layout_mode: LayoutMode::Horizontal,
            show_page_separator: false,
            ..config()
        });

        assert_eq!(viewer.layout_mode(), LayoutMode::Horizontal);
        assert!(!viewer.show_page_separator());
        assert_eq!(viewer.total_extent(), Size::new(800.0, 100.0));
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_point_in_page() {
        let viewer = viewer(3);
        assert_eq!(viewer.point_in_page(DevicePoint::new(10, 10)), 0);
        assert_eq!(viewer.point_in_page(DevicePoint::new(10, 120)), 1);
        assert_eq!(viewer.point_in_page(DevicePoint::new(250, 10)), -1);
    }

    #[test]
    fn test_device_page_round_trip() {
        let mut viewer = viewer(3);
        viewer.scroll_to(0, 40);

        let (page, point) = viewer.device_to_page(DevicePoint::new(50, 100)).unwrap();
        assert_eq!(page, 1);
        assert_eq!(point, Point::new(50.0, 60.0));
        assert_eq!(
            viewer.page_to_device(page, point),
            Some(DevicePoint::new(50, 100))
        );
    }

    #[test]
    fn test_pointer_drag_selects_text() {
        let mut viewer = viewer(3);
        let events = record(&mut viewer);

        viewer.pointer_down(glyph(2), PointerButton::Left);
        viewer.pointer_move(glyph(5), Some(PointerButton::Left));
        viewer.pointer_up(glyph(5), PointerButton::Left);

        assert_eq!(viewer.selection(), SelectionRange::new(0, 2, 0, 5));
        assert_eq!(viewer.selected_text(), "cde");
        assert_eq!(*events.borrow(), vec![ViewerEvent::SelectionChanged]);
        assert_eq!(viewer.selection_rects(0).len(), 1);

        // A new press replaces the old selection and reports it
        viewer.pointer_down(glyph(7), PointerButton::Left);
        assert_eq!(viewer.selection(), SelectionRange::collapsed(0, 7));
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_backward_drag_is_normalized() {
        let mut viewer = viewer(3);
        viewer.pointer_down(glyph(9), PointerButton::Left);
        viewer.pointer_move(glyph(4), Some(PointerButton::Left));
        viewer.pointer_up(glyph(4), PointerButton::Left);

        assert_eq!(viewer.selection(), SelectionRange::new(0, 9, 0, 4));
        assert_eq!(viewer.normalized_selection(), SelectionRange::new(0, 4, 0, 9));
        assert_eq!(viewer.selected_text(), "efghi");
    }

    #[test]
    fn test_pointer_on_other_page_makes_it_current() {
        let mut viewer = viewer(3);
        viewer.pointer_down(DevicePoint::new(5, 105), PointerButton::Left);
        assert_eq!(viewer.current_page(), 1);
        assert_eq!(viewer.selection(), SelectionRange::collapsed(1, -1));

        // Right button is ignored
        viewer.pointer_down(DevicePoint::new(5, 5), PointerButton::Right);
        assert_eq!(viewer.current_page(), 1);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut viewer = viewer(2);
        let events = record(&mut viewer);

        viewer.select_text(1, 3, 0, 14);
        assert_eq!(viewer.selected_text(), "op\r\nabc");
        viewer.deselect_text();
        assert_eq!(viewer.selection(), SelectionRange::NONE);
        assert_eq!(viewer.selected_text(), "");
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_rotate_page_relayouts() {
        let mut viewer = viewer(3);
        viewer.rotate_page(0, PageRotation::Rotate90);
        assert_eq!(viewer.total_extent(), Size::new(200.0, 400.0));
        assert_eq!(viewer.actual_rect(1), Some(DeviceRect::new(0, 200, 200, 100)));
        assert_eq!(viewer.page_transform(0).map(|t| t.rotation), Some(PageRotation::Rotate90));
    }

    #[test]
    fn test_single_mode() {
        let mut viewer = viewer(3);
        viewer.set_layout_mode(LayoutMode::Single);
        viewer.set_current_page(1);

        assert_eq!(viewer.total_extent(), Size::new(200.0, 100.0));
        // Every page shares the slot, only the current one is hit
        assert_eq!(viewer.point_in_page(DevicePoint::new(10, 10)), 1);
        viewer.scroll_to_page(2);
        assert_eq!(viewer.current_page(), 2);
        assert_eq!(viewer.scroll_offset(), DevicePoint::new(0, 0));

        let list = viewer.build_display_list();
        assert_eq!(list.pages.len(), 1);
        assert_eq!(list.pages[0].page_index, 2);
    }

    #[test]
    fn test_close_document_resets_state() {
        let mut viewer = viewer(3);
        viewer.select_text(0, 0, 0, 3);
        let events = record(&mut viewer);

        assert!(viewer.close_document().is_some());
        assert_eq!(*events.borrow(), vec![ViewerEvent::DocumentClosed]);
        assert_eq!(viewer.current_page(), -1);
        assert_eq!(viewer.selected_text(), "");
        assert_eq!(viewer.point_in_page(DevicePoint::new(10, 10)), -1);
        assert!(viewer.build_display_list().is_empty());
        assert!(viewer.close_document().is_none());
    }

    #[test]
    fn test_empty_document() {
        let mut viewer: Viewer<InMemoryDocument> = Viewer::with_config(config());
        viewer.set_viewport_size(200.0, 150.0);
        viewer.load_document(InMemoryDocument::new());

        assert_eq!(viewer.current_page(), -1);
        assert_eq!(viewer.total_extent(), Size::ZERO);
        assert_eq!(viewer.point_in_page(DevicePoint::new(0, 0)), -1);
        viewer.select_text(0, 0, 0, 0);
        assert_eq!(viewer.selection(), SelectionRange::NONE);
        assert_eq!(viewer.selected_text(), "");
    }

    #[test]
    fn test_render_visible_pages() {
        let viewer = viewer(3);
        let rendered = viewer.render_visible_pages();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1].rect, DeviceRect::new(0, 100, 200, 100));
        assert_eq!(rendered[1].bitmap.height, 100);
    }
}

//! WASM bindings for the viewer

mod flat_buffer;

pub use flat_buffer::RenderBuffer;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::prelude::*;

use crate::document::{InMemoryDocument, PageRotation, PageSpec, RenderFlags};
use crate::layout::{Alignment, AxisAlign, FitMode, LayoutMode, Margin, ViewerConfig};
use crate::viewer::{PointerButton, Viewer};
use crate::DevicePoint;

/// Errors raised while decoding input from JS
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid page list: {0}")]
    InvalidPageSizes(#[source] serde_json::Error),
    #[error("invalid viewer config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Page list accepted by `loadDocument`
pub fn parse_pages(json: &str) -> Result<Vec<PageSpec>, ViewerError> {
    serde_json::from_str(json).map_err(ViewerError::InvalidPageSizes)
}

/// Full or partial configuration accepted by `setConfig`
pub fn parse_config(json: &str) -> Result<ViewerConfig, ViewerError> {
    serde_json::from_str(json).map_err(ViewerError::InvalidConfig)
}

/// Enum value from its variant name, e.g. `"TiledVertical"`
fn parse_name<T: DeserializeOwned>(name: &str) -> Result<T, ViewerError> {
    serde_json::from_value(serde_json::Value::String(name.to_owned()))
        .map_err(ViewerError::InvalidConfig)
}

/// Scroll and extent snapshot for the JS scrollbars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollInfo {
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub content_width: f32,
    pub content_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

/// WASM-exposed viewer over an in-memory document
#[wasm_bindgen]
pub struct WasmViewer {
    viewer: Viewer<InMemoryDocument>,
    buffer: RenderBuffer,
}

impl WasmViewer {
    pub fn viewer(&self) -> &Viewer<InMemoryDocument> {
        &self.viewer
    }

    pub fn try_load_document(&mut self, pages_json: &str) -> Result<usize, ViewerError> {
        let specs = parse_pages(pages_json)?;
        self.viewer.load_document(InMemoryDocument::from_specs(&specs));
        Ok(self.viewer.page_count())
    }

    pub fn try_set_config(&mut self, config_json: &str) -> Result<(), ViewerError> {
        let config = parse_config(config_json)?;
        self.viewer.set_config(config);
        Ok(())
    }

    pub fn try_set_layout_mode(&mut self, name: &str) -> Result<(), ViewerError> {
        let mode: LayoutMode = parse_name(name)?;
        self.viewer.set_layout_mode(mode);
        Ok(())
    }

    pub fn try_set_fit_mode(&mut self, name: &str) -> Result<(), ViewerError> {
        let mode: FitMode = parse_name(name)?;
        self.viewer.set_fit_mode(mode);
        Ok(())
    }

    pub fn try_set_alignment(&mut self, horizontal: &str, vertical: &str) -> Result<(), ViewerError> {
        let horizontal: AxisAlign = parse_name(horizontal)?;
        let vertical: AxisAlign = parse_name(vertical)?;
        self.viewer.set_alignment(Alignment::new(horizontal, vertical));
        Ok(())
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        let scroll = self.viewer.scroll_offset();
        let extent = self.viewer.total_extent();
        let viewport = self.viewer.viewport_size();
        ScrollInfo {
            scroll_x: scroll.x,
            scroll_y: scroll.y,
            content_width: extent.width,
            content_height: extent.height,
            viewport_width: viewport.width,
            viewport_height: viewport.height,
        }
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.buffer
    }
}

#[wasm_bindgen]
impl WasmViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            viewer: Viewer::new(),
            buffer: RenderBuffer::new(),
        }
    }

    /// Load pages from JSON: `[{"width": 612, "height": 792, "text": "..."}]`
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, pages_json: &str) -> Result<usize, JsValue> {
        Ok(self.try_load_document(pages_json)?)
    }

    #[wasm_bindgen(js_name = closeDocument)]
    pub fn close_document(&mut self) {
        self.viewer.close_document();
    }

    #[wasm_bindgen(js_name = setStartPage)]
    pub fn set_start_page(&mut self, page: usize) {
        self.viewer.set_start_page(page);
    }

    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> usize {
        self.viewer.page_count()
    }

    /// Register a listener; it receives each event as a JSON string
    pub fn subscribe(&mut self, callback: js_sys::Function) {
        self.viewer.subscribe(move |event| {
            if let Ok(json) = serde_json::to_string(event) {
                // Exceptions thrown by the listener stay on the JS side
                let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
            }
        });
    }

    // ---- Configuration ----

    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> String {
        serde_json::to_string(self.viewer.config()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config_json: &str) -> Result<(), JsValue> {
        Ok(self.try_set_config(config_json)?)
    }

    #[wasm_bindgen(js_name = setLayoutMode)]
    pub fn set_layout_mode(&mut self, name: &str) -> Result<(), JsValue> {
        Ok(self.try_set_layout_mode(name)?)
    }

    #[wasm_bindgen(js_name = setFitMode)]
    pub fn set_fit_mode(&mut self, name: &str) -> Result<(), JsValue> {
        Ok(self.try_set_fit_mode(name)?)
    }

    #[wasm_bindgen(js_name = setAlignment)]
    pub fn set_alignment(&mut self, horizontal: &str, vertical: &str) -> Result<(), JsValue> {
        Ok(self.try_set_alignment(horizontal, vertical)?)
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: f32) {
        self.viewer.set_zoom(zoom);
    }

    #[wasm_bindgen(js_name = getZoom)]
    pub fn get_zoom(&self) -> f32 {
        self.viewer.zoom()
    }

    #[wasm_bindgen(js_name = setMargin)]
    pub fn set_margin(&mut self, top: f32, right: f32, bottom: f32, left: f32) {
        self.viewer.set_margin(Margin {
            top,
            right,
            bottom,
            left,
        });
    }

    #[wasm_bindgen(js_name = setTileCount)]
    pub fn set_tile_count(&mut self, tile_count: usize) {
        self.viewer.set_tile_count(tile_count);
    }

    #[wasm_bindgen(js_name = setShowPageSeparator)]
    pub fn set_show_page_separator(&mut self, show: bool) {
        self.viewer.set_show_page_separator(show);
    }

    #[wasm_bindgen(js_name = setHighlightCurrentPage)]
    pub fn set_highlight_current_page(&mut self, highlight: bool) {
        self.viewer.set_highlight_current_page(highlight);
    }

    #[wasm_bindgen(js_name = setRenderFlags)]
    pub fn set_render_flags(&mut self, flags: u32) {
        self.viewer.set_render_flags(RenderFlags(flags));
    }

    // ---- Viewport, scrolling, pages ----

    #[wasm_bindgen(js_name = setViewportSize)]
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewer.set_viewport_size(width, height);
    }

    #[wasm_bindgen(js_name = scrollTo)]
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.viewer.scroll_to(x, y);
    }

    #[wasm_bindgen(js_name = scrollBy)]
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.viewer.scroll_by(dx, dy);
    }

    /// Scroll position and content size as JSON
    #[wasm_bindgen(js_name = getScrollInfo)]
    pub fn get_scroll_info(&self) -> String {
        serde_json::to_string(&self.scroll_info()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = scrollToPage)]
    pub fn scroll_to_page(&mut self, page: i32) {
        self.viewer.scroll_to_page(page);
    }

    #[wasm_bindgen(js_name = getCurrentPage)]
    pub fn get_current_page(&self) -> i32 {
        self.viewer.current_page()
    }

    #[wasm_bindgen(js_name = setCurrentPage)]
    pub fn set_current_page(&mut self, page: i32) {
        self.viewer.set_current_page(page);
    }

    /// Rotate a page by absolute quarter turns (clockwise)
    #[wasm_bindgen(js_name = rotatePage)]
    pub fn rotate_page(&mut self, page: usize, quarter_turns: i32) {
        self.viewer
            .rotate_page(page, PageRotation::from_quarter_turns(quarter_turns));
    }

    #[wasm_bindgen(js_name = pointInPage)]
    pub fn point_in_page(&self, x: i32, y: i32) -> i32 {
        self.viewer.point_in_page(DevicePoint::new(x, y))
    }

    /// `[page, x, y]` in page space, empty when off every page
    #[wasm_bindgen(js_name = deviceToPage)]
    pub fn device_to_page(&self, x: i32, y: i32) -> Vec<f32> {
        self.viewer
            .device_to_page(DevicePoint::new(x, y))
            .map(|(page, point)| vec![page as f32, point.x, point.y])
            .unwrap_or_default()
    }

    /// `[x, y]` in device pixels, empty for an unknown page
    #[wasm_bindgen(js_name = pageToDevice)]
    pub fn page_to_device(&self, page: usize, x: f32, y: f32) -> Vec<i32> {
        self.viewer
            .page_to_device(page, crate::Point::new(x, y))
            .map(|device| vec![device.x, device.y])
            .unwrap_or_default()
    }

    // ---- Pointer input ----

    /// `button` follows `MouseEvent.button` (0 left, 1 middle, 2 right)
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: i32, y: i32, button: u8) {
        if let Some(button) = pointer_button(button) {
            self.viewer.pointer_down(DevicePoint::new(x, y), button);
        }
    }

    /// `buttons` follows `MouseEvent.buttons` (bit 0 is the primary button)
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: i32, y: i32, buttons: u8) {
        let held = (buttons & 1 != 0).then_some(PointerButton::Left);
        self.viewer.pointer_move(DevicePoint::new(x, y), held);
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: i32, y: i32, button: u8) {
        if let Some(button) = pointer_button(button) {
            self.viewer.pointer_up(DevicePoint::new(x, y), button);
        }
    }

    // ---- Selection ----

    #[wasm_bindgen(js_name = selectText)]
    pub fn select_text(&mut self, start_page: i32, start_index: i32, end_page: i32, end_index: i32) {
        self.viewer
            .select_text(start_page, start_index, end_page, end_index);
    }

    #[wasm_bindgen(js_name = deselectText)]
    pub fn deselect_text(&mut self) {
        self.viewer.deselect_text();
    }

    #[wasm_bindgen(js_name = getSelectedText)]
    pub fn get_selected_text(&self) -> String {
        self.viewer.selected_text()
    }

    /// Normalized selection as `[startPage, startIndex, endPage, endIndex]`
    #[wasm_bindgen(js_name = getSelection)]
    pub fn get_selection(&self) -> Vec<i32> {
        let range = self.viewer.normalized_selection();
        vec![
            range.start_page,
            range.start_index,
            range.end_page,
            range.end_index,
        ]
    }

    // ---- Render buffer ----

    /// Rebuild the flat render buffer for the current frame
    #[wasm_bindgen(js_name = updateRenderBuffer)]
    pub fn update_render_buffer(&mut self) {
        let list = self.viewer.build_display_list();
        self.buffer
            .write_display_list(&list, self.viewer.current_page());
    }

    #[wasm_bindgen(js_name = u32Ptr)]
    pub fn u32_ptr(&self) -> u32 {
        self.buffer.u32_ptr()
    }

    #[wasm_bindgen(js_name = u32Len)]
    pub fn u32_len(&self) -> u32 {
        self.buffer.u32_len()
    }

    #[wasm_bindgen(js_name = f32Ptr)]
    pub fn f32_ptr(&self) -> u32 {
        self.buffer.f32_ptr()
    }

    #[wasm_bindgen(js_name = f32Len)]
    pub fn f32_len(&self) -> u32 {
        self.buffer.f32_len()
    }
}

impl Default for WasmViewer {
    fn default() -> Self {
        Self::new()
    }
}

fn pointer_button(button: u8) -> Option<PointerButton> {
    match button {
        0 => Some(PointerButton::Left),
        1 => Some(PointerButton::Middle),
        2 => Some(PointerButton::Right),
        _ => None,
    }
}

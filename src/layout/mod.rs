//! Page layout: sizing, placement and current-page tracking

mod config;
mod current_page;
mod engine;
mod fit;

pub use config::{
    clamp_zoom, Alignment, AxisAlign, LayoutMode, Margin, ViewerConfig, MIN_TILE_COUNT, MIN_ZOOM,
};
pub use current_page::{active_range, resolve_current_page};
pub use engine::{compute_layout, layout_pages, Layout, PageSlot};
pub use fit::{align_in_viewport, render_size, FitMode};

/// Scroll position in whole pixels, top-left of the viewport in content space
pub type ScrollOffset = crate::DevicePoint;

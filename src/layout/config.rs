//! Viewer configuration

use super::FitMode;
use crate::document::RenderFlags;
use serde::{Deserialize, Serialize};

/// Smallest accepted zoom factor
pub const MIN_ZOOM: f32 = 0.01;

/// Smallest accepted tile count
pub const MIN_TILE_COUNT: usize = 2;

/// How pages are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One page at a time
    Single,
    /// Continuous top-to-bottom
    #[default]
    Vertical,
    /// Continuous left-to-right
    Horizontal,
    /// Rows of `tile_count` thumbnails, scrolled vertically
    TiledVertical,
}

/// Placement along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisAlign {
    Start,
    #[default]
    Center,
    End,
}

/// 3x3 alignment of a page inside an under-filled viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: AxisAlign,
    pub vertical: AxisAlign,
}

impl Alignment {
    pub const TOP_LEFT: Alignment = Alignment::new(AxisAlign::Start, AxisAlign::Start);
    pub const TOP_CENTER: Alignment = Alignment::new(AxisAlign::Center, AxisAlign::Start);
    pub const TOP_RIGHT: Alignment = Alignment::new(AxisAlign::End, AxisAlign::Start);
    pub const MIDDLE_LEFT: Alignment = Alignment::new(AxisAlign::Start, AxisAlign::Center);
    pub const MIDDLE_CENTER: Alignment = Alignment::new(AxisAlign::Center, AxisAlign::Center);
    pub const MIDDLE_RIGHT: Alignment = Alignment::new(AxisAlign::End, AxisAlign::Center);
    pub const BOTTOM_LEFT: Alignment = Alignment::new(AxisAlign::Start, AxisAlign::End);
    pub const BOTTOM_CENTER: Alignment = Alignment::new(AxisAlign::Center, AxisAlign::End);
    pub const BOTTOM_RIGHT: Alignment = Alignment::new(AxisAlign::End, AxisAlign::End);

    pub const fn new(horizontal: AxisAlign, vertical: AxisAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Space removed from each side of a page's slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Negative or NaN sides become zero
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v > 0.0 { v } else { 0.0 };
        Self {
            top: fix(self.top),
            right: fix(self.right),
            bottom: fix(self.bottom),
            left: fix(self.left),
        }
    }
}

/// Everything that influences layout and painting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub layout_mode: LayoutMode,
    pub fit_mode: FitMode,
    /// Scale factor, only used by [`FitMode::FixedZoom`]
    pub zoom: f32,
    pub margin: Margin,
    pub alignment: Alignment,
    /// Pages per row, only used by [`LayoutMode::TiledVertical`]
    pub tile_count: usize,
    pub show_page_separator: bool,
    pub highlight_current_page: bool,
    pub render_flags: RenderFlags,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layout_mode: LayoutMode::Vertical,
            fit_mode: FitMode::FitWidth,
            zoom: 1.0,
            margin: Margin::uniform(10.0),
            alignment: Alignment::MIDDLE_CENTER,
            tile_count: MIN_TILE_COUNT,
            show_page_separator: true,
            highlight_current_page: true,
            render_flags: RenderFlags::ANNOTATIONS,
        }
    }
}

impl ViewerConfig {
    /// Clamp every field into its valid range
    pub fn sanitized(self) -> Self {
        Self {
            zoom: clamp_zoom(self.zoom),
            margin: self.margin.sanitized(),
            tile_count: self.tile_count.max(MIN_TILE_COUNT),
            ..self
        }
    }
}

/// Clamp zoom to a usable value; NaN and infinities fall back to [`MIN_ZOOM`]
pub fn clamp_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        MIN_ZOOM
    } else {
        zoom.max(MIN_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.layout_mode, LayoutMode::Vertical);
        assert_eq!(config.fit_mode, FitMode::FitWidth);
        assert_eq!(config.margin, Margin::uniform(10.0));
        assert_eq!(config.alignment, Alignment::MIDDLE_CENTER);
        assert_eq!(config.tile_count, 2);
    }

    #[test]
    fn test_sanitized() {
        let config = ViewerConfig {
            zoom: -3.0,
            tile_count: 0,
            margin: Margin {
                top: -1.0,
                right: 4.0,
                bottom: f32::NAN,
                left: 2.0,
            },
            ..ViewerConfig::default()
        }
        .sanitized();

        assert_eq!(config.zoom, MIN_ZOOM);
        assert_eq!(config.tile_count, 2);
        assert_eq!(config.margin.top, 0.0);
        assert_eq!(config.margin.bottom, 0.0);
        assert_eq!(config.margin.right, 4.0);
        assert_eq!(clamp_zoom(f32::INFINITY), MIN_ZOOM);
        assert_eq!(clamp_zoom(f32::NAN), MIN_ZOOM);
        assert_eq!(clamp_zoom(0.0), MIN_ZOOM);
        assert_eq!(clamp_zoom(3.5), 3.5);
    }

    #[test]
    fn test_config_json_uses_camel_case() {
        let json = serde_json::to_string(&ViewerConfig::default()).unwrap();
        assert!(json.contains("\"layoutMode\":\"Vertical\""));
        assert!(json.contains("\"tileCount\":2"));

        let partial: ViewerConfig =
            serde_json::from_str(r#"{"layoutMode": "Horizontal", "zoom": 2.0}"#).unwrap();
        assert_eq!(partial.layout_mode, LayoutMode::Horizontal);
        assert_eq!(partial.zoom, 2.0);
        assert_eq!(partial.tile_count, 2);
    }
}

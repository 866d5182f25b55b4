//! Fit-mode sizing and viewport alignment

use super::{Alignment, AxisAlign};
use crate::{Point, Size};
use serde::{Deserialize, Serialize};

/// How a page is scaled relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FitMode {
    /// Page width equals viewport width
    #[default]
    FitWidth,
    /// Page height equals viewport height
    FitHeight,
    /// Fit height, falling back to fit width if the page would be too wide
    FitBoth,
    /// Intrinsic size times the zoom factor
    FixedZoom,
}

/// Unconstrained on-screen size of a page
///
/// A page with no area renders as 0x0 regardless of the mode.
pub fn render_size(intrinsic: Size, fit: FitMode, viewport: Size, zoom: f32) -> Size {
    if intrinsic.is_degenerate() {
        return Size::ZERO;
    }

    let w = f64::from(intrinsic.width);
    let h = f64::from(intrinsic.height);
    let vw = f64::from(viewport.width.max(0.0));
    let vh = f64::from(viewport.height.max(0.0));

    let (nw, nh) = match fit {
        FitMode::FitWidth => (vw, h * vw / w),
        FitMode::FitHeight => (w * vh / h, vh),
        FitMode::FitBoth => {
            let nw = w * vh / h;
            if nw > vw {
                (vw, h * vw / w)
            } else {
                (nw, vh)
            }
        }
        FitMode::FixedZoom => {
            let zoom = f64::from(zoom);
            (w * zoom, h * zoom)
        }
    };

    Size::new(nw as f32, nh as f32)
}

/// Top-left corner of `size` aligned inside `viewport`, never negative
pub fn align_in_viewport(size: Size, viewport: Size, alignment: Alignment) -> Point {
    Point::new(
        axis_offset(viewport.width - size.width, alignment.horizontal),
        axis_offset(viewport.height - size.height, alignment.vertical),
    )
}

fn axis_offset(free: f32, align: AxisAlign) -> f32 {
    let offset = match align {
        AxisAlign::Start => 0.0,
        AxisAlign::Center => free / 2.0,
        AxisAlign::End => free,
    };
    offset.max(0.0)
}

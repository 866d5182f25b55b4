//! Render output: display list and page separators

mod display;
mod separator;

pub use display::{
    DisplayItem, DisplayList, DisplayPage, Frame, RenderRequest, RenderedPage,
};
pub use separator::{compute_separators, separators_for_page, Separator};

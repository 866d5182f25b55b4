//! Page-Viewer demo (for testing purposes only)
//! The main interface is through WASM bindings.
//!
//! Lays out a small in-memory document in every mode and prints what a
//! frontend would paint. Run with `RUST_LOG=trace` to see layout passes.

use page_viewer::{
    DevicePoint, DocumentSource, InMemoryDocument, LayoutMode, PointerButton, Size, Viewer,
    ViewerConfig,
};

fn sample_document() -> InMemoryDocument {
    let mut doc = InMemoryDocument::new();
    for page in 0..6 {
        let text = format!("Page {} of the sample document. ", page + 1).repeat(8);
        doc.push_page(Size::new(612.0, 792.0), &text);
    }
    doc
}

fn describe(viewer: &Viewer<InMemoryDocument>) {
    let extent = viewer.total_extent();
    let list = viewer.build_display_list();
    println!(
        "  extent {}x{}, current page {}, {} visible pages, {} separators",
        extent.width,
        extent.height,
        viewer.current_page(),
        list.pages.len(),
        list.separators.len()
    );
    for page in &list.pages {
        let b = page.bounds;
        println!(
            "    page {:>2} at ({}, {}) {}x{}",
            page.page_index, b.x, b.y, b.width, b.height
        );
    }
}

fn main() {
    env_logger::init();

    println!("Page-Viewer Layout Core");
    println!("=======================");

    let mut viewer = Viewer::with_config(ViewerConfig::default());
    viewer.subscribe(|event| log::info!("event: {:?}", event));
    viewer.set_viewport_size(800.0, 600.0);
    viewer.load_document(sample_document());

    for mode in [
        LayoutMode::Vertical,
        LayoutMode::Horizontal,
        LayoutMode::TiledVertical,
        LayoutMode::Single,
    ] {
        viewer.set_layout_mode(mode);
        println!();
        println!("{:?}", mode);
        describe(&viewer);
    }

    viewer.set_layout_mode(LayoutMode::Vertical);
    viewer.scroll_to_page(2);
    println!();
    println!("After scrolling to page 3:");
    describe(&viewer);

    // Drag across the first text row of the current page
    let Some(rect) = viewer.actual_rect(2) else {
        return;
    };
    let row_y = viewer
        .page_to_device(2, page_viewer::Point::new(100.0, 750.0))
        .map_or(rect.y, |p| p.y);
    viewer.pointer_down(DevicePoint::new(rect.x + 60, row_y), PointerButton::Left);
    viewer.pointer_move(DevicePoint::new(rect.x + 300, row_y), Some(PointerButton::Left));
    viewer.pointer_up(DevicePoint::new(rect.x + 300, row_y), PointerButton::Left);

    println!();
    println!("Selection {:?}", viewer.normalized_selection());
    println!("Selected text: {:?}", viewer.selected_text());

    let rendered = viewer.render_visible_pages();
    if let Some(doc) = viewer.document() {
        println!(
            "Rendered {} of {} pages",
            rendered.len(),
            doc.page_count()
        );
    }
}

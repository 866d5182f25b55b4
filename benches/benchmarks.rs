//! Benchmarks for the viewer core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use page_viewer::layout::layout_pages;
use page_viewer::{
    DevicePoint, InMemoryDocument, LayoutMode, PointerButton, Size, Viewer, ViewerConfig,
};

fn letter_sizes(count: usize) -> Vec<Size> {
    (0..count)
        .map(|i| {
            // Mix portrait and landscape pages
            if i % 7 == 0 {
                Size::new(792.0, 612.0)
            } else {
                Size::new(612.0, 792.0)
            }
        })
        .collect()
}

fn document(count: usize) -> InMemoryDocument {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
    let mut doc = InMemoryDocument::new();
    for size in letter_sizes(count) {
        doc.push_page(size, &text);
    }
    doc
}

fn viewer(count: usize, mode: LayoutMode) -> Viewer<InMemoryDocument> {
    let mut viewer = Viewer::with_config(ViewerConfig {
        layout_mode: mode,
        ..ViewerConfig::default()
    });
    viewer.set_viewport_size(1024.0, 768.0);
    viewer.load_document(document(count));
    viewer
}

fn bench_layout_vertical(c: &mut Criterion) {
    c.bench_function("layout_vertical_1000_pages", |b| {
        let sizes = letter_sizes(1000);
        let config = ViewerConfig::default();
        let viewport = Size::new(1024.0, 768.0);

        b.iter(|| {
            black_box(layout_pages(black_box(&sizes), &config, viewport, 0));
        });
    });
}

fn bench_layout_tiled(c: &mut Criterion) {
    c.bench_function("layout_tiled_1000_pages", |b| {
        let sizes = letter_sizes(1000);
        let config = ViewerConfig {
            layout_mode: LayoutMode::TiledVertical,
            tile_count: 4,
            ..ViewerConfig::default()
        };
        let viewport = Size::new(1024.0, 768.0);

        b.iter(|| {
            black_box(layout_pages(black_box(&sizes), &config, viewport, 0));
        });
    });
}

fn bench_scroll(c: &mut Criterion) {
    c.bench_function("scroll_and_resolve_current_page", |b| {
        let mut viewer = viewer(500, LayoutMode::Vertical);
        let height = viewer.total_extent().height as i32;
        let mut y = 0;

        b.iter(|| {
            y = (y + 997) % height.max(1);
            viewer.scroll_to(0, black_box(y));
        });
    });
}

fn bench_build_display_list(c: &mut Criterion) {
    c.bench_function("build_display_list", |b| {
        let mut viewer = viewer(200, LayoutMode::TiledVertical);
        viewer.select_text(0, 100, 3, 200);

        b.iter(|| {
            black_box(viewer.build_display_list());
        });
    });
}

fn bench_hit_test(c: &mut Criterion) {
    c.bench_function("device_to_page", |b| {
        let mut viewer = viewer(200, LayoutMode::Vertical);
        viewer.scroll_to_page(100);

        b.iter(|| {
            black_box(viewer.device_to_page(black_box(DevicePoint::new(400, 300))));
        });
    });
}

fn bench_drag_selection(c: &mut Criterion) {
    c.bench_function("drag_selection", |b| {
        let mut viewer = viewer(20, LayoutMode::Vertical);

        b.iter(|| {
            viewer.pointer_down(DevicePoint::new(120, 80), PointerButton::Left);
            viewer.pointer_move(DevicePoint::new(600, 300), Some(PointerButton::Left));
            viewer.pointer_up(DevicePoint::new(600, 300), PointerButton::Left);
            black_box(viewer.selected_text());
        });
    });
}

criterion_group!(
    benches,
    bench_layout_vertical,
    bench_layout_tiled,
    bench_scroll,
    bench_build_display_list,
    bench_hit_test,
    bench_drag_selection,
);

criterion_main!(benches);

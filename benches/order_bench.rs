//! Reading order benchmarks
//!
//! Compares the element ordering strategies across panel sizes and measures
//! the panel partition and frontier scan on grid pages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use manga_reading_order::element_order::solve_with;
use manga_reading_order::panel_order::order_regions;
use manga_reading_order::{
    order_page, partition, BBox, BoxKind, Page, PageSize, ReadingOrderConfig, Strategy,
};

const PANEL_SIZE: i64 = 1000;

/// Deterministic pseudo-random text boxes inside a square panel
fn random_elements(count: usize, seed: u64) -> Vec<BBox> {
    let mut s = seed;
    let mut next = move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        (s >> 33) as i64
    };

    (0..count)
        .map(|i| {
            let x = next() % (PANEL_SIZE - 60);
            let y = next() % (PANEL_SIZE - 120);
            BBox::new(x, y, x + 50, y + 110, BoxKind::Text, format!("t{i}")).unwrap()
        })
        .collect()
}

fn panel() -> BBox {
    BBox::new(0, 0, PANEL_SIZE, PANEL_SIZE, BoxKind::Panel, "panel").unwrap()
}

/// `rows` x `cols` grid of panels with slightly overlapping neighbours
fn grid_panels(rows: i64, cols: i64) -> Vec<BBox> {
    let w = 200;
    let h = 300;
    let mut panels = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let x = c * w;
            let y = r * h;
            panels.push(
                BBox::new(x, y, x + w + 8, y + h - 10, BoxKind::Panel, format!("p{r}-{c}"))
                    .unwrap(),
            );
        }
    }
    panels
}

fn bench_element_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_order");
    let panel = panel();

    for count in [4, 6, 8] {
        let elements = random_elements(count, count as u64);
        group.bench_with_input(
            BenchmarkId::new("exhaustive", count),
            &elements,
            |b, elements| {
                b.iter(|| solve_with(black_box(&panel), black_box(elements), Strategy::Exhaustive))
            },
        );
    }

    for count in [4, 8, 12, 15] {
        let elements = random_elements(count, count as u64);
        group.bench_with_input(
            BenchmarkId::new("held_karp", count),
            &elements,
            |b, elements| {
                b.iter(|| solve_with(black_box(&panel), black_box(elements), Strategy::HeldKarp))
            },
        );
    }

    for count in [8, 15, 50, 200] {
        let elements = random_elements(count, count as u64);
        group.bench_with_input(
            BenchmarkId::new("nearest_neighbor", count),
            &elements,
            |b, elements| {
                b.iter(|| {
                    solve_with(
                        black_box(&panel),
                        black_box(elements),
                        Strategy::NearestNeighbor,
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_panel_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel_order");

    for (rows, cols) in [(2, 2), (3, 4), (6, 6)] {
        let panels = grid_panels(rows, cols);
        let page = PageSize::new((cols * 200 + 8) as f64, (rows * 300) as f64).unwrap();

        group.bench_with_input(
            BenchmarkId::new("partition", format!("{rows}x{cols}")),
            &panels,
            |b, panels| b.iter(|| partition(black_box(panels))),
        );

        let regions = partition(&panels);
        group.bench_with_input(
            BenchmarkId::new("scan", format!("{rows}x{cols}")),
            &regions,
            |b, regions| b.iter(|| order_regions(black_box(regions), &page)),
        );
    }

    group.finish();
}

fn bench_full_page(c: &mut Criterion) {
    let mut boxes = grid_panels(3, 2);
    for (i, p) in grid_panels(3, 2).iter().enumerate() {
        for (j, e) in random_elements(4, i as u64 + 1).into_iter().enumerate() {
            let x = p.xmin() + e.xmin() % 140;
            let y = p.ymin() + e.ymin() % 170;
            boxes.push(
                BBox::new(x, y, x + 50, y + 110, BoxKind::Text, format!("e{i}-{j}")).unwrap(),
            );
        }
    }
    let page = Page::new(408.0, 900.0, boxes);
    let config = ReadingOrderConfig::default();

    c.bench_function("order_page_3x2", |b| {
        b.iter(|| order_page(black_box(&page), &config))
    });
}

criterion_group!(
    benches,
    bench_element_strategies,
    bench_panel_scan,
    bench_full_page
);
criterion_main!(benches);

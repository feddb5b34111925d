use core_types::{Point, Rect, Size};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tooltip::{PlacementInput, TooltipConfig, compute_placement};

const TRIGGERS: usize = 4_096;

fn make_inputs(container: Option<Rect>) -> Vec<PlacementInput> {
    (0..TRIGGERS)
        .map(|i| {
            let x = (i % 64) as f32 * 17.0 - 40.0;
            let y = (i / 64) as f32 * 13.0;
            PlacementInput {
                trigger: Rect::new(x, y, 24.0, 24.0),
                label: Size::new(40.0 + (i % 7) as f32 * 30.0, 24.0),
                scroll: Point::new(0.0, (i % 3) as f32 * 200.0),
                viewport: Size::new(1024.0, 768.0),
                container,
            }
        })
        .collect()
}

fn bench_placement_viewport(c: &mut Criterion) {
    let config = TooltipConfig {
        margin_top: 86.0,
        ..TooltipConfig::default()
    };
    let inputs = make_inputs(None);
    c.bench_function("bench_placement_viewport", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(compute_placement(black_box(input), &config));
            }
        });
    });
}

fn bench_placement_container(c: &mut Criterion) {
    let config = TooltipConfig::default();
    let inputs = make_inputs(Some(Rect::new(120.0, 0.0, 640.0, 2000.0)));
    c.bench_function("bench_placement_container", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(compute_placement(black_box(input), &config));
            }
        });
    });
}

criterion_group!(benches, bench_placement_viewport, bench_placement_container);
criterion_main!(benches);

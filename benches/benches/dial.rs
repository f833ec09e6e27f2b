// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use std::f64::consts::TAU;
use understory_dial::{Dial, DialConfig, ManualFrames, RotationState, Step};

fn bench_apply_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dial/apply_rotation");

    // Angles sweep forward so every turn crosses the seam once.
    let angles: Vec<f64> = (0..4_096).map(|i| f64::from(i) * 0.01).collect();

    for (name, step) in [
        ("continuous", None),
        ("step_15", Some(Step::from_degrees(15.0).unwrap())),
    ] {
        group.bench_with_input(BenchmarkId::new(name, angles.len()), &angles, |b, angles| {
            b.iter_batched(
                || RotationState::new(step),
                |mut state| {
                    for &a in angles {
                        black_box(state.apply_rotation(a));
                    }
                    black_box(state.full_angle());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_drag_sweep(c: &mut Criterion) {
    let center = Point::new(100.0, 100.0);
    let points: Vec<Point> = (0..1_024)
        .map(|i| {
            let rad = f64::from(i) / 64.0 * TAU / 16.0;
            Point::new(center.x + 50.0 * rad.sin(), center.y - 50.0 * rad.cos())
        })
        .collect();

    c.bench_function("dial/drag_sweep_1024", |b| {
        b.iter_batched(
            || Dial::new(DialConfig::default(), ManualFrames::new()).unwrap(),
            |mut dial| {
                dial.begin_drag(points[0], center, 0.0);
                let mut now = 0.0;
                for &p in &points[1..] {
                    now += 16.0;
                    dial.drag_to(p, center, now);
                }
                dial.end_drag();
                black_box(dial.full_angle());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_inertia_to_rest(c: &mut Criterion) {
    let center = Point::new(0.0, 0.0);
    let config = DialConfig::default().with_inertia(true).with_step(5.0);

    c.bench_function("dial/inertia_to_rest", |b| {
        b.iter_batched(
            || {
                let mut dial = Dial::new(config, ManualFrames::new()).unwrap();
                dial.begin_drag(Point::new(0.0, -10.0), center, 0.0);
                dial.drag_to(Point::new(10.0, -10.0), center, 16.0);
                dial.end_drag();
                dial
            },
            |mut dial| {
                let mut now = 16.0;
                loop {
                    let pending = dial.scheduler_mut().take_pending();
                    if pending.is_empty() {
                        break;
                    }
                    for frame in pending {
                        now += 16.0;
                        dial.on_frame(frame, now);
                    }
                }
                black_box(dial.angle());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_apply_rotation,
    bench_drag_sweep,
    bench_inertia_to_rest
);
criterion_main!(benches);

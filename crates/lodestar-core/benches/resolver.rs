//! Benchmarks for logical-to-physical resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lodestar_core::{
    resolve_arrow_key, Direction, DirectionState, Key, LogicalSide, Orientation, Resolver,
};

fn bench_resolve_arrow_key(c: &mut Criterion) {
    c.bench_function("resolve_arrow_key", |b| {
        b.iter(|| {
            resolve_arrow_key(
                black_box(Direction::Rtl),
                black_box(Key::Left),
                Orientation::Horizontal,
                black_box(2),
                black_box(5),
            )
        })
    });
}

fn bench_resolver_side(c: &mut Criterion) {
    let resolver = Resolver::new(DirectionState::new(Direction::Rtl));

    c.bench_function("resolver_side", |b| {
        b.iter(|| resolver.side(black_box(LogicalSide::Start)))
    });
}

fn bench_icon_transform(c: &mut Criterion) {
    let resolver = Resolver::new(DirectionState::new(Direction::Rtl));

    c.bench_function("resolver_icon_transform", |b| {
        b.iter(|| resolver.icon_transform(black_box("rotate(45deg)")))
    });
}

criterion_group!(
    benches,
    bench_resolve_arrow_key,
    bench_resolver_side,
    bench_icon_transform,
);
criterion_main!(benches);

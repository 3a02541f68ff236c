//! Container throughput benchmarks.
//!
//! Quick measurements of list append and map insert/lookup over the byte
//! region, including the relocation cost of container growth.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cora_runtime::CoraState;

fn bench_list_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("list");

    group.bench_function("append_1000_ints", |b| {
        b.iter(|| {
            let mut state = CoraState::new();
            let list = state.make_list().unwrap();
            for i in 0..1000 {
                let h = state.make_int(black_box(i)).unwrap();
                state.list_append(list, h).unwrap();
            }
            black_box(state.list_length(list));
        });
    });

    group.bench_function("iterate_1000_ints", |b| {
        let mut state = CoraState::new();
        let list = state.make_list().unwrap();
        for i in 0..1000 {
            let h = state.make_int(i).unwrap();
            state.list_append(list, h).unwrap();
        }
        b.iter(|| {
            let total: usize = state.list_items(black_box(list)).count();
            black_box(total);
        });
    });

    group.finish();
}

fn bench_map_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("map");

    group.bench_function("insert_100_pairs", |b| {
        b.iter(|| {
            let mut state = CoraState::new();
            let map = state.make_map().unwrap();
            for i in 0..100 {
                let h = state.make_int(i).unwrap();
                state.map_insert(map, &format!("key{i}"), h).unwrap();
            }
            black_box(state.map_length(map));
        });
    });

    group.bench_function("lookup_in_100_pairs", |b| {
        let mut state = CoraState::new();
        let map = state.make_map().unwrap();
        for i in 0..100 {
            let h = state.make_int(i).unwrap();
            state.map_insert(map, &format!("key{i}"), h).unwrap();
        }
        b.iter(|| {
            black_box(state.map_get(black_box(map), black_box("key73")));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_list_append, bench_map_ops);
criterion_main!(benches);

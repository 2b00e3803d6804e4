use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use champ_collections::{ChampMapMut, ChampSet, ChampSetMut, SeqChampSetMut};

fn inserts(c: &mut Criterion) {
    c.bench_function("set_mut_insert_10k", |b| {
        b.iter(|| {
            let mut set = ChampSetMut::new();
            for i in 0_u64..10_000 {
                set.insert(black_box(i));
            }
            set
        });
    });

    c.bench_function("set_persistent_insert_10k", |b| {
        b.iter(|| {
            let mut set: ChampSet<u64> = ChampSet::new();
            for i in 0_u64..10_000 {
                set = set.insert(black_box(i));
            }
            set
        });
    });

    c.bench_function("map_mut_insert_10k", |b| {
        b.iter(|| {
            let mut map = ChampMapMut::new();
            for i in 0_u64..10_000 {
                map.insert(black_box(i), i);
            }
            map
        });
    });
}

fn lookups(c: &mut Criterion) {
    let mut set = ChampSetMut::new();
    for i in 0_u64..10_000 {
        set.insert(i);
    }
    c.bench_function("set_mut_lookup_10k", |b| {
        b.iter(|| {
            let mut hits = 0_u32;
            for i in 0_u64..10_000 {
                if set.contains(black_box(&i)) {
                    hits += 1;
                }
            }
            hits
        });
    });
}

fn iteration(c: &mut Criterion) {
    let mut plain = ChampSetMut::new();
    let mut sequenced = SeqChampSetMut::new();
    for i in 0_u64..10_000 {
        plain.insert(i);
        sequenced.insert(i);
    }

    c.bench_function("set_iterate_10k", |b| {
        b.iter(|| plain.iter().copied().sum::<u64>());
    });

    c.bench_function("seq_set_iterate_10k", |b| {
        b.iter(|| sequenced.iter().copied().sum::<u64>());
    });
}

criterion_group!(benches, inserts, lookups, iteration);
criterion_main!(benches);

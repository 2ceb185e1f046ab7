use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use navtree::TreeMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 2] = [100, 10_000];

fn rng() -> StdRng { StdRng::seed_from_u64(0x7265_6462_6c61_636b) }

fn insert_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_rand");

    for n in SIZES {
        let mut map = TreeMap::new();
        let mut rng = rng();
        for _ in 0..n {
            let i = rng.gen::<usize>() % n;
            map.insert(i, i);
        }

        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let k = rng.gen::<usize>() % n;
            map.insert(k, k);
            map.remove(&k);
        }));
    }

    group.finish();
}

fn insert_seq(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_seq");

    for n in SIZES {
        let mut map = TreeMap::new();
        for i in 0..n { map.insert(i * 2, i * 2); }

        let mut i = 1;
        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            map.insert(i, i);
            map.remove(&i);
            i = (i + 2) % n;
        }));
    }

    group.finish();
}

fn find_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_rand");

    for n in SIZES {
        let mut map = TreeMap::new();
        let mut rng = rng();
        let mut keys: Vec<_> = (0..n).map(|_| rng.gen::<usize>() % n).collect();
        for &k in &keys { map.insert(k, k); }
        keys.shuffle(&mut rng);

        let mut i = 0;
        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let t = map.get(&keys[i]);
            i = (i + 1) % n;
            black_box(t);
        }));
    }

    group.finish();
}

fn find_seq(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_seq");

    for n in SIZES {
        let map: TreeMap<usize, usize> = (0..n).map(|i| (i, i)).collect();

        let mut i = 0;
        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let x = map.get(&i);
            i = (i + 1) % n;
            black_box(x);
        }));
    }

    group.finish();
}

fn ceiling_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("ceiling_rand");

    for n in SIZES {
        let map: TreeMap<usize, usize> = (0..n).map(|i| (i * 2, i)).collect();
        let mut rng = rng();

        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let k = rng.gen::<usize>() % (n * 2);
            black_box(map.ceiling_key(&k));
        }));
    }

    group.finish();
}

fn iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");

    for n in [100, 1000, 100_000] {
        let mut map = TreeMap::<u32, u32>::new();
        let mut rng = rng();
        for _ in 0..n { map.insert(rng.gen(), rng.gen()); }

        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            for entry in map.iter() { black_box(entry); }
        }));
    }

    group.finish();
}

fn sub_map_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sub_map_iter");

    for n in [1000, 100_000] {
        let map: TreeMap<u32, u32> = (0..n).map(|i| (i, i)).collect();

        group.bench_function(BenchmarkId::from_parameter(n), |b| b.iter(|| {
            let view = map.sub_map(n / 4, true, n / 2, false).unwrap();
            for entry in view.iter() { black_box(entry); }
        }));
    }

    group.finish();
}

fn cursor_remove(c: &mut Criterion) {
    c.bench_function("cursor_remove_every_other_10_000", |b| b.iter(|| {
        let mut map: TreeMap<u32, u32> = (0..10_000).map(|i| (i, i)).collect();
        let mut cursor = map.cursor();

        while cursor.has_next() {
            let key = *cursor.next_key(&map).unwrap();
            if key % 2 == 0 { cursor.remove(&mut map).unwrap(); }
        }

        map
    }));
}

criterion_group!(inserts, insert_rand, insert_seq);
criterion_group!(lookups, find_rand, find_seq, ceiling_rand);
criterion_group!(traversal, iter, sub_map_iter, cursor_remove);
criterion_main!(inserts, lookups, traversal);

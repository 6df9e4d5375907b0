use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pea_align::{CoordinateMap, GlobalAligner, PairwiseAligner};

fn random_dna(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    // Deterministic pseudo-random for reproducibility
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = 42;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

fn mutate_dna(seq: &[u8], rate: f64) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut out = seq.to_vec();
    let mut state: u64 = 137;
    for b in out.iter_mut() {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let r = (state >> 33) as f64 / (u32::MAX as f64);
        if r < rate {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            *b = bases[((state >> 33) % 4) as usize];
        }
    }
    out
}

fn bench_global(c: &mut Criterion) {
    let mut group = c.benchmark_group("global");

    // Comparison windows are twice the comparison radius.
    for &len in &[60, 120, 240] {
        let window = random_dna(len);
        let mut read = mutate_dna(&window, 0.05);
        read.insert(len / 2, b'A');

        for indels in [true, false] {
            let aligner = GlobalAligner::for_indels(indels);
            let name = if indels { "indels" } else { "no_indels" };
            group.bench_with_input(BenchmarkId::new(name, len), &len, |b, _| {
                b.iter(|| aligner.align(black_box(&window), black_box(&read)))
            });
        }
    }

    group.finish();
}

fn bench_coordinate_map(c: &mut Criterion) {
    let window = random_dna(120);
    let mut read = window.clone();
    read.insert(60, b'G');
    let aln = GlobalAligner::default().align(&window, &read).unwrap();

    c.bench_function("coordinate_map_120", |b| {
        b.iter(|| {
            let map = CoordinateMap::new(black_box(&aln.aligned_target));
            (map.column_or_end(57), map.column_or_end(87))
        })
    });
}

criterion_group!(benches, bench_global, bench_coordinate_map);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fftwtools::batch::rfft_many;
use fftwtools::rfft::{rfft, spectrum_len};
use fftwtools::{Complex64, Effort};
use fftwtools_bench::signal;

// One shared plan against one plan per signal.
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("rfft_batch");
    let n = 512;
    for &m in &[8usize, 64] {
        let input = signal(n * m);
        let nc = spectrum_len(n);
        let mut work = input.clone();
        let mut output = vec![Complex64::zero(); nc * m];
        group.bench_function(BenchmarkId::new("many", m), |b| {
            b.iter(|| {
                work.copy_from_slice(&input);
                rfft_many(n, m, &mut work, &mut output, Effort::Estimate).unwrap();
            })
        });
        group.bench_function(BenchmarkId::new("looped", m), |b| {
            b.iter(|| {
                work.copy_from_slice(&input);
                for (i, chunk) in work.chunks_mut(n).enumerate() {
                    rfft(chunk, &mut output[i * nc..(i + 1) * nc], false, Effort::Estimate)
                        .unwrap();
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batch);
criterion_main!(benches);

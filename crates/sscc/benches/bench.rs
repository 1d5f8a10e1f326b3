use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sscc::{
    AtomicCounter, AtomicSsccGenerator, BasicSsccGenerator, LockSsccGenerator, MemoryCounter,
    SharedCounter, SsccGenerator, SsccLayout, compute_check_digit,
};
use std::{thread::scope, time::Instant};

// Number of codes generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_CODES: u64 = 4096;

/// Benchmarks single-threaded generation from a fresh counter.
fn bench_generator<G>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: SsccGenerator,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_CODES));

    group.bench_function(format!("elems/{TOTAL_CODES}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_CODES {
                    black_box(generator.try_next_code().unwrap());
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks contended generation with one shared generator.
fn bench_generator_threaded<G>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) where
    G: SsccGenerator + Sync,
{
    let mut group = c.benchmark_group(group_name);

    for threads in [1_u64, 2, 4, 8] {
        group.throughput(Throughput::Elements(TOTAL_CODES * threads));
        group.bench_function(format!("threads/{threads}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    let generator = generator_factory();
                    scope(|s| {
                        for _ in 0..threads {
                            s.spawn(|| {
                                for _ in 0..TOTAL_CODES {
                                    black_box(generator.try_next_code().unwrap());
                                }
                            });
                        }
                    });
                }
                start.elapsed()
            });
        });
    }

    group.finish();
}

fn bench_check_digit(c: &mut Criterion) {
    let data = SsccLayout::default().data_digits(123_456_789).unwrap();
    c.bench_function("check_digit/sscc", |b| {
        b.iter(|| black_box(compute_check_digit(black_box(&data)).unwrap()));
    });
}

fn benches(c: &mut Criterion) {
    bench_check_digit(c);

    bench_generator(c, "basic/memory", || {
        BasicSsccGenerator::new(MemoryCounter::new(0))
    });
    bench_generator(c, "atomic/atomic", || {
        AtomicSsccGenerator::new(AtomicCounter::new(0))
    });

    bench_generator_threaded(c, "lock/shared", || {
        LockSsccGenerator::new(SharedCounter::new(0))
    });
    bench_generator_threaded(c, "atomic/shared", || {
        AtomicSsccGenerator::new(SharedCounter::new(0))
    });
    bench_generator_threaded(c, "atomic/atomic", || {
        AtomicSsccGenerator::new(AtomicCounter::new(0))
    });
}

criterion_group!(all, benches);
criterion_main!(all);

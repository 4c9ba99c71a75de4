use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::time::Duration;
use strided_numerics::ufunc::{numel, strided_unary};
use strided_numerics::{binary, unary, NdArray, Order};

fn normal_vec(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.sample(StandardNormal)).collect()
}

fn bench_copy_transposed(c: &mut Criterion) {
    let mut group = c.benchmark_group("unary_transposed");
    for size in [100usize, 500, 1000] {
        let elements = size * size;
        group.throughput(Throughput::Elements(elements as u64));
        let a = normal_vec(elements, 0);
        let mut out = vec![0.0; elements];

        group.bench_with_input(BenchmarkId::new("naive", size), &size, |b, &n| {
            b.iter(|| {
                for i in 0..n {
                    for j in 0..n {
                        out[i * n + j] = a[j * n + i];
                    }
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("dispatch", size), &size, |b, &n| {
            b.iter(|| {
                let x = NdArray::from_shape(&a[..], &[n, n], Order::ColumnMajor).unwrap();
                let mut y = NdArray::from_shape(&mut out[..], &[n, n], Order::RowMajor).unwrap();
                if let Err(err) = unary(&x, &mut y, |v| v) {
                    panic!("unary failed: {err}");
                }
            })
        });
    }
    group.finish();
}

fn bench_binary_contiguous(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_contiguous");
    for size in [100usize, 1000] {
        let elements = size * size;
        group.throughput(Throughput::Elements(elements as u64));
        let a = normal_vec(elements, 1);
        let bv = normal_vec(elements, 2);
        let mut out = vec![0.0; elements];

        group.bench_with_input(BenchmarkId::new("zip", size), &size, |b, _| {
            b.iter(|| {
                for ((o, x), y) in out.iter_mut().zip(&a).zip(&bv) {
                    *o = x + y;
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("dispatch", size), &size, |b, &n| {
            b.iter(|| {
                let x = NdArray::from_shape(&a[..], &[n, n], Order::RowMajor).unwrap();
                let y = NdArray::from_shape(&bv[..], &[n, n], Order::RowMajor).unwrap();
                let mut z = NdArray::from_shape(&mut out[..], &[n, n], Order::RowMajor).unwrap();
                if let Err(err) = binary(&x, &y, &mut z, |p, q| p + q) {
                    panic!("binary failed: {err}");
                }
            })
        });
    }
    group.finish();
}

fn bench_rank_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("unary_rank_sweep");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));
    // About 2^20 elements at every rank
    for rank in [2usize, 4, 6, 8, 10] {
        let extent = (1usize << (20 / rank)).max(2);
        let shape = vec![extent; rank];
        let elements = numel(&shape);
        group.throughput(Throughput::Elements(elements as u64));
        let a = normal_vec(elements, rank as u64);
        let mut out = vec![0.0; elements];

        group.bench_with_input(BenchmarkId::new("reversed_last", rank), &rank, |b, _| {
            let mut strides = strided_numerics::ufunc::row_major_strides(&shape);
            strides[rank - 1] = -1;
            let offset = extent - 1;
            b.iter(|| {
                let x = NdArray::new(&a[..], &shape, &strides, offset, Order::RowMajor).unwrap();
                let mut y = NdArray::from_shape(&mut out[..], &shape, Order::RowMajor).unwrap();
                if let Err(err) = unary(&x, &mut y, |v| v * 2.0) {
                    panic!("unary failed: {err}");
                }
            })
        });
    }
    group.finish();
}

fn bench_strided_1d(c: &mut Criterion) {
    let mut group = c.benchmark_group("strided_unary");
    let len = 1_000_000usize;
    group.throughput(Throughput::Elements(len as u64));
    let a = normal_vec(2 * len, 3);
    let mut out = vec![0.0; len];

    for stride in [1isize, 2, -1] {
        group.bench_with_input(BenchmarkId::new("exp", stride), &stride, |b, &s| {
            b.iter(|| {
                if let Err(err) = strided_unary(len, &a, s, &mut out, 1, f64::exp) {
                    panic!("strided_unary failed: {err}");
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_copy_transposed,
    bench_binary_contiguous,
    bench_rank_sweep,
    bench_strided_1d
);
criterion_main!(benches);

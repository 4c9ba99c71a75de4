use num_complex::Complex64;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use strided_numerics::ufunc::{numel, shape2strides};
use strided_numerics::{binary, unary, unary2, ComplexBuffer, ComplexBufferMut, NdArray, Order};

/// Visit every multi-index of `shape` in row-major order.
fn for_each_multi_index(shape: &[usize], mut f: impl FnMut(&[usize])) {
    if shape.contains(&0) {
        return;
    }
    let mut idx = vec![0usize; shape.len()];
    loop {
        f(&idx);
        let mut k = shape.len();
        loop {
            if k == 0 {
                return;
            }
            k -= 1;
            idx[k] += 1;
            if idx[k] < shape[k] {
                break;
            }
            idx[k] = 0;
        }
    }
}

fn linear(idx: &[usize], strides: &[isize], offset: usize) -> usize {
    let mut pos = offset as isize;
    for (&i, &s) in idx.iter().zip(strides) {
        pos += i as isize * s;
    }
    pos as usize
}

/// A strided layout over a padded buffer: each dimension skips one slot and
/// dimensions with `flip[k]` run backward. Returns `(strides, offset, len)`.
fn padded_layout(shape: &[usize], order: Order, flip: &[bool]) -> (Vec<isize>, usize, usize) {
    let padded: Vec<usize> = shape.iter().map(|&n| n + 1).collect();
    let base = shape2strides(&padded, order);
    let mut offset = 0isize;
    let strides = base
        .iter()
        .zip(shape)
        .zip(flip)
        .map(|((&s, &n), &f)| {
            if f && n > 0 {
                offset += (n as isize - 1) * s;
                -s
            } else {
                s
            }
        })
        .collect();
    (strides, offset as usize, numel(&padded))
}

fn random_buffer(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.sample(StandardNormal)).collect()
}

fn shape_for_rank(rank: usize) -> Vec<usize> {
    if rank <= 4 {
        [3usize, 4, 2, 5][..rank].to_vec()
    } else {
        (0..rank).map(|k| 2 + k % 2).collect()
    }
}

fn kernel(v: f64) -> f64 {
    v.sin() * 3.0 + 1.0
}

/// Run `unary` and a naive loop over the same descriptors and compare the
/// whole output buffers bit for bit.
fn check_unary(shape: &[usize], x_order: Order, x_flip: &[bool], y_order: Order, y_flip: &[bool]) {
    let (xs, xo, xlen) = padded_layout(shape, x_order, x_flip);
    let (ys, yo, ylen) = padded_layout(shape, y_order, y_flip);
    let x = random_buffer(xlen, shape.len() as u64);

    let mut got = vec![-7.0f64; ylen];
    {
        let xv = NdArray::new(&x[..], shape, &xs, xo, x_order).unwrap();
        let mut yv = NdArray::new(&mut got[..], shape, &ys, yo, y_order).unwrap();
        unary(&xv, &mut yv, kernel).unwrap();
    }

    let mut expected = vec![-7.0f64; ylen];
    for_each_multi_index(shape, |idx| {
        expected[linear(idx, &ys, yo)] = kernel(x[linear(idx, &xs, xo)]);
    });

    let got_bits: Vec<u64> = got.iter().map(|v| v.to_bits()).collect();
    let expected_bits: Vec<u64> = expected.iter().map(|v| v.to_bits()).collect();
    assert_eq!(
        got_bits, expected_bits,
        "shape={shape:?} x=({x_order}, {xs:?}) y=({y_order}, {ys:?})"
    );
}

#[test]
fn test_mixed_sign_all_ranks_both_orders() {
    for rank in 1..=10 {
        let shape = shape_for_rank(rank);
        let alternating: Vec<bool> = (0..rank).map(|k| k % 2 == 1).collect();
        let none = vec![false; rank];
        for order in [Order::RowMajor, Order::ColumnMajor] {
            check_unary(&shape, order, &alternating, order, &none);
        }
    }
}

#[test]
fn test_single_direction_all_ranks_both_orders() {
    for rank in 1..=10 {
        let shape = shape_for_rank(rank);
        let none = vec![false; rank];
        let all = vec![true; rank];
        for order in [Order::RowMajor, Order::ColumnMajor] {
            // Forward strides on both sides
            check_unary(&shape, order, &none, order, &none);
            // Every stride negative on both sides
            check_unary(&shape, order, &all, order, &all);
        }
    }
}

#[test]
fn test_mismatched_orders_all_ranks() {
    for rank in 2..=10 {
        let shape = shape_for_rank(rank);
        let none = vec![false; rank];
        check_unary(&shape, Order::RowMajor, &none, Order::ColumnMajor, &none);
        check_unary(&shape, Order::ColumnMajor, &none, Order::RowMajor, &none);
    }
}

#[test]
fn test_rank_beyond_specialized() {
    let shape = vec![2usize; 12];
    let flip: Vec<bool> = (0..12).map(|k| k % 3 == 0).collect();
    let none = vec![false; 12];
    check_unary(&shape, Order::RowMajor, &none, Order::RowMajor, &none);
    check_unary(&shape, Order::ColumnMajor, &flip, Order::ColumnMajor, &none);
}

#[test]
fn test_contiguous_transposed_copy() {
    let data: Vec<f64> = (0..24).map(f64::from).collect();
    let mut out = vec![0.0; 24];
    let x = NdArray::from_shape(&data[..], &[2, 3, 4], Order::ColumnMajor).unwrap();
    let mut y = NdArray::from_shape(&mut out[..], &[2, 3, 4], Order::RowMajor).unwrap();
    unary(&x, &mut y, |v| v).unwrap();

    for i in 0..2 {
        for j in 0..3 {
            for k in 0..4 {
                assert_eq!(out[i * 12 + j * 4 + k], data[i + 2 * j + 6 * k]);
            }
        }
    }
}

#[test]
fn test_complex_interleaved_binary() {
    let a = [1.0f64, 1.0, 2.0, -1.0, 0.0, 3.0, -2.0, 0.5];
    let b = [0.0f64, 1.0, 1.0, 0.0, 2.0, 2.0, 1.0, -1.0];
    let mut c = [0.0f64; 8];
    {
        let xa = NdArray::from_shape(ComplexBuffer::new(&a[..]), &[2, 2], Order::RowMajor).unwrap();
        // b read transposed
        let xb = NdArray::new(ComplexBuffer::new(&b[..]), &[2, 2], &[1, 2], 0, Order::RowMajor)
            .unwrap();
        let mut zc =
            NdArray::from_shape(ComplexBufferMut::new(&mut c[..]), &[2, 2], Order::RowMajor)
                .unwrap();
        binary(&xa, &xb, &mut zc, |p: Complex64, q: Complex64| p * q).unwrap();
    }
    let za = [
        Complex64::new(1.0, 1.0),
        Complex64::new(2.0, -1.0),
        Complex64::new(0.0, 3.0),
        Complex64::new(-2.0, 0.5),
    ];
    let zb = [
        Complex64::new(0.0, 1.0),
        Complex64::new(1.0, 0.0),
        Complex64::new(2.0, 2.0),
        Complex64::new(1.0, -1.0),
    ];
    let transposed = [zb[0], zb[2], zb[1], zb[3]];
    for i in 0..4 {
        let z = za[i] * transposed[i];
        assert_eq!(c[2 * i], z.re);
        assert_eq!(c[2 * i + 1], z.im);
    }
}

#[test]
fn test_unary2_sincos_negative_strides() {
    let x: Vec<f64> = (0..12).map(|i| i as f64 * 0.3).collect();
    let mut s = vec![0.0; 12];
    let mut c = vec![0.0; 12];
    {
        let xv = NdArray::new(&x[..], &[3, 4], &[-4, -1], 11, Order::RowMajor).unwrap();
        let mut sv = NdArray::from_shape(&mut s[..], &[3, 4], Order::RowMajor).unwrap();
        let mut cv = NdArray::from_shape(&mut c[..], &[3, 4], Order::RowMajor).unwrap();
        unary2(&xv, &mut sv, &mut cv, f64::sin_cos).unwrap();
    }
    for i in 0..12 {
        let (si, ci) = x[11 - i].sin_cos();
        assert_eq!(s[i].to_bits(), si.to_bits());
        assert_eq!(c[i].to_bits(), ci.to_bits());
    }
}

fn order_strategy() -> impl Strategy<Value = Order> {
    prop_oneof![Just(Order::RowMajor), Just(Order::ColumnMajor)]
}

proptest! {
    #[test]
    fn prop_binary_matches_naive(
        shape in proptest::collection::vec(0usize..4, 0..6),
        flips in proptest::collection::vec(any::<bool>(), 6),
        orders in (order_strategy(), order_strategy(), order_strategy()),
        seed in any::<u64>(),
    ) {
        let rank = shape.len();
        let flip_x = &flips[..rank];
        let flip_y: Vec<bool> = flip_x.iter().map(|f| !f).collect();
        let none = vec![false; rank];

        let (xs, xo, xlen) = padded_layout(&shape, orders.0, flip_x);
        let (ys, yo, ylen) = padded_layout(&shape, orders.1, &flip_y);
        let (zs, zo, zlen) = padded_layout(&shape, orders.2, &none);
        let x = random_buffer(xlen, seed);
        let y = random_buffer(ylen, seed.wrapping_add(1));
        let f = |a: f64, b: f64| a * b - a;

        let mut got = vec![0.0f64; zlen];
        {
            let xv = NdArray::new(&x[..], &shape, &xs, xo, orders.0).unwrap();
            let yv = NdArray::new(&y[..], &shape, &ys, yo, orders.1).unwrap();
            let mut zv = NdArray::new(&mut got[..], &shape, &zs, zo, orders.2).unwrap();
            binary(&xv, &yv, &mut zv, f).unwrap();
        }

        let mut expected = vec![0.0f64; zlen];
        for_each_multi_index(&shape, |idx| {
            expected[linear(idx, &zs, zo)] = f(x[linear(idx, &xs, xo)], y[linear(idx, &ys, yo)]);
        });

        let got_bits: Vec<u64> = got.iter().map(|v| v.to_bits()).collect();
        let expected_bits: Vec<u64> = expected.iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(got_bits, expected_bits);
    }
}

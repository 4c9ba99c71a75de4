//! Traversal engines for the ufunc dispatcher.
//!
//! Every engine walks `K` arrays in lockstep. Dimensions and strides arrive
//! already permuted into loop order: level `0` is the innermost loop and
//! `strides[level][k]` is the stride of array `k` at that level. Engines
//! hand `body` the `K` linear buffer indices of each visited element.
//!
//! Offsets are tracked as `isize` and only converted when an element is
//! visited. After the final element an engine may step an offset past the
//! buffer; that value is never dereferenced.

// ============================================================================
// Offset helpers
// ============================================================================

#[inline(always)]
fn advance<const K: usize>(offsets: &mut [isize; K], step: &[isize; K]) {
    for k in 0..K {
        offsets[k] += step[k];
    }
}

#[inline(always)]
fn advance_by<const K: usize>(offsets: &mut [isize; K], step: &[isize; K], times: isize) {
    for k in 0..K {
        offsets[k] += times * step[k];
    }
}

#[inline(always)]
fn visit<const K: usize, F>(offsets: &[isize; K], body: &mut F)
where
    F: FnMut([usize; K]),
{
    body(offsets.map(|o| o as usize));
}

// ============================================================================
// 1-D loop
// ============================================================================

/// Visit `n` elements starting at `offsets`, stepping by `strides`.
#[inline]
pub(crate) fn loop_1d<const K: usize, F>(
    n: usize,
    offsets: [isize; K],
    strides: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let mut idx = offsets;
    for _ in 0..n {
        visit(&idx, body);
        advance(&mut idx, &strides);
    }
}

// ============================================================================
// Loop interchange (increment tables)
// ============================================================================

/// Two nested loops with a precomputed outer increment.
///
/// `d1 = s1 - S0*s0` undoes the inner loop's travel and applies the outer
/// stride in a single addition.
#[inline]
pub(crate) fn interchange_2d<const K: usize, F>(
    shape: [usize; 2],
    strides: [[isize; K]; 2],
    offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let [s0, s1] = shape;
    let d0 = strides[0];
    let mut d1 = strides[1];
    for k in 0..K {
        d1[k] -= s0 as isize * d0[k];
    }

    let mut idx = offsets;
    for _ in 0..s1 {
        for _ in 0..s0 {
            visit(&idx, body);
            advance(&mut idx, &d0);
        }
        advance(&mut idx, &d1);
    }
}

/// Rank-`D` loop nest with stack-allocated increment table and counters.
#[inline]
pub(crate) fn interchange<const D: usize, const K: usize, F>(
    shape: [usize; D],
    strides: [[isize; K]; D],
    offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let mut incr = [[0isize; K]; D];
    let mut counters = [0usize; D];
    interchange_core(&shape, &strides, &mut incr, &mut counters, offsets, body);
}

/// Loop nest for ranks beyond the specialized set.
pub(crate) fn interchange_dyn<const K: usize, F>(
    shape: &[usize],
    strides: &[[isize; K]],
    offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let rank = shape.len();
    let mut incr = vec![[0isize; K]; rank];
    let mut counters = vec![0usize; rank];
    interchange_core(shape, strides, &mut incr, &mut counters, offsets, body);
}

/// Carry-style equivalent of `rank` nested loops.
///
/// Each level adds its increment `d_k = s_k - S_{k-1}*s_{k-1}` once per
/// iteration, exactly as the unrolled nest would, so the visiting order and
/// the visited indices match a hand-written nest of the same depth.
#[inline(always)]
fn interchange_core<const K: usize, F>(
    shape: &[usize],
    strides: &[[isize; K]],
    incr: &mut [[isize; K]],
    counters: &mut [usize],
    offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let rank = shape.len();
    debug_assert!(rank >= 1);
    debug_assert!(shape.iter().all(|&d| d > 0));

    incr[0] = strides[0];
    for level in 1..rank {
        for k in 0..K {
            incr[level][k] = strides[level][k] - shape[level - 1] as isize * strides[level - 1][k];
        }
    }
    counters.fill(0);

    let s0 = shape[0];
    let d0 = incr[0];
    let mut idx = offsets;
    loop {
        for _ in 0..s0 {
            visit(&idx, body);
            advance(&mut idx, &d0);
        }

        let mut level = 1usize;
        loop {
            if level == rank {
                return;
            }
            advance(&mut idx, &incr[level]);
            counters[level] += 1;
            if counters[level] < shape[level] {
                break;
            }
            counters[level] = 0;
            level += 1;
        }
    }
}

// ============================================================================
// Blocked iteration
// ============================================================================

/// Tiled traversal: every level is split into tiles of `block` elements.
///
/// Used when the arrays disagree on storage order or walk memory in mixed
/// directions, so no single loop order is contiguous for all of them.
pub(crate) fn blocked<const K: usize, F>(
    shape: &[usize],
    strides: &[[isize; K]],
    block: usize,
    offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let block = block.max(1);
    match shape.len() {
        0 => visit(&offsets, body),
        1 => loop_1d(shape[0], offsets, strides[0], body),
        2 => blocked_2d(shape, strides, block, offsets, body),
        3 => blocked_3d(shape, strides, block, offsets, body),
        _ => blocked_nd(shape, strides, block, offsets, body),
    }
}

/// 2D blocked kernel
///
/// Loop nesting: outer tiles over d1, inner tiles over d0, then the element
/// loops with d0 innermost.
#[inline]
fn blocked_2d<const K: usize, F>(
    shape: &[usize],
    strides: &[[isize; K]],
    block: usize,
    mut offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let d0 = shape[0];
    let d1 = shape[1];
    let b0 = block.min(d0);
    let b1 = block.min(d1);
    let inner = strides[0];

    let mut j1 = 0usize;
    while j1 < d1 {
        let blen1 = b1.min(d1 - j1);

        let mut j0 = 0usize;
        while j0 < d0 {
            let blen0 = b0.min(d0 - j0);

            for _ in 0..blen1 {
                loop_1d(blen0, offsets, inner, body);
                advance(&mut offsets, &strides[1]);
            }
            advance_by(&mut offsets, &strides[1], -(blen1 as isize));
            advance_by(&mut offsets, &strides[0], blen0 as isize);
            j0 += blen0;
        }

        advance_by(&mut offsets, &strides[0], -(d0 as isize));
        advance_by(&mut offsets, &strides[1], blen1 as isize);
        j1 += blen1;
    }
}

/// 3D blocked kernel
///
/// Loop nesting: tiles over d2, d1, d0, then element loops d2, d1 with the
/// d0 run innermost.
#[inline]
fn blocked_3d<const K: usize, F>(
    shape: &[usize],
    strides: &[[isize; K]],
    block: usize,
    mut offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let d0 = shape[0];
    let d1 = shape[1];
    let d2 = shape[2];
    let b0 = block.min(d0);
    let b1 = block.min(d1);
    let b2 = block.min(d2);
    let inner = strides[0];

    let mut j2 = 0usize;
    while j2 < d2 {
        let blen2 = b2.min(d2 - j2);

        let mut j1 = 0usize;
        while j1 < d1 {
            let blen1 = b1.min(d1 - j1);

            let mut j0 = 0usize;
            while j0 < d0 {
                let blen0 = b0.min(d0 - j0);

                for _ in 0..blen2 {
                    for _ in 0..blen1 {
                        loop_1d(blen0, offsets, inner, body);
                        advance(&mut offsets, &strides[1]);
                    }
                    advance_by(&mut offsets, &strides[1], -(blen1 as isize));
                    advance(&mut offsets, &strides[2]);
                }
                advance_by(&mut offsets, &strides[2], -(blen2 as isize));
                advance_by(&mut offsets, &strides[0], blen0 as isize);
                j0 += blen0;
            }

            advance_by(&mut offsets, &strides[0], -(d0 as isize));
            advance_by(&mut offsets, &strides[1], blen1 as isize);
            j1 += blen1;
        }

        advance_by(&mut offsets, &strides[1], -(d1 as isize));
        advance_by(&mut offsets, &strides[2], blen2 as isize);
        j2 += blen2;
    }
}

/// N-dimensional blocked kernel (iterative form).
///
/// Tile origins advance carry-style with level 0 fastest; each tile is
/// walked by the interchange loop nest over the tile's extents.
fn blocked_nd<const K: usize, F>(
    shape: &[usize],
    strides: &[[isize; K]],
    block: usize,
    offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    let rank = shape.len();
    debug_assert!(rank >= 4);

    let mut tile_start = vec![0usize; rank];
    let mut extents = vec![0usize; rank];
    let mut incr = vec![[0isize; K]; rank];
    let mut counters = vec![0usize; rank];
    let mut base = offsets;

    loop {
        for level in 0..rank {
            extents[level] = block.min(shape[level] - tile_start[level]);
        }
        interchange_core(&extents, strides, &mut incr, &mut counters, base, body);

        let mut level = 0usize;
        loop {
            if level == rank {
                return;
            }
            tile_start[level] += extents[level];
            advance_by(&mut base, &strides[level], extents[level] as isize);
            if tile_start[level] < shape[level] {
                break;
            }
            advance_by(&mut base, &strides[level], -(tile_start[level] as isize));
            tile_start[level] = 0;
            level += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference: plain nested loops over a multi-index, innermost level 0.
    fn reference<const K: usize>(
        shape: &[usize],
        strides: &[[isize; K]],
        offsets: [isize; K],
    ) -> Vec<[usize; K]> {
        let rank = shape.len();
        let total: usize = shape.iter().product();
        let mut out = Vec::with_capacity(total);
        let mut index = vec![0usize; rank];
        for _ in 0..total {
            let mut lin = offsets;
            for level in 0..rank {
                for k in 0..K {
                    lin[k] += index[level] as isize * strides[level][k];
                }
            }
            out.push(lin.map(|o| o as usize));
            for level in 0..rank {
                index[level] += 1;
                if index[level] < shape[level] {
                    break;
                }
                index[level] = 0;
            }
        }
        out
    }

    fn sorted<const K: usize>(mut v: Vec<[usize; K]>) -> Vec<[usize; K]> {
        v.sort();
        v
    }

    #[test]
    fn test_loop_1d_negative_stride() {
        let mut seen = Vec::new();
        loop_1d(4, [6, 0], [-2, 1], &mut |idx: [usize; 2]| seen.push(idx));
        assert_eq!(seen, vec![[6, 0], [4, 1], [2, 2], [0, 3]]);
    }

    #[test]
    fn test_interchange_2d_matches_reference() {
        let shape = [3usize, 4];
        let strides = [[1isize, 4], [3, -1]];
        let offsets = [0isize, 3];
        let mut seen = Vec::new();
        interchange_2d(shape, strides, offsets, &mut |idx: [usize; 2]| seen.push(idx));
        assert_eq!(seen, reference(&shape, &strides, offsets));
    }

    #[test]
    fn test_interchange_const_and_dyn_agree() {
        let shape = [2usize, 3, 2, 2];
        let strides = [[1isize], [2], [6], [12]];
        let mut a = Vec::new();
        interchange(shape, strides, [0], &mut |idx: [usize; 1]| a.push(idx));
        let mut b = Vec::new();
        interchange_dyn(&shape, &strides, [0], &mut |idx: [usize; 1]| b.push(idx));
        assert_eq!(a, b);
        assert_eq!(a, reference(&shape, &strides, [0]));
        assert_eq!(a.iter().map(|i| i[0]).collect::<Vec<_>>(), (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_blocked_visits_same_set() {
        for shape in [vec![10usize, 7], vec![5, 9, 3], vec![3, 4, 5, 2], vec![2, 3, 2, 3, 2]] {
            let rank = shape.len();
            let mut strides_x = vec![0isize; rank];
            let mut acc = 1isize;
            for level in (0..rank).rev() {
                strides_x[level] = acc;
                acc *= shape[level] as isize;
            }
            let total = acc;
            // y walks the same elements backward in column-major order
            let mut strides_y = vec![0isize; rank];
            let mut acc = 1isize;
            for level in 0..rank {
                strides_y[level] = -acc;
                acc *= shape[level] as isize;
            }
            let strides: Vec<[isize; 2]> =
                (0..rank).map(|l| [strides_x[l], strides_y[l]]).collect();
            let offsets = [0isize, total - 1];

            for block in [1usize, 2, 4, 8] {
                let mut seen = Vec::new();
                blocked(&shape, &strides, block, offsets, &mut |idx: [usize; 2]| seen.push(idx));
                assert_eq!(seen.len(), total as usize);
                assert_eq!(sorted(seen), sorted(reference(&shape, &strides, offsets)));
            }
        }
    }
}

//! One-dimensional kernels over strided buffers.
//!
//! Every kernel operates on `n` elements of a flat slice addressed by a
//! stride (which may be negative or zero) and comes in two forms:
//!
//! - a conventional form `gfoo(n, ..., x, stride_x)` whose starting index is
//!   derived from the stride sign (see [`stride::stride2offset`])
//! - an `_ndarray` form taking the starting offset explicitly
//!
//! Prefixes follow the BLAS convention: `g` is generic over the element
//! type, `s` and `d` are single- and double-precision aliases.
//!
//! Kernels returning a buffer hand back the same mutable slice they were
//! given. Indexing is bounds checked; out-of-range views additionally trip
//! a debug assertion naming the offending geometry.
//!
//! # Example
//!
//! ```rust
//! use strided_blas::{gcusumpw, grev};
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let mut y = [0.0; 4];
//! gcusumpw(4, 0.0, &x, -1, &mut y, 1);
//! assert_eq!(y, [4.0, 7.0, 9.0, 10.0]);
//!
//! grev(4, &mut y, 1);
//! assert_eq!(y, [10.0, 9.0, 7.0, 4.0]);
//! ```

pub mod apxsum;
pub mod cusum;
pub mod level1;
pub mod mskminmax;
pub mod rev;
pub mod sort;
pub mod stride;

pub use apxsum::{
    dapxsum, dapxsum_ndarray, gapxsum, gapxsum_ndarray, gapxsumkbn, gapxsumkbn_ndarray, gapxsumpw,
    gapxsumpw_ndarray, gsumpw, sapxsum, sapxsum_ndarray,
};
pub use cusum::{
    dcusumpw, dcusumpw_ndarray, gcusum, gcusum_ndarray, gcusumkbn, gcusumkbn_ndarray, gcusumpw,
    gcusumpw_ndarray, scusumpw, scusumpw_ndarray,
};
pub use level1::{
    daxpy, ddot, gaxpy, gaxpy_ndarray, gcopy, gcopy_ndarray, gdot, gdot_ndarray, gscal,
    gscal_ndarray, gswap, gswap_ndarray, saxpy,
};
pub use mskminmax::{
    dnanmskmin, dnanmskmin_ndarray, gmskmax, gmskmax_ndarray, gmskmin, gmskmin_ndarray, gnanmskmax,
    gnanmskmax_ndarray, gnanmskmin, gnanmskmin_ndarray, snanmskmin,
};
pub use rev::{drev, drev_ndarray, grev, grev_ndarray, srev, srev_ndarray};
pub use sort::{
    dsorthp, dsorthp_ndarray, gsort2hp, gsort2hp_ndarray, gsorthp, gsorthp_ndarray, gsortsh,
    gsortsh_ndarray, ssortsh, ssortsh_ndarray,
};
pub use stride::{stride2offset, StridedIndices};

//! Storage order and loop ordering.
//!
//! Every loop order produced here lists dimensions innermost first: entry
//! `0` is the dimension walked by the innermost loop.

use std::fmt;
use std::str::FromStr;

use crate::UfuncError;

/// Declared memory layout of an ndarray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Last index varies fastest (C order).
    #[default]
    RowMajor,
    /// First index varies fastest (Fortran order).
    ColumnMajor,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::RowMajor => "row-major",
            Order::ColumnMajor => "column-major",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = UfuncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row-major" => Ok(Order::RowMajor),
            "column-major" => Ok(Order::ColumnMajor),
            _ => Err(UfuncError::InvalidOrder(s.to_string())),
        }
    }
}

/// Direction in which a set of strides walks memory.
///
/// Returns `1` when no stride is negative, `-1` when every stride is
/// negative, and `0` for mixed signs.
pub fn iteration_order(strides: &[isize]) -> i8 {
    let negative = strides.iter().filter(|&&s| s < 0).count();
    if negative == 0 {
        1
    } else if negative == strides.len() {
        -1
    } else {
        0
    }
}

/// Loop order implied by a declared storage order.
///
/// Row-major iterates the last dimension innermost, column-major the first.
pub(crate) fn interchange_order(rank: usize, order: Order) -> Vec<usize> {
    match order {
        Order::RowMajor => (0..rank).rev().collect(),
        Order::ColumnMajor => (0..rank).collect(),
    }
}

/// Loop order sorted by increasing stride magnitude.
///
/// Ties keep their original dimension order, so a contiguous column-major
/// layout maps to the identity permutation.
pub(crate) fn stride_order(strides: &[isize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..strides.len()).collect();
    order.sort_by(|&a, &b| {
        strides[a]
            .unsigned_abs()
            .cmp(&strides[b].unsigned_abs())
            .then_with(|| a.cmp(&b))
    });
    order
}

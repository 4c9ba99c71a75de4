//! Data type tags for ndarray buffers.
//!
//! The tag strings (`"int8"`, `"float64"`, `"generic"`, ...) are the
//! contract with dtype-resolution code outside this crate, so parsing and
//! printing round-trip exactly.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex;

use crate::UfuncError;

/// Element data type of an ndarray buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Int8,
    Int16,
    Int32,
    Uint8,
    /// Clamped unsigned 8-bit integers.
    Uint8c,
    Uint16,
    Uint32,
    Float32,
    Float64,
    Complex64,
    Complex128,
    /// Arbitrary (boxed or user-defined) element type.
    Generic,
}

impl DType {
    /// All known dtypes, in a stable order.
    pub const ALL: [DType; 12] = [
        DType::Int8,
        DType::Int16,
        DType::Int32,
        DType::Uint8,
        DType::Uint8c,
        DType::Uint16,
        DType::Uint32,
        DType::Float32,
        DType::Float64,
        DType::Complex64,
        DType::Complex128,
        DType::Generic,
    ];

    /// The canonical tag string.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Uint8 => "uint8",
            DType::Uint8c => "uint8c",
            DType::Uint16 => "uint16",
            DType::Uint32 => "uint32",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
            DType::Generic => "generic",
        }
    }

    /// Size of one element in bytes, or `None` for `generic`.
    pub fn bytes_per_element(self) -> Option<usize> {
        match self {
            DType::Int8 | DType::Uint8 | DType::Uint8c => Some(1),
            DType::Int16 | DType::Uint16 => Some(2),
            DType::Int32 | DType::Uint32 | DType::Float32 => Some(4),
            DType::Float64 | DType::Complex64 => Some(8),
            DType::Complex128 => Some(16),
            DType::Generic => None,
        }
    }

    pub fn is_floating_point(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    pub fn is_complex(self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DType::Int8
                | DType::Int16
                | DType::Int32
                | DType::Uint8
                | DType::Uint8c
                | DType::Uint16
                | DType::Uint32
        )
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = UfuncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::ALL
            .iter()
            .copied()
            .find(|dt| dt.as_str() == s)
            .ok_or_else(|| UfuncError::InvalidDType(s.to_string()))
    }
}

/// Element types that can live in an ndarray buffer.
///
/// Implement this for a custom `Copy` type with `DTYPE = DType::Generic`
/// to run it through the dispatcher.
pub trait Element: Copy {
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($t:ty => $dt:expr),* $(,)?) => {
        $(impl Element for $t {
            const DTYPE: DType = $dt;
        })*
    };
}

impl_element!(
    i8 => DType::Int8,
    i16 => DType::Int16,
    i32 => DType::Int32,
    u8 => DType::Uint8,
    u16 => DType::Uint16,
    u32 => DType::Uint32,
    f32 => DType::Float32,
    f64 => DType::Float64,
    Complex<f32> => DType::Complex64,
    Complex<f64> => DType::Complex128,
    i64 => DType::Generic,
    u64 => DType::Generic,
    isize => DType::Generic,
    usize => DType::Generic,
    bool => DType::Generic,
);

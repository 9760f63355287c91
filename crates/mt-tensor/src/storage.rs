use crate::dtype::DType;
use crate::error::{Result, TensorError};
use std::ops::{Add, Sub};

/// CPU-side tensor storage: a closed sum over the four supported element
/// types, each backed by an owned `Vec`.
///
/// Keeping the element type in the variant (rather than a raw byte buffer
/// plus a dtype tag) makes misinterpreting the buffer unrepresentable; the
/// dtype tag on [`crate::Tensor`] always agrees with the variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuStorage {
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Scalar types that tensor kernels can be monomorphized over.
///
/// Conversions follow `as`-cast semantics: integer widening is exact,
/// float-to-int and narrowing conversions truncate, int-to-float rounds to
/// nearest. The arithmetic bounds let a kernel combine converted operands
/// at the output dtype.
pub(crate) trait Element: Copy + Add<Output = Self> + Sub<Output = Self> {
    fn from_i32(v: i32) -> Self;
    fn from_i64(v: i64) -> Self;
    fn from_f32(v: f32) -> Self;
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                fn from_i32(v: i32) -> Self {
                    v as $ty
                }
                fn from_i64(v: i64) -> Self {
                    v as $ty
                }
                fn from_f32(v: f32) -> Self {
                    v as $ty
                }
                fn from_f64(v: f64) -> Self {
                    v as $ty
                }
            }
        )*
    };
}

impl_element!(i32, i64, f32, f64);

/// Allocate a zero-filled vector, surfacing heap exhaustion as a
/// `TensorError` instead of aborting the process.
fn zeroed_vec<T: Clone + Default>(n: usize, elem_bytes: usize) -> Result<Vec<T>> {
    let mut v: Vec<T> = Vec::new();
    v.try_reserve_exact(n).map_err(|_| {
        TensorError::AllocationFailure(format!(
            "could not reserve {} bytes",
            n.saturating_mul(elem_bytes)
        ))
    })?;
    v.resize(n, T::default());
    Ok(v)
}

impl CpuStorage {
    /// Create zero-filled storage for the given dtype and element count.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if the backing buffer cannot be obtained.
    pub fn zeros(dtype: DType, n: usize) -> Result<Self> {
        let bytes = dtype.size_in_bytes();
        Ok(match dtype {
            DType::I32 => CpuStorage::I32(zeroed_vec(n, bytes)?),
            DType::I64 => CpuStorage::I64(zeroed_vec(n, bytes)?),
            DType::F32 => CpuStorage::F32(zeroed_vec(n, bytes)?),
            DType::F64 => CpuStorage::F64(zeroed_vec(n, bytes)?),
        })
    }

    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        match self {
            CpuStorage::I32(v) => v.len(),
            CpuStorage::I64(v) => v.len(),
            CpuStorage::F32(v) => v.len(),
            CpuStorage::F64(v) => v.len(),
        }
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dtype of this storage.
    pub fn dtype(&self) -> DType {
        match self {
            CpuStorage::I32(_) => DType::I32,
            CpuStorage::I64(_) => DType::I64,
            CpuStorage::F32(_) => DType::F32,
            CpuStorage::F64(_) => DType::F64,
        }
    }

    /// Returns the data as an i32 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the storage holds another element type.
    pub fn as_i32_slice(&self) -> Result<&[i32]> {
        match self {
            CpuStorage::I32(v) => Ok(v.as_slice()),
            other => Err(TensorError::DTypeMismatch {
                expected: DType::I32,
                got: other.dtype(),
            }),
        }
    }

    /// Returns the data as an i64 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the storage holds another element type.
    pub fn as_i64_slice(&self) -> Result<&[i64]> {
        match self {
            CpuStorage::I64(v) => Ok(v.as_slice()),
            other => Err(TensorError::DTypeMismatch {
                expected: DType::I64,
                got: other.dtype(),
            }),
        }
    }

    /// Returns the data as an f32 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the storage holds another element type.
    pub fn as_f32_slice(&self) -> Result<&[f32]> {
        match self {
            CpuStorage::F32(v) => Ok(v.as_slice()),
            other => Err(TensorError::DTypeMismatch {
                expected: DType::F32,
                got: other.dtype(),
            }),
        }
    }

    /// Returns the data as an f64 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the storage holds another element type.
    pub fn as_f64_slice(&self) -> Result<&[f64]> {
        match self {
            CpuStorage::F64(v) => Ok(v.as_slice()),
            other => Err(TensorError::DTypeMismatch {
                expected: DType::F64,
                got: other.dtype(),
            }),
        }
    }

    /// Read element `i` at its stored dtype and convert it to `T`.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    pub(crate) fn convert_at<T: Element>(&self, i: usize) -> T {
        match self {
            CpuStorage::I32(v) => T::from_i32(v[i]),
            CpuStorage::I64(v) => T::from_i64(v[i]),
            CpuStorage::F32(v) => T::from_f32(v[i]),
            CpuStorage::F64(v) => T::from_f64(v[i]),
        }
    }
}

impl From<Vec<i32>> for CpuStorage {
    fn from(data: Vec<i32>) -> Self {
        CpuStorage::I32(data)
    }
}

impl From<Vec<i64>> for CpuStorage {
    fn from(data: Vec<i64>) -> Self {
        CpuStorage::I64(data)
    }
}

impl From<Vec<f32>> for CpuStorage {
    fn from(data: Vec<f32>) -> Self {
        CpuStorage::F32(data)
    }
}

impl From<Vec<f64>> for CpuStorage {
    fn from(data: Vec<f64>) -> Self {
        CpuStorage::F64(data)
    }
}

use crate::error::{Result, TensorError};
use std::fmt;

/// A tensor shape, wrapping a vector of dimension sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape from a vector of dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    /// Create a shape from a slice of dimensions.
    pub fn from_slice(dims: &[usize]) -> Self {
        Shape {
            dims: dims.to_vec(),
        }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of all dimension sizes).
    ///
    /// Unchecked product; use [`Shape::checked_numel`] when the shape has not
    /// been validated yet.
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Total number of elements, guarding the product against overflow.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if the product exceeds `usize::MAX`.
    pub fn checked_numel(&self) -> Result<usize> {
        let mut numel = 1usize;
        for &d in &self.dims {
            numel = numel.checked_mul(d).ok_or_else(|| {
                TensorError::AllocationFailure(format!(
                    "element count of shape {:?} overflows usize",
                    self.dims
                ))
            })?;
        }
        Ok(numel)
    }

    /// Checks that the shape describes a real tensor geometry: at least one
    /// dimension, and every dimension nonzero.
    ///
    /// # Errors
    /// Returns `InvalidShape` otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.dims.is_empty() || self.dims.iter().any(|&d| d == 0) {
            return Err(TensorError::InvalidShape {
                dims: self.dims.clone(),
            });
        }
        Ok(())
    }

    /// Returns the size of dimension `i`.
    ///
    /// # Panics
    /// Panics if `i >= ndim()`.
    pub fn dim(&self, i: usize) -> usize {
        self.dims[i]
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Computes row-major contiguous strides for this shape.
    ///
    /// The last dimension has stride 1, and stride[i] = stride[i+1] *
    /// shape[i+1]. For a shape [d0, d1, d2], the strides are [d1*d2, d2, 1].
    pub fn strides(&self) -> Vec<usize> {
        if self.dims.is_empty() {
            return vec![];
        }
        let mut strides = vec![0usize; self.dims.len()];
        strides[self.dims.len() - 1] = 1;
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Checks if the given strides correspond to a contiguous (row-major)
    /// layout for this shape.
    pub fn is_contiguous(&self, strides: &[usize]) -> bool {
        if strides.len() != self.dims.len() {
            return false;
        }
        let expected = self.strides();
        strides == expected.as_slice()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::from_slice(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape::new(dims.to_vec())
    }
}

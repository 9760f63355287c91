use crate::device::Device;
use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::ops;
use crate::shape::Shape;
use crate::storage::CpuStorage;

/// A tensor backed by typed CPU storage.
///
/// Owns its shape, its derived row-major strides, and its data buffer as a
/// single aggregate; dropping the tensor releases all of them together, so
/// there is no separate destroy step and no way to free them partially. A
/// tensor is never shared: operations take it by reference and return newly
/// allocated results.
///
/// `offset` and `strides` are stored to leave room for views, but every
/// tensor built by this crate is contiguous with offset 0; nothing here
/// produces anything else.
#[derive(Debug, Clone)]
pub struct Tensor {
    storage: CpuStorage,
    shape: Shape,
    strides: Vec<usize>,
    offset: usize,
    dtype: DType,
    device: Device,
    requires_grad: bool,
}

impl Tensor {
    /// Create a zero-filled tensor with the given shape and dtype.
    ///
    /// # Errors
    /// - `InvalidShape` if the shape has rank 0 or any zero dimension.
    /// - `AllocationFailure` if the element count or byte count overflows,
    ///   or the buffer cannot be allocated.
    pub fn zeros(shape: impl Into<Shape>, dtype: DType) -> Result<Tensor> {
        let shape = shape.into();
        let numel = Self::checked_size(&shape, dtype)?;
        let storage = CpuStorage::zeros(dtype, numel)?;
        Ok(Self::from_parts(storage, shape, Device::Cpu))
    }

    /// Create a tensor from existing data and a shape.
    ///
    /// The data is supplied in the target dtype's native representation: a
    /// typed `Vec` (or a prebuilt [`CpuStorage`]); the tensor's dtype is
    /// taken from it.
    ///
    /// # Errors
    /// - `InvalidShape` / `AllocationFailure` as for [`Tensor::zeros`].
    /// - `SizeMismatch` if the data length differs from the shape's element
    ///   count.
    pub fn new(data: impl Into<CpuStorage>, shape: impl Into<Shape>) -> Result<Tensor> {
        let storage = data.into();
        let shape = shape.into();
        let numel = Self::checked_size(&shape, storage.dtype())?;
        if storage.len() != numel {
            return Err(TensorError::SizeMismatch {
                expected: numel,
                got: storage.len(),
                dims: shape.dims().to_vec(),
            });
        }
        Ok(Self::from_parts(storage, shape, Device::Cpu))
    }

    /// Validates the shape and guards the size computations against
    /// overflow, returning the element count.
    fn checked_size(shape: &Shape, dtype: DType) -> Result<usize> {
        shape.validate()?;
        let numel = shape.checked_numel()?;
        numel.checked_mul(dtype.size_in_bytes()).ok_or_else(|| {
            TensorError::AllocationFailure(format!(
                "byte size of shape {} ({}) overflows usize",
                shape, dtype
            ))
        })?;
        Ok(numel)
    }

    /// Assemble a tensor from already-validated parts.
    pub(crate) fn from_parts(storage: CpuStorage, shape: Shape, device: Device) -> Tensor {
        let strides = shape.strides();
        let dtype = storage.dtype();
        Tensor {
            storage,
            shape,
            strides,
            offset: 0,
            dtype,
            device,
            requires_grad: false,
        }
    }

    /// Returns a reference to the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's row-major strides.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Base displacement into the data buffer. Always 0 for tensors built
    /// by this crate.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Returns the tensor's data type.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the tensor's execution location.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Whether gradients were requested for this tensor. Inert: no gradient
    /// machinery exists in this crate.
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn set_requires_grad(&mut self, requires_grad: bool) {
        self.requires_grad = requires_grad;
    }

    /// Returns the underlying storage reference.
    pub fn storage(&self) -> &CpuStorage {
        &self.storage
    }

    /// Returns the underlying data as an i32 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the tensor's dtype is not `I32`.
    pub fn data_i32(&self) -> Result<&[i32]> {
        self.storage.as_i32_slice()
    }

    /// Returns the underlying data as an i64 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the tensor's dtype is not `I64`.
    pub fn data_i64(&self) -> Result<&[i64]> {
        self.storage.as_i64_slice()
    }

    /// Returns the underlying data as an f32 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the tensor's dtype is not `F32`.
    pub fn data_f32(&self) -> Result<&[f32]> {
        self.storage.as_f32_slice()
    }

    /// Returns the underlying data as an f64 slice.
    ///
    /// # Errors
    /// Returns `DTypeMismatch` if the tensor's dtype is not `F64`.
    pub fn data_f64(&self) -> Result<&[f64]> {
        self.storage.as_f64_slice()
    }

    /// Buffer position of the element at the given multi-dimensional
    /// indices: `offset + sum(indices[d] * strides[d])`.
    ///
    /// This honors `offset` and per-dimension strides rather than assuming
    /// linear layout, so it stays correct for any tensor whose invariants
    /// hold.
    pub fn buffer_index(&self, indices: &[usize]) -> usize {
        self.offset
            + indices
                .iter()
                .zip(self.strides.iter())
                .map(|(i, s)| i * s)
                .sum::<usize>()
    }

    /// Elementwise addition with dtype promotion. See [`ops::add`].
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        ops::add(self, other)
    }

    /// Elementwise subtraction with dtype promotion. See [`ops::sub`].
    pub fn sub(&self, other: &Tensor) -> Result<Tensor> {
        ops::sub(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros([2, 3], DType::I32).unwrap();
        assert_eq!(t.shape().dims(), &[2, 3]);
        assert_eq!(t.strides(), &[3, 1]);
        assert_eq!(t.numel(), 6);
        assert_eq!(t.ndim(), 2);
        assert_eq!(t.offset(), 0);
        assert_eq!(t.dtype(), DType::I32);
        assert_eq!(t.device(), Device::Cpu);
        assert!(!t.requires_grad());
        assert_eq!(t.data_i32().unwrap(), &[0; 6]);
    }

    #[test]
    fn test_zeros_every_dtype_reads_back_zero() {
        assert_eq!(
            Tensor::zeros([5], DType::I64).unwrap().data_i64().unwrap(),
            &[0; 5]
        );
        assert_eq!(
            Tensor::zeros([5], DType::F32).unwrap().data_f32().unwrap(),
            &[0.0; 5]
        );
        assert_eq!(
            Tensor::zeros([5], DType::F64).unwrap().data_f64().unwrap(),
            &[0.0; 5]
        );
    }

    #[test]
    fn test_new_round_trips() {
        let t = Tensor::new(vec![1i32, 2, 3, 4, 5, 6], [2, 3]).unwrap();
        assert_eq!(t.dtype(), DType::I32);
        assert_eq!(t.data_i32().unwrap(), &[1, 2, 3, 4, 5, 6]);

        let f = Tensor::new(vec![1.5f64, -2.25], [2]).unwrap();
        assert_eq!(f.dtype(), DType::F64);
        assert_eq!(f.data_f64().unwrap(), &[1.5, -2.25]);
    }

    #[test]
    fn test_new_size_mismatch() {
        let err = Tensor::new(vec![1i32, 2, 3], [2, 2]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::SizeMismatch {
                expected: 4,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_shape() {
        assert!(matches!(
            Tensor::zeros(Shape::new(vec![]), DType::F32),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            Tensor::zeros([3, 0], DType::F32),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_size_overflow() {
        assert!(matches!(
            Tensor::zeros([usize::MAX, 2], DType::I32),
            Err(TensorError::AllocationFailure(_))
        ));
        // element count fits, byte count does not
        assert!(matches!(
            Tensor::zeros([usize::MAX / 2], DType::F64),
            Err(TensorError::AllocationFailure(_))
        ));
    }

    #[test]
    fn test_wrong_dtype_accessor() {
        let t = Tensor::zeros([2], DType::F32).unwrap();
        assert!(matches!(
            t.data_i32(),
            Err(TensorError::DTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_buffer_index() {
        let t = Tensor::zeros([2, 3, 4], DType::I32).unwrap();
        assert_eq!(t.buffer_index(&[0, 0, 0]), 0);
        assert_eq!(t.buffer_index(&[1, 2, 3]), 12 + 8 + 3);
    }
}

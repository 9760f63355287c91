//! Elementwise binary operations with dtype promotion.
//!
//! Operands must share a shape and a device; no broadcasting. The output
//! dtype is the promotion of the operand dtypes, and each input is read at
//! its own dtype and converted before combining. Kernels index the backing
//! buffers linearly, which is valid because every tensor this crate builds
//! is contiguous with offset 0.

use crate::dtype::DType;
use crate::error::{Result, TensorError};
use crate::storage::{CpuStorage, Element};
use crate::tensor::Tensor;

#[derive(Debug, Clone, Copy)]
enum BinaryOp {
    Add,
    Sub,
}

impl BinaryOp {
    fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
        }
    }
}

/// Checks that two tensors have exactly the same shape: equal rank and
/// equal extent in every dimension.
pub fn same_shape(a: &Tensor, b: &Tensor) -> bool {
    a.shape().dims() == b.shape().dims()
}

/// Elementwise addition: `out[i] = a[i] + b[i]` at the promoted dtype.
///
/// The output inherits `a`'s device.
///
/// # Errors
/// - `ShapeMismatch` if the shapes differ in rank or any dimension.
/// - `DeviceMismatch` if the operands are on different devices.
pub fn add(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    binary_op(a, b, BinaryOp::Add)
}

/// Elementwise subtraction: `out[i] = a[i] - b[i]` at the promoted dtype.
///
/// Same contract and failure conditions as [`add`].
pub fn sub(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    binary_op(a, b, BinaryOp::Sub)
}

fn binary_op(a: &Tensor, b: &Tensor, op: BinaryOp) -> Result<Tensor> {
    if !same_shape(a, b) {
        return Err(TensorError::ShapeMismatch {
            a: a.shape().dims().to_vec(),
            b: b.shape().dims().to_vec(),
        });
    }
    if a.device() != b.device() {
        return Err(TensorError::DeviceMismatch {
            a: a.device(),
            b: b.device(),
        });
    }

    let out_dtype = a.dtype().promote(b.dtype());
    let n = a.numel();
    let storage = match out_dtype {
        DType::I32 => CpuStorage::I32(binary_map(a.storage(), b.storage(), n, op)),
        DType::I64 => CpuStorage::I64(binary_map(a.storage(), b.storage(), n, op)),
        DType::F32 => CpuStorage::F32(binary_map(a.storage(), b.storage(), n, op)),
        DType::F64 => CpuStorage::F64(binary_map(a.storage(), b.storage(), n, op)),
    };
    Ok(Tensor::from_parts(storage, a.shape().clone(), a.device()))
}

/// Applies `op` across all linear positions, converting each operand from
/// its stored dtype to the output element type `T`.
fn binary_map<T: Element>(a: &CpuStorage, b: &CpuStorage, n: usize, op: BinaryOp) -> Vec<T> {
    (0..n)
        .map(|i| op.apply(a.convert_at::<T>(i), b.convert_at::<T>(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use crate::dtype::DType;
    use crate::shape::Shape;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_shape() {
        let a = Tensor::zeros([2, 3], DType::I32).unwrap();
        let b = Tensor::zeros([2, 3], DType::F64).unwrap();
        let c = Tensor::zeros([3, 2], DType::I32).unwrap();
        assert!(same_shape(&a, &b));
        assert!(!same_shape(&a, &c));
    }

    #[test]
    fn test_add_i32() {
        let t = Tensor::new(vec![1i32, 2, 3, 4, 5, 6], [2, 3]).unwrap();
        let out = add(&t, &t).unwrap();
        assert_eq!(out.shape().dims(), &[2, 3]);
        assert_eq!(out.dtype(), DType::I32);
        assert_eq!(out.data_i32().unwrap(), &[2, 4, 6, 8, 10, 12]);
    }

    #[test]
    fn test_add_commutative() {
        let a = Tensor::new(vec![1i64, -7, 30], [3]).unwrap();
        let b = Tensor::new(vec![10i64, 20, 12], [3]).unwrap();
        assert_eq!(
            add(&a, &b).unwrap().data_i64().unwrap(),
            add(&b, &a).unwrap().data_i64().unwrap()
        );
    }

    #[test]
    fn test_sub() {
        let a = Tensor::new(vec![5.0f32, 3.0, 1.0], [3]).unwrap();
        let b = Tensor::new(vec![1.0f32, 1.5, 2.0], [3]).unwrap();
        let out = sub(&a, &b).unwrap();
        assert_eq!(out.data_f32().unwrap(), &[4.0, 1.5, -1.0]);
    }

    #[test]
    fn test_add_promotes_i32_f32() {
        let a = Tensor::new(vec![1i32, 2, 3], [3]).unwrap();
        let b = Tensor::new(vec![0.5f32, 0.25, -1.0], [3]).unwrap();
        let out = add(&a, &b).unwrap();
        assert_eq!(out.dtype(), DType::F32);
        let data = out.data_f32().unwrap();
        assert_relative_eq!(data[0], 1.5);
        assert_relative_eq!(data[1], 2.25);
        assert_relative_eq!(data[2], 2.0);
    }

    #[test]
    fn test_add_promotes_i64_f64() {
        let a = Tensor::new(vec![1i64, 2], [2]).unwrap();
        let b = Tensor::new(vec![0.5f64, 0.5], [2]).unwrap();
        let out = add(&a, &b).unwrap();
        assert_eq!(out.dtype(), DType::F64);
        assert_eq!(out.data_f64().unwrap(), &[1.5, 2.5]);
    }

    #[test]
    fn test_shape_mismatch_same_numel() {
        let a = Tensor::zeros([2, 3], DType::I32).unwrap();
        let b = Tensor::zeros([3, 2], DType::I32).unwrap();
        assert!(matches!(
            add(&a, &b),
            Err(TensorError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            sub(&a, &b),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_shape_mismatch_ndim() {
        let a = Tensor::zeros([6], DType::I32).unwrap();
        let b = Tensor::zeros([2, 3], DType::I32).unwrap();
        assert!(matches!(
            add(&a, &b),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_device_mismatch() {
        let a = Tensor::zeros([2], DType::F32).unwrap();
        // Nothing public produces a Cuda tensor; assemble one directly.
        let b = Tensor::from_parts(
            CpuStorage::from(vec![0.0f32, 0.0]),
            Shape::new(vec![2]),
            Device::Cuda,
        );
        assert!(matches!(
            add(&a, &b),
            Err(TensorError::DeviceMismatch {
                a: Device::Cpu,
                b: Device::Cuda,
            })
        ));
    }

    #[test]
    fn test_output_inherits_device() {
        let a = Tensor::new(vec![1i32], [1]).unwrap();
        let out = a.add(&a).unwrap();
        assert_eq!(out.device(), Device::Cpu);
        assert_eq!(out.offset(), 0);
        assert!(out.shape().is_contiguous(out.strides()));
    }
}

use crate::device::Device;
use crate::dtype::DType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TensorError {
    #[error("invalid shape {dims:?}: rank and every dimension must be positive")]
    InvalidShape { dims: Vec<usize> },
    #[error("data length {got} does not match shape {dims:?} (numel={expected})")]
    SizeMismatch {
        expected: usize,
        got: usize,
        dims: Vec<usize>,
    },
    #[error("allocation failure: {0}")]
    AllocationFailure(String),
    #[error("shape mismatch: {a:?} vs {b:?}")]
    ShapeMismatch { a: Vec<usize>, b: Vec<usize> },
    #[error("device mismatch: {a} vs {b}")]
    DeviceMismatch { a: Device, b: Device },
    #[error("dtype mismatch: expected {expected}, got {got}")]
    DTypeMismatch { expected: DType, got: DType },
}

pub type Result<T> = std::result::Result<T, TensorError>;

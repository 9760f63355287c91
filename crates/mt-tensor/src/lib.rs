//! `mt-tensor` - minimal strided tensor core for minitensor.
//!
//! This crate provides:
//! - A `Tensor` type owning typed CPU storage with row-major shape/stride
//!   geometry
//! - A closed `DType` set (int32, int64, float32, float64) with a total
//!   promotion order
//! - Dtype-promoting elementwise `add`/`sub` over same-shape tensors
//! - A deterministic pretty-printer with edge truncation for large tensors
//!
//! Tensors are single-owner values: constructors return them, operations
//! borrow them and return fresh results, and dropping one releases its
//! shape, strides, and data together. Host-language bindings, broadcasting,
//! autodiff, and accelerator execution are out of scope.

pub mod device;
pub mod dtype;
pub mod error;
pub mod fmt;
pub mod ops;
pub mod shape;
pub mod storage;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use device::Device;
pub use dtype::DType;
pub use error::{Result, TensorError};
pub use fmt::{render, render_opt};
pub use ops::{add, same_shape, sub};
pub use shape::Shape;
pub use storage::CpuStorage;
pub use tensor::Tensor;

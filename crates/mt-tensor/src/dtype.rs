use std::fmt;

/// Supported data types for tensor storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
}

impl DType {
    /// Returns the size in bytes of a single element.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::I32 => 4,
            DType::I64 => 8,
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }

    /// Position in the promotion order. Wider / more general types rank
    /// higher: I32 < I64 < F32 < F64.
    fn rank(&self) -> u8 {
        match self {
            DType::I32 => 0,
            DType::I64 => 1,
            DType::F32 => 2,
            DType::F64 => 3,
        }
    }

    /// Returns the promoted dtype for a binary operation between `self` and
    /// `other`: whichever operand has the non-lower rank.
    ///
    /// Commutative; equal ranks imply equal dtypes, so ties are trivially
    /// well-defined.
    pub fn promote(self, other: DType) -> DType {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::I32 => write!(f, "int32"),
            DType::I64 => write!(f, "int64"),
            DType::F32 => write!(f, "float32"),
            DType::F64 => write!(f, "float64"),
        }
    }
}

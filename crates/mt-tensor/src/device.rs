use std::fmt;

/// Execution location of a tensor's data.
///
/// Only `Cpu` has an execution path today. `Cuda` exists as a tag so that
/// device checks and error reporting are in place, but no operation in this
/// crate produces or accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda => write!(f, "cuda"),
        }
    }
}

use thiserror::Error;

/// An error type for the dense kernels.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Length mismatch between a buffer and the size it should have
    #[error("Length mismatch: expected {0} elements, got {1}")]
    LengthMismatch(usize, usize),

    /// No usable pivot was found while eliminating the given column
    #[error("Singular matrix: no pivot above tolerance in column {0}")]
    Singular(usize),
}

use thiserror::Error;

/// Errors raised when a generator is assembled from explicit parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The step shares a factor with the size, so the walk would not visit every index.
    #[error("step {step} is not coprime with size {size}")]
    NotCoprime { size: u64, step: u64 },
    /// The step must stay below the size it walks over.
    #[error("step {step} must be lower than size {size}")]
    StepOutOfRange { size: u64, step: u64 },
    /// Some value of `[offset, offset + size)` would not fit in an `i64`.
    #[error("size {size} overflows i64 from offset {offset}")]
    RangeOverflow { size: u64, offset: i64 },
}

/// Convenience alias for fallible core operations.
pub type Result<T> = std::result::Result<T, SequenceError>;

//! Error types for index picking

/// Errors raised by the fallible picking operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    /// The candidate set has no entries, so no index can be drawn
    #[error("cannot pick from an empty candidate set")]
    EmptyCandidateSet,
}

/// Result type alias for picker operations
pub type PickerResult<T> = Result<T, PickerError>;

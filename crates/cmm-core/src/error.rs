//! Binding error types.

use thiserror::Error;

/// Result type for binding operations.
pub type CmmResult<T> = Result<T, CmmError>;

/// Errors raised by the binding itself.
///
/// Failures inside lcms are reported through the registered error handler
/// (see [`crate::set_log_error_handler`]) and surface here only as the
/// `*Failed` variants, without further classification.
#[derive(Debug, Error)]
pub enum CmmError {
    /// lcms refused to open or create a profile.
    #[error("failed to open profile: {0}")]
    ProfileFailed(String),

    /// lcms refused to build a transform.
    #[error("failed to create transform: {0}")]
    TransformFailed(String),

    /// lcms refused to read, write or link a tag.
    #[error("tag operation failed: {0}")]
    TagFailed(String),

    /// The handle was already released.
    #[error("{0} handle is closed")]
    Closed(&'static str),

    /// A caller-supplied argument is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pixel buffer cannot hold the requested number of pixels.
    #[error("{which} buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall {
        /// `"input"` or `"output"`.
        which: &'static str,
        /// Bytes needed for the requested pixel count.
        required: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// The profile does not carry the requested tag.
    #[error("tag {0} not found")]
    TagNotFound(String),

    /// Unknown standard profile or tag name.
    #[error("unknown {kind}: {name}")]
    UnknownName {
        /// What kind of name was looked up.
        kind: &'static str,
        /// The name as given.
        name: String,
    },
}

impl CmmError {
    /// Returns true if this error came from lcms rather than from argument checks.
    pub fn is_native(&self) -> bool {
        matches!(
            self,
            CmmError::ProfileFailed(_) | CmmError::TransformFailed(_) | CmmError::TagFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_classification() {
        assert!(CmmError::TransformFailed("x".into()).is_native());
        assert!(!CmmError::Closed("profile").is_native());
        assert!(
            !CmmError::BufferTooSmall { which: "input", required: 3, actual: 1 }.is_native()
        );
    }

    #[test]
    fn test_messages() {
        let e = CmmError::BufferTooSmall { which: "output", required: 12, actual: 6 };
        assert_eq!(e.to_string(), "output buffer too small: need 12 bytes, got 6");
        assert_eq!(CmmError::Closed("transform").to_string(), "transform handle is closed");
    }
}

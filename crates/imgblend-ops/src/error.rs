//! Error types for blend operations.
//!
//! Compositing never fails; these cover the surfaces around it.

use thiserror::Error;

/// Error type for blend operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Blend mode name not recognised.
    #[error("unknown blend mode: {0}")]
    UnknownMode(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for blend operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = OpsError::UnknownMode("glow".into());
        assert_eq!(err.to_string(), "unknown blend mode: glow");
        let err = OpsError::InvalidParameter("opacity must be in [0, 1], got 2".into());
        assert!(err.to_string().starts_with("invalid parameter: opacity"));
    }
}

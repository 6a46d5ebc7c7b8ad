//! Error types for session-view

/// Errors raised while loading a state snapshot at the store boundary.
///
/// Query operations on [`crate::SessionView`] never fail; only turning raw
/// input into a typed [`crate::AppState`] can.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Invalid state snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read state snapshot: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StateError::from(json_err);
        assert!(format!("{}", err).starts_with("Invalid state snapshot: "));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = StateError::from(io_err);
        assert_eq!(format!("{}", err), "Failed to read state snapshot: missing");
    }

    #[test]
    fn test_error_debug() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let debug = format!("{:?}", StateError::Io(io_err));
        assert!(debug.contains("Io"));
    }
}

//! Error types for the PhilU extensions plugin
//!
//! Uses `thiserror` for ergonomic error handling with automatic `Display`
//! and `Error` trait implementations. The taxonomy is small on purpose:
//! a bundled file either cannot be found or cannot be read. There is no
//! local recovery anywhere in this crate; any failure during registration
//! aborts the load and surfaces to the caller.

use thiserror::Error;

/// The primary error type for plugin operations.
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// A bundled resource file or directory could not be found
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Standard I/O errors (unreadable resource files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for plugin operations.
pub type Result<T> = std::result::Result<T, ExtensionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_not_found_display() {
        let err = ExtensionError::ResourceNotFound("templates/tasks/lms/init".to_string());
        assert_eq!(
            err.to_string(),
            "Resource not found: templates/tasks/lms/init"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExtensionError = io_err.into();
        assert!(matches!(err, ExtensionError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}

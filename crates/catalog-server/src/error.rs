//! Service layer error types and utilities.
//!
//! Errors carry a coarse [`ErrorKind`] that handlers translate into HTTP
//! responses, a human-readable message, and an optional source.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use catalog_postgres::PgError;
use catalog_postgres::types::CursorError;

/// Type alias for boxed errors that are Send + Sync.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for service layer operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kind enumeration for categorizing service layer errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Configuration-related errors.
    Config,
    /// A pagination cursor could not be decoded.
    InvalidCursor,
    /// Other malformed request data.
    BadInput,
    /// Empty listing or missing row.
    NotFound,
    /// An upload exceeded the configured size limit.
    PayloadTooLarge,
    /// File system operation errors.
    FileSystem,
    /// Store failures, expired store deadlines and unexpected conditions.
    Internal,
}

impl ErrorKind {
    /// Returns the error kind as a string for categorization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::InvalidCursor => "invalid_cursor",
            Self::BadInput => "bad_input",
            Self::NotFound => "not_found",
            Self::PayloadTooLarge => "payload_too_large",
            Self::FileSystem => "file_system",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service layer error with structured information.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new [`Error`].
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error to this error.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a new configuration error.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates a new bad input error.
    #[inline]
    pub fn bad_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadInput, message)
    }

    /// Creates a new not found error.
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a new payload too large error.
    #[inline]
    pub fn payload_too_large(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::PayloadTooLarge, message)
    }

    /// Creates a new file system error.
    #[inline]
    pub fn file_system(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::FileSystem, message)
    }

    /// Creates a new internal error.
    #[inline]
    pub fn internal(
        service: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let full_message = format!("{}: {}", service.into(), message.into());
        Self::new(ErrorKind::Internal, full_message)
    }
}

impl From<CursorError> for Error {
    fn from(err: CursorError) -> Self {
        Error::new(ErrorKind::InvalidCursor, format!("invalid cursor: {}", err)).with_source(err)
    }
}

impl From<PgError> for Error {
    fn from(err: PgError) -> Self {
        if let Some(violation) = err.constraint_violation() {
            let message = format!("invalid value for '{}'", violation.column_name());
            return Error::bad_input(message).with_source(err);
        }

        if err.is_not_found() {
            return Error::not_found("record not found").with_source(err);
        }

        Error::internal("postgres", err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use catalog_postgres::error::DieselError;

    use super::*;

    #[test]
    fn test_error_creation() {
        let error = Error::config("invalid configuration");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.message(), "invalid configuration");
    }

    #[test]
    fn test_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::file_system("cannot read upload").with_source(source);

        assert!(StdError::source(&error).is_some());
        assert_eq!(error.kind(), ErrorKind::FileSystem);
    }

    #[test]
    fn test_cursor_error_is_invalid_cursor() {
        let error = Error::from(CursorError::FieldCount(3));
        assert_eq!(error.kind(), ErrorKind::InvalidCursor);
        assert!(error.message().contains("3 fields"));
    }

    #[test]
    fn test_pg_error_classification() {
        let error = Error::from(PgError::Config("missing url".into()));
        assert_eq!(error.kind(), ErrorKind::Internal);
        assert!(error.to_string().contains("postgres"));

        let error = Error::from(PgError::Query(DieselError::NotFound));
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::InvalidCursor.as_str(), "invalid_cursor");
        assert_eq!(ErrorKind::Internal.as_str(), "internal");
    }
}

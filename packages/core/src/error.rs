//! Error types for the query engine and document loaders.

use std::sync::Arc;

use crate::format::Format;

/// Errors carried by a `NodeSet` or returned from a terminal operation.
///
/// `NotFound` and `MultiEntities` are the only kinds the engine produces
/// itself. Everything a backend reports (decode failures, I/O) is wrapped
/// in `Backend` and passed through untouched.
///
/// The type is cheap to clone: a cloned `Backend` shares the same `Arc`,
/// so an error propagated through a chain of operations stays the
/// identical error.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// An operation needed at least one result and got none.
    #[error("entity not found")]
    NotFound,

    /// An operation needed at most one result and got several.
    #[error("too many results")]
    MultiEntities,

    /// Opaque failure reported by a document loader or backend.
    #[error("{0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary backend failure.
    pub fn backend(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Backend(Arc::from(e.into()))
    }

    /// True for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }

    /// True for `MultiEntities`.
    pub fn is_multi_entities(&self) -> bool {
        matches!(self, Error::MultiEntities)
    }

    /// Whether two errors are the same error value.
    ///
    /// Sentinels compare by kind, backend errors by identity.
    pub fn same(&self, other: &Error) -> bool {
        match (self, other) {
            (Error::NotFound, Error::NotFound) => true,
            (Error::MultiEntities, Error::MultiEntities) => true,
            (Error::Backend(a), Error::Backend(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Errors raised while turning raw bytes into a document.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// Codec failed to decode bytes.
    #[error("decode error ({format}): {message}")]
    Decode { format: Format, message: String },

    /// Format not supported by the codec.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(Format),

    /// Bytes decoded, but the result cannot be a document root.
    #[error("not a document ({format}): found {found}")]
    NotADocument { format: Format, found: String },

    /// Reading the source failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Shorthand for a decode failure.
    pub fn decode(format: Format, message: impl Into<String>) -> Self {
        LoadError::Decode {
            format,
            message: message.into(),
        }
    }
}

impl From<LoadError> for Error {
    fn from(e: LoadError) -> Self {
        Error::backend(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn sentinel_display() {
        assert_eq!(format!("{}", Error::NotFound), "entity not found");
        assert_eq!(format!("{}", Error::MultiEntities), "too many results");
    }

    #[test]
    fn backend_display_is_transparent() {
        let e = Error::backend("unexpected end of input");
        assert_eq!(format!("{}", e), "unexpected end of input");
    }

    #[test]
    fn clone_keeps_identity() {
        let e = Error::backend("boom");
        let copy = e.clone();
        assert!(e.same(&copy));

        let other = Error::backend("boom");
        assert!(!e.same(&other));
    }

    #[test]
    fn sentinels_compare_by_kind() {
        assert!(Error::NotFound.same(&Error::NotFound));
        assert!(!Error::NotFound.same(&Error::MultiEntities));
        assert!(Error::NotFound.is_not_found());
        assert!(Error::MultiEntities.is_multi_entities());
    }

    #[test]
    fn decode_error_display() {
        let e = LoadError::decode(Format::JSON, "unexpected token");
        let display = format!("{}", e);
        assert!(display.contains("decode error"));
        assert!(display.contains("json"));
        assert!(display.contains("unexpected token"));
    }

    #[test]
    fn not_a_document_display() {
        let e = LoadError::NotADocument {
            format: Format::YAML,
            found: "array".to_string(),
        };
        assert!(format!("{}", e).contains("found array"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e: LoadError = io_err.into();
        assert!(matches!(e, LoadError::Io(_)));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn load_error_becomes_backend() {
        let e: Error = LoadError::UnsupportedFormat(Format::XML).into();
        assert!(matches!(e, Error::Backend(_)));
        assert!(format!("{}", e).contains("unsupported format"));
    }
}

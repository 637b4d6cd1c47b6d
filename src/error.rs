//! Error types for form construction and structural operations.
//!
//! Validation failures are never errors: they live on the field as an
//! [`ErrorSet`](crate::ErrorSet). The types here cover the two ways a caller
//! can misuse the engine: a malformed schema, and a structural request
//! (lookup, removal, patch) that does not fit the tree.

use std::fmt::{self, Display, Formatter};

use crate::context::ContextError;

/// A defect found while building a form from its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A key was the empty string.
    EmptyKey,
    /// A key contains a character reserved for paths.
    InvalidKey(String),
    /// The same key appears twice in one group.
    DuplicateKey(String),
    /// A field's initial value is an object or an array.
    NonScalarValue(String),
    /// A pattern validator could not be compiled.
    InvalidPattern {
        /// The pattern source as written.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::EmptyKey => f.write_str("empty key"),
            SchemaError::InvalidKey(key) => {
                write!(f, "key `{key}` may not contain `.`, `[` or `]`")
            }
            SchemaError::DuplicateKey(key) => write!(f, "duplicate key `{key}`"),
            SchemaError::NonScalarValue(value) => {
                write!(f, "initial value {value} is not a scalar")
            }
            SchemaError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern `{pattern}`: {reason}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors returned by [`Form`](crate::Form) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The schema could not be turned into a form.
    Schema(ContextError<SchemaError>),
    /// The path string is empty or has an empty segment.
    InvalidPath(String),
    /// A path segment does not exist.
    PathNotFound {
        /// The full path requested.
        path: String,
        /// The first segment that failed to resolve.
        segment: String,
    },
    /// The path resolves to a group or an array, not a field.
    NotAField(String),
    /// The path resolves to a field or an array, not a group.
    NotAGroup(String),
    /// The path resolves to a field or a group, not an array.
    NotAnArray(String),
    /// An array index is past the end.
    IndexOutOfBounds {
        /// Path of the array.
        path: String,
        /// Requested index.
        index: usize,
        /// Current length.
        len: usize,
    },
    /// A patch did not have the shape of the node it targets.
    InvalidPatch {
        /// Path of the node being patched.
        path: String,
        /// What was expected there.
        expected: &'static str,
    },
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Schema(err) => write!(f, "malformed schema: {err}"),
            FormError::InvalidPath(path) => write!(f, "invalid path `{path}`"),
            FormError::PathNotFound { path, segment } => {
                write!(f, "no control at `{segment}` while resolving `{path}`")
            }
            FormError::NotAField(path) => write!(f, "`{path}` is not a field"),
            FormError::NotAGroup(path) => write!(f, "`{path}` is not a group"),
            FormError::NotAnArray(path) => write!(f, "`{path}` is not a group array"),
            FormError::IndexOutOfBounds { path, index, len } => {
                write!(f, "index {index} out of bounds for `{path}` (len {len})")
            }
            FormError::InvalidPatch { path, expected } => {
                write!(f, "patch for `{path}` must be {expected}")
            }
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::Schema(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContextError<SchemaError>> for FormError {
    fn from(err: ContextError<SchemaError>) -> Self {
        FormError::Schema(err)
    }
}

/// Result alias for form operations.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_display_names_segment() {
        let err = FormError::from(
            ContextError::new(SchemaError::DuplicateKey("zip".into()))
                .context("[0]")
                .context("addresses"),
        );
        assert_eq!(
            err.to_string(),
            "malformed schema: duplicate key `zip` (at addresses[0])"
        );
    }

    #[test]
    fn out_of_bounds_display() {
        let err = FormError::IndexOutOfBounds {
            path: "addresses".into(),
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "index 4 out of bounds for `addresses` (len 2)"
        );
    }

    #[test]
    fn schema_error_has_source() {
        use std::error::Error;
        let err = FormError::Schema(ContextError::new(SchemaError::EmptyKey));
        assert!(err.source().is_some());
        assert!(FormError::NotAField("x".into()).source().is_none());
    }
}

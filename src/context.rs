//! Errors carrying a trail of the locations they passed through
//!
//! Schema construction is recursive: a bad key deep inside an address group
//! surfaces through the array, then through the root. `ContextError` records
//! each of those locations on the way out so the final error names the exact
//! segment that was malformed.
//!
//! # Examples
//!
//! ```
//! use stillform::ContextError;
//!
//! let err = ContextError::new("duplicate key `zip`")
//!     .context("[0]")
//!     .context("addresses");
//!
//! assert_eq!(err.inner(), &"duplicate key `zip`");
//! assert_eq!(err.context_trail(), &["[0]", "addresses"]);
//! assert_eq!(err.location(), "addresses[0]");
//! ```

use std::error::Error as StdError;
use std::fmt;

/// An error wrapper that accumulates context as it propagates
///
/// The trail is ordered from innermost to outermost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextError<E> {
    error: E,
    context: Vec<String>,
}

impl<E> ContextError<E> {
    /// Wrap an error with an empty trail.
    pub fn new(error: E) -> Self {
        ContextError {
            error,
            context: Vec::new(),
        }
    }

    /// Append an outer context layer.
    pub fn context(mut self, msg: impl Into<String>) -> Self {
        self.context.push(msg.into());
        self
    }

    /// Get the underlying error
    pub fn inner(&self) -> &E {
        &self.error
    }

    /// Consume and return the underlying error, discarding the trail.
    pub fn into_inner(self) -> E {
        self.error
    }

    /// Context layers, innermost first.
    pub fn context_trail(&self) -> &[String] {
        &self.context
    }

    /// The trail read outermost first, as a dotted location.
    ///
    /// Layers starting with `[` attach without a dot, so array indices read
    /// naturally. Empty when no context was added.
    pub fn location(&self) -> String {
        let mut location = String::new();
        for layer in self.context.iter().rev() {
            if !location.is_empty() && !layer.starts_with('[') {
                location.push('.');
            }
            location.push_str(layer);
        }
        location
    }
}

/// Attach context to the error side of a `Result`.
///
/// ```
/// use stillform::context::{ContextError, ResultContext};
///
/// fn inner() -> Result<(), ContextError<&'static str>> {
///     Err(ContextError::new("empty key"))
/// }
///
/// let err = inner().context("emailGroup").unwrap_err();
/// assert_eq!(err.location(), "emailGroup");
/// ```
pub trait ResultContext<T, E> {
    /// Add a context layer if this is an `Err`.
    fn context(self, msg: impl Into<String>) -> Result<T, ContextError<E>>;
}

impl<T, E> ResultContext<T, E> for Result<T, ContextError<E>> {
    fn context(self, msg: impl Into<String>) -> Result<T, ContextError<E>> {
        self.map_err(|err| err.context(msg))
    }
}

impl<E: fmt::Display> fmt::Display for ContextError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{} (at {})", self.error, self.location())
        }
    }
}

impl<E: StdError + 'static> StdError for ContextError<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}

//! Validation type for accumulating errors
//!
//! `Validation` is similar to `Result`, but combining two failures keeps both
//! errors instead of stopping at the first. Forms use it to report every
//! failing field at once when they are submitted.
//!
//! # Examples
//!
//! ```
//! use stillform::{ErrorSet, Validation};
//!
//! let name = Validation::<&str, Vec<ErrorSet>>::success("Sajad");
//! let email = Validation::<&str, _>::failure(vec![ErrorSet::single("pattern")]);
//! let rating = Validation::<i32, _>::failure(vec![ErrorSet::single("range")]);
//!
//! let result = name.and(email).and(rating);
//! assert_eq!(
//!     result,
//!     Validation::Failure(vec![ErrorSet::single("pattern"), ErrorSet::single("range")])
//! );
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value (must implement `Semigroup` for accumulation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Succeed with `value` unless `errors` is present.
    ///
    /// This is the bridge from validator output (`Option<ErrorSet>`, where
    /// `None` means valid) to a `Validation`.
    ///
    /// ```
    /// use stillform::{ErrorSet, Validation};
    ///
    /// let ok = Validation::from_errors("a@b.c", None::<ErrorSet>);
    /// assert!(ok.is_success());
    ///
    /// let failed = Validation::from_errors("", Some(ErrorSet::single("required")));
    /// assert_eq!(failed, Validation::Failure(ErrorSet::single("required")));
    /// ```
    #[inline]
    pub fn from_errors(value: T, errors: Option<E>) -> Self {
        match errors {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(value),
        }
    }

    /// Create a validation from a Result
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation to a Result
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Transform the success value if present
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine two validations, accumulating errors using the Semigroup instance
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) => Validation::Failure(e),
            (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    /// Combine all validations in an iterator
    ///
    /// Succeeds with every success value when nothing failed; otherwise the
    /// failures are folded together in order.
    ///
    /// ```
    /// use stillform::{ErrorSet, Validation};
    ///
    /// let checks = vec![
    ///     Validation::<i32, ErrorSet>::failure(ErrorSet::single("required")),
    ///     Validation::success(3),
    ///     Validation::failure(ErrorSet::single("pattern")),
    /// ];
    /// let merged = Validation::all_vec(checks);
    /// assert_eq!(
    ///     merged,
    ///     Validation::Failure(["required", "pattern"].into_iter().collect())
    /// );
    /// ```
    pub fn all_vec<I>(validations: I) -> Validation<Vec<T>, E>
    where
        I: IntoIterator<Item = Validation<T, E>>,
    {
        let mut successes = Vec::new();
        let mut failure: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => successes.push(value),
                Validation::Failure(error) => {
                    failure = Some(match failure {
                        Some(acc) => acc.combine(error),
                        None => error,
                    });
                }
            }
        }

        Validation::from_errors(successes, failure)
    }
}

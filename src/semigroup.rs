//! Semigroup trait for associative operations
//!
//! A Semigroup is a type with an associative binary operation. Form validation
//! uses it to merge the outcomes of several validators on one field, and to
//! accumulate failing fields when a whole form is submitted.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use stillform::{ErrorSet, Semigroup};
//!
//! let merged = ErrorSet::single("required").combine(ErrorSet::single("pattern"));
//! assert_eq!(merged.kinds().collect::<Vec<_>>(), vec!["required", "pattern"]);
//!
//! let v1 = vec![1, 2];
//! assert_eq!(v1.combine(vec![3]), vec![1, 2, 3]);
//! ```

/// A type that supports an associative binary operation
///
/// The `combine` method takes `self` by value. Clone first if the original
/// values are still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<T: Semigroup> Semigroup for Option<T> {
    /// `None` is absorbed; two `Some`s combine their contents.
    #[inline]
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.combine(b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_semigroup() {
        assert_eq!(vec![1, 2, 3].combine(vec![4, 5, 6]), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_vec_semigroup_empty() {
        let v1: Vec<i32> = vec![];
        assert_eq!(v1.combine(vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_string_semigroup() {
        let s1 = "Please enter ".to_string();
        assert_eq!(s1.combine("a value".to_string()), "Please enter a value");
    }

    #[test]
    fn test_option_semigroup_absorbs_none() {
        assert_eq!(Some(vec![1]).combine(None), Some(vec![1]));
        assert_eq!(None.combine(Some(vec![2])), Some(vec![2]));
        assert_eq!(Some(vec![1]).combine(Some(vec![2])), Some(vec![1, 2]));
        assert_eq!(None::<Vec<i32>>.combine(None), None);
    }

    #[test]
    fn test_associativity() {
        let a = vec![1];
        let b = vec![2];
        let c = vec![3];
        assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.combine(b.combine(c))
        );
    }
}

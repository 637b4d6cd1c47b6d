//! The set of error kinds a field currently fails
//!
//! An `ErrorSet` is what a validator reports when it rejects a value: a set of
//! error-kind names such as `"required"` or `"pattern"`. Kinds keep the order
//! in which they were first inserted, so messages projected from the set come
//! out in a stable order.
//!
//! On the wire an `ErrorSet` is a map from kind to `true`:
//!
//! ```
//! use stillform::ErrorSet;
//!
//! let errors: ErrorSet = ["required", "pattern"].into_iter().collect();
//! let json = serde_json::to_string(&errors).unwrap();
//! assert_eq!(json, r#"{"required":true,"pattern":true}"#);
//! ```

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::Semigroup;

/// Ordered, duplicate-free set of error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorSet {
    kinds: Vec<String>,
}

impl ErrorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding one kind.
    ///
    /// ```
    /// use stillform::ErrorSet;
    ///
    /// let errors = ErrorSet::single("range");
    /// assert!(errors.contains("range"));
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn single(kind: impl Into<String>) -> Self {
        Self {
            kinds: vec![kind.into()],
        }
    }

    /// Add a kind. Returns `false` if it was already present.
    pub fn insert(&mut self, kind: impl Into<String>) -> bool {
        let kind = kind.into();
        if self.contains(&kind) {
            return false;
        }
        self.kinds.push(kind);
        true
    }

    /// Check whether a kind is present.
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }

    /// Iterate over kinds in insertion order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(String::as_str)
    }

    /// Number of kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// `true` when no kind is present.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// `None` for an empty set, `Some(self)` otherwise.
    ///
    /// Validators return `Option<ErrorSet>` and must never report an empty
    /// failure; this is how that invariant is enforced.
    pub fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl Semigroup for ErrorSet {
    /// Union, keeping the left-hand order and appending new kinds from the right.
    fn combine(mut self, other: Self) -> Self {
        for kind in other.kinds {
            self.insert(kind);
        }
        self
    }
}

impl<S: Into<String>> FromIterator<S> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ErrorSet::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.kinds.join(", "))
    }
}

impl Serialize for ErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.kinds.len()))?;
        for kind in &self.kinds {
            map.serialize_entry(kind, &true)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_ignores_duplicates() {
        let mut set = ErrorSet::new();
        assert!(set.insert("required"));
        assert!(!set.insert("required"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn combine_is_ordered_union() {
        let left: ErrorSet = ["required", "minlength"].into_iter().collect();
        let right: ErrorSet = ["pattern", "required"].into_iter().collect();
        let merged = left.combine(right);
        assert_eq!(
            merged.kinds().collect::<Vec<_>>(),
            vec!["required", "minlength", "pattern"]
        );
    }

    #[test]
    fn empty_set_is_not_a_failure() {
        assert_eq!(ErrorSet::new().non_empty(), None);
        assert_eq!(
            ErrorSet::single("range").non_empty(),
            Some(ErrorSet::single("range"))
        );
    }

    #[test]
    fn serializes_as_kind_to_true_map() {
        let set = ErrorSet::single("range");
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!({ "range": true })
        );
    }

    #[test]
    fn display_lists_kinds() {
        let set: ErrorSet = ["required", "pattern"].into_iter().collect();
        assert_eq!(set.to_string(), "{required, pattern}");
    }
}

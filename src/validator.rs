//! Field validators
//!
//! A [`Validator`] is a pure function from a field value to
//! `Option<ErrorSet>`: `None` when the value is acceptable, a non-empty set of
//! error kinds otherwise. Every validator attached to a field runs on each
//! evaluation and the failing kinds are merged.
//!
//! # Built-in validators
//!
//! | constructor       | error kind  | fails when                                   |
//! |-------------------|-------------|----------------------------------------------|
//! | [`required`]      | `required`  | value is null, `""` or `[]`                  |
//! | [`min_length`]    | `minlength` | non-blank value shorter than `n`             |
//! | [`max_length`]    | `maxlength` | value longer than `n`                        |
//! | [`pattern`]       | `pattern`   | non-blank value does not fully match         |
//! | [`range`]         | `range`     | value is not a number within `min..=max`     |
//!
//! ```
//! use serde_json::json;
//! use stillform::validator::{self, Validator};
//! use stillform::ErrorSet;
//!
//! let email = [
//!     validator::required(),
//!     validator::pattern("[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+").unwrap(),
//! ];
//!
//! assert_eq!(Validator::evaluate_all(&email, &json!("")), Some(ErrorSet::single("required")));
//! assert_eq!(Validator::evaluate_all(&email, &json!("nope")), Some(ErrorSet::single("pattern")));
//! assert_eq!(Validator::evaluate_all(&email, &json!("a@b.io")), None);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::predicate::{
    blank, matches, max_len, min_len, numeric_within, present, Predicate, PredicateExt,
};
use crate::value::Value;
use crate::{ErrorSet, Semigroup};

type CheckFn = dyn Fn(&Value) -> Option<ErrorSet> + Send + Sync;

/// A named, shareable validation rule.
#[derive(Clone)]
pub struct Validator {
    name: Cow<'static, str>,
    check: Arc<CheckFn>,
}

impl Validator {
    /// Wrap a function returning the failing kinds, if any.
    ///
    /// An empty `Some` result is treated as `None`.
    ///
    /// ```
    /// use serde_json::{json, Value};
    /// use stillform::validator::Validator;
    /// use stillform::ErrorSet;
    ///
    /// let not_admin = Validator::new("not_admin", |v: &Value| {
    ///     (v == &json!("admin")).then(|| ErrorSet::single("reserved"))
    /// });
    /// assert!(not_admin.validate(&json!("admin")).is_some());
    /// assert!(not_admin.validate(&json!("sajad")).is_none());
    /// ```
    pub fn new<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&Value) -> Option<ErrorSet> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Fail with `kind` whenever `predicate` rejects the value.
    pub fn from_predicate<P>(kind: &'static str, predicate: P) -> Self
    where
        P: Predicate<Value> + 'static,
    {
        Self::new(kind, move |value: &Value| {
            if predicate.check(value) {
                None
            } else {
                Some(ErrorSet::single(kind))
            }
        })
    }

    /// Name used in debug output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run this validator against a value.
    pub fn validate(&self, value: &Value) -> Option<ErrorSet> {
        (self.check)(value).and_then(ErrorSet::non_empty)
    }

    /// Run every validator and merge their failures, in order.
    pub fn evaluate_all<'a, I>(validators: I, value: &Value) -> Option<ErrorSet>
    where
        I: IntoIterator<Item = &'a Validator>,
    {
        validators
            .into_iter()
            .map(|v| v.validate(value))
            .fold(None, Semigroup::combine)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

/// Fails with `required` on blank values.
pub fn required() -> Validator {
    Validator::from_predicate("required", present())
}

/// Fails with `minlength` when a non-blank value is shorter than `n`.
pub fn min_length(n: usize) -> Validator {
    Validator::from_predicate("minlength", blank().or(min_len(n)))
}

/// Fails with `maxlength` when a value is longer than `n`.
pub fn max_length(n: usize) -> Validator {
    Validator::from_predicate("maxlength", max_len(n))
}

/// Fails with `pattern` when a non-blank value does not fully match `source`.
///
/// The pattern is anchored at both ends, so `"[0-9]+"` rejects `"12a"`.
pub fn pattern(source: &str) -> Result<Validator, regex::Error> {
    let anchored = Regex::new(&format!("^(?:{source})$"))?;
    Ok(Validator::from_predicate(
        "pattern",
        blank().or(matches(anchored)),
    ))
}

/// Fails with `range` unless the value coerces to a number in `min..=max`.
///
/// Coercion follows [`to_number`](crate::value::to_number): blank values read
/// as 0 and text that is not a number reads as NaN, which always fails.
pub fn range(min: f64, max: f64) -> Validator {
    Validator::from_predicate("range", numeric_within(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_rejects_blank() {
        let v = required();
        assert_eq!(v.validate(&json!("")), Some(ErrorSet::single("required")));
        assert_eq!(v.validate(&json!(null)), Some(ErrorSet::single("required")));
        assert_eq!(v.validate(&json!("x")), None);
        assert_eq!(v.validate(&json!(false)), None);
    }

    #[test]
    fn min_length_ignores_blank() {
        let v = min_length(3);
        assert_eq!(v.validate(&json!("")), None);
        assert_eq!(v.validate(&json!("ab")), Some(ErrorSet::single("minlength")));
        assert_eq!(v.validate(&json!("abc")), None);
    }

    #[test]
    fn max_length_bounds() {
        let v = max_length(5);
        assert_eq!(v.validate(&json!("hello")), None);
        assert_eq!(
            v.validate(&json!("hello!")),
            Some(ErrorSet::single("maxlength"))
        );
    }

    #[test]
    fn pattern_requires_full_match() {
        let v = pattern("[0-9]+").unwrap();
        assert_eq!(v.validate(&json!("123")), None);
        assert_eq!(v.validate(&json!("12a")), Some(ErrorSet::single("pattern")));
        assert_eq!(v.validate(&json!("")), None);
    }

    #[test]
    fn pattern_rejects_bad_regex() {
        assert!(pattern("[unclosed").is_err());
    }

    #[test]
    fn range_rejects_out_of_bounds_and_text() {
        let v = range(1.0, 5.0);
        for bad in [json!(0), json!(6), json!("abc"), json!(""), json!(null)] {
            assert_eq!(v.validate(&bad), Some(ErrorSet::single("range")), "{bad}");
        }
        for good in [json!(1), json!(3), json!(5), json!("2"), json!("0x3")] {
            assert_eq!(v.validate(&good), None, "{good}");
        }
    }

    #[test]
    fn empty_failure_counts_as_valid() {
        let v = Validator::new("sloppy", |_: &Value| Some(ErrorSet::new()));
        assert_eq!(v.validate(&json!("x")), None);
    }

    #[test]
    fn evaluate_all_merges_in_order() {
        let validators = [min_length(3), pattern("[a-z]+").unwrap(), required()];
        let errors = Validator::evaluate_all(&validators, &json!("A1")).unwrap();
        assert_eq!(
            errors.kinds().collect::<Vec<_>>(),
            vec!["minlength", "pattern"]
        );
        assert_eq!(Validator::evaluate_all(&[] as &[Validator], &json!("")), None);
    }

    #[test]
    fn debug_shows_name() {
        assert_eq!(format!("{:?}", required()), r#"Validator("required")"#);
    }
}

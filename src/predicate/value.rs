//! Predicates on JSON field values

use regex::Regex;

use super::combinators::Predicate;
use crate::value::{is_blank, length_of, to_number, to_text, Value};

/// Holds for null, `""` and `[]`.
#[derive(Clone, Copy, Default, Debug)]
pub struct Blank;

impl Predicate<Value> for Blank {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        is_blank(value)
    }
}

/// Create a predicate that holds for blank values.
pub fn blank() -> Blank {
    Blank
}

/// Create a predicate that holds for anything that is not blank.
///
/// ```rust
/// use serde_json::json;
/// use stillform::predicate::*;
///
/// assert!(present().check(&json!("Sajad")));
/// assert!(present().check(&json!(0)));
/// assert!(!present().check(&json!("")));
/// ```
pub fn present() -> super::Not<Blank> {
    super::Not(Blank)
}

/// Length of at least `min`. Values without a length always pass.
#[derive(Clone, Copy, Debug)]
pub struct MinLen(pub usize);

impl Predicate<Value> for MinLen {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        length_of(value).map_or(true, |len| len >= self.0)
    }
}

/// Create a minimum-length predicate.
pub fn min_len(min: usize) -> MinLen {
    MinLen(min)
}

/// Length of at most `max`. Values without a length always pass.
#[derive(Clone, Copy, Debug)]
pub struct MaxLen(pub usize);

impl Predicate<Value> for MaxLen {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        length_of(value).map_or(true, |len| len <= self.0)
    }
}

/// Create a maximum-length predicate.
pub fn max_len(max: usize) -> MaxLen {
    MaxLen(max)
}

/// The value's text matches a regex.
#[derive(Clone, Debug)]
pub struct Matches(pub Regex);

impl Predicate<Value> for Matches {
    #[inline]
    fn check(&self, value: &Value) -> bool {
        self.0.is_match(&to_text(value))
    }
}

/// Create a predicate from a compiled regex.
///
/// The regex is used as given; anchor it to require a full match.
pub fn matches(regex: Regex) -> Matches {
    Matches(regex)
}

/// The value coerces to a number inside `min..=max`.
#[derive(Clone, Copy, Debug)]
pub struct NumericWithin {
    min: f64,
    max: f64,
}

impl Predicate<Value> for NumericWithin {
    fn check(&self, value: &Value) -> bool {
        let n = to_number(value);
        !n.is_nan() && n >= self.min && n <= self.max
    }
}

/// Create an inclusive numeric range predicate.
///
/// ```rust
/// use serde_json::json;
/// use stillform::predicate::*;
///
/// let rating = numeric_within(1.0, 5.0);
/// assert!(rating.check(&json!("4")));
/// assert!(!rating.check(&json!(6)));
/// assert!(!rating.check(&json!("abc")));
/// ```
pub fn numeric_within(min: f64, max: f64) -> NumericWithin {
    NumericWithin { min, max }
}

//! Predicate combinators over field values
//!
//! Built-in validators are predicates with an error kind attached: the
//! validator fails with its kind whenever the predicate rejects the value.
//! The same pieces are available for custom rules.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use stillform::predicate::*;
//!
//! // Pass when blank, otherwise require at least three characters
//! let optional_min = blank().or(min_len(3));
//! assert!(optional_min.check(&json!("")));
//! assert!(optional_min.check(&json!("abc")));
//! assert!(!optional_min.check(&json!("ab")));
//! ```

mod combinators;
mod value;

pub use combinators::{And, Not, Or, Predicate, PredicateExt};
pub use value::{
    blank, matches, max_len, min_len, numeric_within, present, Blank, Matches, MaxLen, MinLen,
    NumericWithin,
};

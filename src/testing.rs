//! Testing utilities for forms
//!
//! Assertion macros for [`Validation`](crate::Validation) results and for the
//! state of individual fields, plus property-based testing strategies behind
//! the `proptest` feature.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use stillform::schema::{FieldSchema, Schema};
//! use stillform::{assert_field_errors, assert_valid, validator, Form};
//!
//! let mut form = Form::new(
//!     Schema::new().field("name", FieldSchema::new("").validator(validator::required())),
//! )
//! .unwrap();
//!
//! assert_field_errors!(form, "name", ["required"]);
//! form.set_value("name", json!("Sajad")).unwrap();
//! assert_valid!(form, "name");
//! ```

/// Assert that a validation succeeds.
///
/// ```rust
/// use stillform::{assert_success, Validation};
///
/// let val = Validation::<_, Vec<String>>::success(42);
/// assert_success!(val);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
        }
    };
}

/// Assert that a validation fails.
///
/// ```rust
/// use stillform::{assert_failure, Validation};
///
/// let val = Validation::<i32, _>::failure(vec!["required".to_string()]);
/// assert_failure!(val);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
        }
    };
}

/// Assert that a field (or, with no path, the whole form) is valid.
#[macro_export]
macro_rules! assert_valid {
    ($form:expr) => {{
        let form = &$form;
        if !form.is_valid() {
            panic!("Expected a valid form, failing fields: {:?}", form.errors());
        }
    }};
    ($form:expr, $path:expr) => {{
        let field = match $form.field($path) {
            Ok(field) => field,
            Err(err) => panic!("No field at {:?}: {}", $path, err),
        };
        if !field.is_valid() {
            panic!(
                "Expected {:?} to be valid, got {:?} with {:?}",
                $path,
                field.status(),
                field.errors()
            );
        }
    }};
}

/// Assert the exact error kinds of a field, in order.
///
/// An empty list asserts the field has no errors.
#[macro_export]
macro_rules! assert_field_errors {
    ($form:expr, $path:expr, [$($kind:expr),* $(,)?]) => {{
        let field = match $form.field($path) {
            Ok(field) => field,
            Err(err) => panic!("No field at {:?}: {}", $path, err),
        };
        let expected: ::std::vec::Vec<&str> = ::std::vec![$($kind),*];
        let actual: ::std::vec::Vec<&str> = field
            .errors()
            .map(|errors| errors.kinds().collect())
            .unwrap_or_default();
        assert_eq!(actual, expected, "error kinds of {:?}", $path);
    }};
}

/// Strategies for property tests over field values.
#[cfg(feature = "proptest")]
pub mod strategies {
    use proptest::prelude::*;

    use crate::value::Value;
    use crate::ErrorSet;

    /// Every built-in error kind.
    pub const KINDS: [&str; 5] = ["required", "minlength", "maxlength", "pattern", "range"];

    /// Any scalar a field may hold.
    pub fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            (-1.0e6f64..1.0e6).prop_map(Value::from),
            ".{0,24}".prop_map(Value::from),
        ]
    }

    /// Strings that look like user input to a rating box.
    pub fn rating_input() -> impl Strategy<Value = Value> {
        prop_oneof![
            (-10i64..=10).prop_map(Value::from),
            (-10i64..=10).prop_map(|n| Value::from(n.to_string())),
            "[a-z ]{0,6}".prop_map(Value::from),
        ]
    }

    /// Plausible email addresses, some valid and some not.
    pub fn email_input() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z0-9._%+-]{1,10}@[a-z0-9.-]{1,10}",
            "[a-z0-9]{0,12}",
        ]
    }

    /// Sets of built-in kinds, possibly empty.
    pub fn error_set() -> impl Strategy<Value = ErrorSet> {
        proptest::sample::subsequence(KINDS.to_vec(), 0..=KINDS.len())
            .prop_map(|kinds| kinds.into_iter().collect())
    }
}

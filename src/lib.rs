//! # Stillform
//!
//! Declarative form validation with reactive fields.
//!
//! A form is described once as a [`Schema`]: fields with initial values and
//! validators, nested groups, and resizable arrays of groups. [`Form`] builds
//! the live tree and keeps every field's status current as values change.
//!
//! ## Philosophy
//!
//! - **Validation failures are data.** A failing field carries an
//!   [`ErrorSet`]; only structural misuse returns a [`FormError`].
//! - **Time is injected.** Debounced fields arm a timer on a [`Clock`]
//!   and the host decides when to run due timers. Tests use [`ManualClock`].
//! - **Listeners may rewire.** A listener receives `&mut Form` and can swap
//!   another field's validators, then revalidate it.
//!
//! ## Quick Example
//!
//! ```rust
//! use serde_json::json;
//! use stillform::prelude::*;
//! use stillform::validator;
//!
//! let schema = Schema::new()
//!     .field("name", FieldSchema::new("").validator(validator::required()))
//!     .field("rating", FieldSchema::new("").validator(validator::range(1.0, 5.0)));
//! let mut form = Form::new(schema)?;
//!
//! form.set_value("rating", json!(7))?;
//! match form.submit() {
//!     Validation::Success(value) => println!("saved {value}"),
//!     Validation::Failure(errors) => {
//!         let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
//!         assert_eq!(paths, vec!["name", "rating"]);
//!     }
//! }
//! # Ok::<(), FormError>(())
//! ```
//!
//! See [`signup`] for a complete form with debounced email validation,
//! cross-field rewiring and a list of addresses.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod context;
pub mod control;
pub mod error;
pub mod error_set;
pub mod form;
pub mod messages;
pub mod options;
pub mod predicate;
pub mod schema;
pub mod semigroup;
pub mod signup;
pub mod testing;
pub mod timer;
pub mod validation;
pub mod validator;
pub mod value;

// Re-exports
pub use context::ContextError;
pub use control::{ControlRef, FieldControl, FieldStatus, Group, GroupArray, NodeId};
pub use error::{FormError, FormResult, SchemaError};
pub use error_set::ErrorSet;
pub use form::{Change, FieldError, FieldEvent, Form, Subscription};
pub use messages::MessageTable;
pub use options::FormOptions;
pub use schema::{FieldSchema, GroupBuilder, Schema};
pub use semigroup::Semigroup;
pub use timer::{Clock, ManualClock, SystemClock};
pub use validation::Validation;
pub use validator::Validator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::ContextError;
    pub use crate::control::FieldStatus;
    pub use crate::error::{FormError, FormResult};
    pub use crate::error_set::ErrorSet;
    pub use crate::form::{Change, FieldEvent, Form};
    pub use crate::messages::MessageTable;
    pub use crate::options::FormOptions;
    pub use crate::schema::{FieldSchema, GroupBuilder, Schema};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
    pub use crate::validator::Validator;
}

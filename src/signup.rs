//! The customer signup form.
//!
//! A ready-made form showing the engine's moving parts together:
//!
//! - `notification` rewires `phone`: choosing [`TEXT_NOTIFICATION`] makes the
//!   phone number required, anything else clears its validators.
//! - `emailGroup.email` is validated after [`EMAIL_DEBOUNCE`] of quiet, and
//!   each completed evaluation refreshes the text of [`CustomerSignup::email_errors`].
//! - `addresses` is a group array seeded with one home address.
//!
//! ```rust
//! use std::time::Duration;
//! use serde_json::json;
//! use stillform::signup::{CustomerSignup, EMAIL_DEBOUNCE};
//! use stillform::timer::ManualClock;
//! use stillform::FormOptions;
//!
//! let clock = ManualClock::new();
//! let mut signup = CustomerSignup::with_options(FormOptions::new().with_clock(clock.clone()))?;
//!
//! signup.form_mut().set_value("emailGroup.email", json!("not-an-email"))?;
//! clock.advance(EMAIL_DEBOUNCE);
//! signup.form_mut().run_due_timers();
//! assert_eq!(signup.email_errors(), "Please enter a valid email address.");
//! # Ok::<(), stillform::FormError>(())
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::control::FieldStatus;
use crate::error::FormResult;
use crate::form::{FieldError, Form};
use crate::messages::MessageTable;
use crate::options::FormOptions;
use crate::schema::{FieldSchema, GroupBuilder, Schema};
use crate::validator::{self, Validator};
use crate::value::Value;
use crate::Validation;

/// Quiet period before the email address is validated.
pub const EMAIL_DEBOUNCE: Duration = Duration::from_millis(1000);

/// The notification choice that makes a phone number mandatory.
pub const TEXT_NOTIFICATION: &str = "text";

/// Accepted shape of an email address.
pub const EMAIL_PATTERN: &str = "[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+";

/// Path of the debounced email field.
pub const EMAIL_PATH: &str = "emailGroup.email";

/// Builder for the groups of `addresses`.
pub const ADDRESS: GroupBuilder = GroupBuilder::new("address", address_schema);

/// One empty home address.
pub fn address_schema() -> Schema {
    Schema::new()
        .value("addressType", "home")
        .value("street1", "")
        .value("street2", "")
        .value("city", "")
        .value("state", "")
        .value("zip", "")
}

/// Ratings must be numbers from 1 to 5.
pub fn rating() -> Validator {
    validator::range(1.0, 5.0)
}

/// Messages shown under the email field.
pub fn email_messages() -> MessageTable {
    MessageTable::new()
        .with("required", "Please enter your email address.")
        .with("pattern", "Please enter a valid email address.")
}

/// The whole signup form.
pub fn customer_schema() -> Schema {
    Schema::new()
        .field(
            "firstName",
            FieldSchema::new("").validators([validator::required(), validator::min_length(3)]),
        )
        .field(
            "lastName",
            FieldSchema::new("").validators([validator::required(), validator::max_length(50)]),
        )
        .group(
            "emailGroup",
            Schema::new()
                .field(
                    "email",
                    FieldSchema::new("")
                        .validator(validator::required())
                        .pattern(EMAIL_PATTERN)
                        .debounce(EMAIL_DEBOUNCE),
                )
                .field(
                    "confirmEmail",
                    FieldSchema::new("").validator(validator::required()),
                ),
        )
        .value("phone", "")
        .value("notification", "email")
        .field("rating", FieldSchema::new("").validator(rating()))
        .value("sendCatalog", true)
        .array("addresses", ADDRESS, 1)
}

/// A saved customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email and its confirmation.
    pub email_group: EmailGroup,
    /// Phone number, required for text notifications.
    pub phone: String,
    /// How the customer wants to be notified.
    pub notification: String,
    /// Rating as entered; a number from 1 to 5 once valid.
    pub rating: Value,
    /// Whether to mail a catalog.
    pub send_catalog: bool,
    /// Postal addresses.
    pub addresses: Vec<Address>,
}

/// Email and its confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailGroup {
    /// Address.
    pub email: String,
    /// Same address, typed again.
    pub confirm_email: String,
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// `home`, `work` or `other`.
    pub address_type: String,
    /// First street line.
    pub street1: String,
    /// Second street line.
    pub street2: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip: String,
}

/// The signup form with its listeners attached.
#[derive(Debug)]
pub struct CustomerSignup {
    form: Form,
    email_errors: Rc<RefCell<String>>,
}

impl CustomerSignup {
    /// Build the form on the system clock.
    pub fn new() -> FormResult<Self> {
        Self::with_options(FormOptions::default())
    }

    /// Build the form with explicit options.
    pub fn with_options(options: FormOptions) -> FormResult<Self> {
        let mut form = Form::with_options(customer_schema(), options)?;

        form.on_value_change("notification", |notify_via, form| {
            update_phone_validation(form, notify_via)
        })?;

        let email_errors = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&email_errors);
        let messages = email_messages();
        form.on_status_change(EMAIL_PATH, move |status, errors, _| {
            if status != FieldStatus::Pending {
                *sink.borrow_mut() = messages.project(errors);
            }
        })?;

        Ok(CustomerSignup { form, email_errors })
    }

    /// The underlying form.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// The underlying form, for edits.
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Message text for the email field as of its last evaluation.
    ///
    /// Empty until the email has been evaluated after a change.
    pub fn email_errors(&self) -> String {
        self.email_errors.borrow().clone()
    }

    /// Append an empty address. Returns its index.
    pub fn add_address(&mut self) -> FormResult<usize> {
        self.form.push("addresses")
    }

    /// Remove the address at `index`.
    pub fn remove_address(&mut self, index: usize) -> FormResult<()> {
        self.form.remove_at("addresses", index)
    }

    /// Fill in sample data.
    pub fn populate_test_data(&mut self) -> FormResult<()> {
        self.form.patch_value(&json!({ "firstName": "Sajad" }))
    }

    /// Validate everything, log the outcome and return it.
    pub fn save(&mut self) -> Validation<Value, Vec<FieldError>> {
        let result = self.form.submit();

        #[cfg(feature = "tracing")]
        match &result {
            Validation::Success(value) => tracing::info!(%value, "saved"),
            Validation::Failure(errors) => {
                tracing::info!(failing = errors.len(), "save rejected")
            }
        }

        result
    }

    /// The current values as a [`Customer`].
    pub fn customer(&self) -> Result<Customer, serde_json::Error> {
        serde_json::from_value(self.form.value())
    }
}

fn update_phone_validation(form: &mut Form, notify_via: &Value) -> FormResult<()> {
    if notify_via == TEXT_NOTIFICATION {
        form.set_validators("phone", vec![validator::required()])?;
    } else {
        form.clear_validators("phone")?;
    }
    form.update_value_and_validity("phone")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_home_address() {
        let signup = CustomerSignup::new().unwrap();
        let customer = signup.customer().unwrap();
        assert_eq!(customer.addresses.len(), 1);
        assert_eq!(customer.addresses[0].address_type, "home");
        assert_eq!(customer.notification, "email");
        assert!(customer.send_catalog);
        assert_eq!(customer.rating, json!(""));
    }

    #[test]
    fn snapshot_keeps_schema_order() {
        let signup = CustomerSignup::new().unwrap();
        let value = signup.form().value();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "firstName",
                "lastName",
                "emailGroup",
                "phone",
                "notification",
                "rating",
                "sendCatalog",
                "addresses"
            ]
        );
    }

    #[test]
    fn populate_test_data_sets_first_name_only() {
        let mut signup = CustomerSignup::new().unwrap();
        signup.populate_test_data().unwrap();
        let customer = signup.customer().unwrap();
        assert_eq!(customer.first_name, "Sajad");
        assert_eq!(customer.last_name, "");
        assert!(signup.form().field("firstName").unwrap().is_valid());
    }

    #[test]
    fn empty_rating_is_out_of_range() {
        let signup = CustomerSignup::new().unwrap();
        assert!(signup.form().field("rating").unwrap().has_error("range"));
    }

    #[test]
    fn email_errors_start_empty() {
        let signup = CustomerSignup::new().unwrap();
        assert_eq!(signup.email_errors(), "");
    }
}

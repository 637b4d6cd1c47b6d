//! Walks through the customer signup form
//!
//! Run with: cargo run --example customer_signup

use std::thread;

use serde_json::json;
use stillform::signup::{CustomerSignup, EMAIL_PATH, TEXT_NOTIFICATION};
use stillform::{FormError, Validation};

fn main() -> Result<(), FormError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut signup = CustomerSignup::new()?;
    signup.populate_test_data()?;

    // Typing an email arms the debounce; the host waits for the deadline.
    signup.form_mut().set_value(EMAIL_PATH, json!("sajad@"))?;
    wait_for_timers(&mut signup);
    tracing::info!(message = %signup.email_errors(), "email checked");

    signup
        .form_mut()
        .set_value(EMAIL_PATH, json!("sajad@example.com"))?;
    signup
        .form_mut()
        .set_value("emailGroup.confirmEmail", json!("sajad@example.com"))?;
    wait_for_timers(&mut signup);

    // Text notifications need a phone number.
    signup
        .form_mut()
        .set_value("notification", json!(TEXT_NOTIFICATION))?;
    let phone_valid = signup.form().field("phone")?.is_valid();
    tracing::info!(phone_valid, "switched to text notifications");
    signup.form_mut().set_value("phone", json!("555-0100"))?;

    signup.form_mut().set_value("lastName", json!("Rahimi"))?;
    signup.form_mut().set_value("rating", json!(5))?;

    let work = signup.add_address()?;
    signup.form_mut().patch_value_at(
        &format!("addresses.{work}"),
        &json!({"addressType": "work", "city": "Tehran"}),
    )?;

    match signup.save() {
        Validation::Success(_) => match signup.customer() {
            Ok(customer) => tracing::info!(?customer, "customer saved"),
            Err(err) => tracing::error!(%err, "snapshot did not match the customer record"),
        },
        Validation::Failure(errors) => {
            for error in errors {
                tracing::warn!(path = %error.path, errors = %error.errors, "still failing");
            }
        }
    }

    Ok(())
}

fn wait_for_timers(signup: &mut CustomerSignup) {
    while let Some(deadline) = signup.form().next_deadline() {
        let now = signup.form().now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        signup.form_mut().run_due_timers();
    }
}

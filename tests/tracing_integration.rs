//! Log output of form operations
#![cfg(feature = "tracing")]

use serde_json::json;
use stillform::signup::{CustomerSignup, EMAIL_DEBOUNCE, EMAIL_PATH};
use stillform::{FormOptions, ManualClock};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn debounce_and_structure_are_logged() {
    let clock = ManualClock::new();
    let mut signup =
        CustomerSignup::with_options(FormOptions::new().with_clock(clock.clone())).unwrap();

    signup
        .form_mut()
        .set_value(EMAIL_PATH, json!("sajad@example.com"))
        .unwrap();
    assert!(logs_contain("debounce timer armed"));

    clock.advance(EMAIL_DEBOUNCE);
    signup.form_mut().run_due_timers();
    assert!(logs_contain("debounce timers fired"));

    signup.add_address().unwrap();
    signup.remove_address(0).unwrap();
    assert!(logs_contain("group pushed"));
    assert!(logs_contain("group removed"));
}

#[traced_test]
#[test]
fn notification_rewiring_is_logged() {
    let mut signup = CustomerSignup::new().unwrap();
    signup
        .form_mut()
        .set_value("notification", json!("text"))
        .unwrap();
    assert!(logs_contain("validators replaced"));
    assert!(logs_contain("field revalidated"));
}

#[traced_test]
#[test]
fn save_is_logged() {
    let mut signup = CustomerSignup::new().unwrap();
    let _ = signup.save();
    assert!(logs_contain("save rejected"));
}

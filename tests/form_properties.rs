//! Property-based tests for field evaluation and group arrays

use proptest::prelude::*;
use serde_json::{json, Value};
use stillform::signup::{email_messages, rating, EMAIL_PATTERN};
use stillform::{
    validator, ErrorSet, FieldSchema, FieldStatus, Form, GroupBuilder, MessageTable, Schema,
    Validator,
};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-100i64..100).prop_map(Value::from),
        "[a-zA-Z0-9@. ]{0,12}".prop_map(Value::from),
    ]
}

fn builtins() -> Vec<Validator> {
    vec![
        validator::required(),
        validator::min_length(3),
        validator::max_length(5),
        validator::pattern(EMAIL_PATTERN).unwrap(),
        rating(),
    ]
}

fn row() -> Schema {
    Schema::new().value("label", "")
}

proptest! {
    #[test]
    fn prop_failing_validator_marks_field_invalid(
        value in scalar(),
        picks in proptest::sample::subsequence(builtins(), 0..=5),
    ) {
        let form = Form::new(
            Schema::new().field("f", FieldSchema::new(value.clone()).validators(picks.clone())),
        )
        .unwrap();
        let field = form.field("f").unwrap();

        let any_failed = picks.iter().any(|v| v.validate(&value).is_some());
        match field.errors() {
            Some(errors) => {
                prop_assert!(any_failed);
                prop_assert!(!errors.is_empty());
                prop_assert_eq!(field.status(), FieldStatus::Invalid);
            }
            None => {
                prop_assert!(!any_failed);
                prop_assert_eq!(field.status(), FieldStatus::Valid);
            }
        }
    }

    #[test]
    fn prop_merged_errors_are_union_of_each_validator(value in scalar()) {
        let validators = builtins();
        let merged = Validator::evaluate_all(&validators, &value).unwrap_or_default();
        for v in &validators {
            if let Some(errors) = v.validate(&value) {
                for kind in errors.kinds() {
                    prop_assert!(merged.contains(kind));
                }
            }
        }
    }

    #[test]
    fn prop_no_errors_projects_to_empty_message(
        entries in prop::collection::vec(("[a-z]{1,8}", ".{0,20}"), 0..6)
    ) {
        let table: MessageTable = entries.into_iter().collect();
        prop_assert_eq!(table.project(None), "");
        prop_assert_eq!(table.project(Some(&ErrorSet::new())), "");
    }

    #[test]
    fn prop_projection_follows_error_order(
        kinds in proptest::sample::subsequence(vec!["required", "pattern"], 0..=2)
    ) {
        let errors: ErrorSet = kinds.iter().copied().collect();
        let table = email_messages();
        let expected: Vec<_> = kinds.iter().filter_map(|k| table.get(k)).collect();
        prop_assert_eq!(table.project(Some(&errors)), expected.join(" "));
    }

    #[test]
    fn prop_array_ops_keep_relative_order(
        pushes in 0usize..8,
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut form = Form::new(
            Schema::new().array("rows", GroupBuilder::new("row", row), 1),
        )
        .unwrap();
        let mut model = vec![0usize];
        form.set_value("rows.0.label", json!(0)).unwrap();

        for n in 1..=pushes {
            let index = form.push("rows").unwrap();
            prop_assert_eq!(index, model.len());
            form.set_value(&format!("rows.{index}.label"), json!(n)).unwrap();
            model.push(n);
        }

        for removal in removals {
            if model.is_empty() {
                prop_assert!(form.remove_at("rows", 0).is_err());
                break;
            }
            let index = removal.index(model.len());
            form.remove_at("rows", index).unwrap();
            model.remove(index);
        }

        let labels: Vec<Value> = form.value()["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["label"].clone())
            .collect();
        let expected: Vec<Value> = model.into_iter().map(Value::from).collect();
        prop_assert_eq!(labels, expected);
        prop_assert!(form.array("rows").unwrap().status() == FieldStatus::Valid);
    }
}

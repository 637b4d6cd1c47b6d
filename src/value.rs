//! Loose interpretation of field values
//!
//! Field values are JSON scalars (`serde_json::Value`). Validators look at
//! them through the helpers here, which follow the forgiving rules browsers
//! apply to form input: an empty string counts as "no value", a numeric
//! string counts as a number, and so on.

pub use serde_json::Value;

/// `true` for values that count as "nothing entered": null, the empty
/// string, and the empty array.
///
/// ```
/// use serde_json::json;
/// use stillform::value::is_blank;
///
/// assert!(is_blank(&json!(null)));
/// assert!(is_blank(&json!("")));
/// assert!(!is_blank(&json!(" ")));
/// assert!(!is_blank(&json!(0)));
/// ```
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Length of strings (in chars) and arrays. Other values have no length.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Coerce a value to a number.
///
/// null is 0, booleans are 0 or 1, strings are trimmed and parsed with the
/// empty string reading as 0. Strings may be decimal, `Infinity`, or unsigned
/// integers with a `0x`, `0o` or `0b` prefix. Anything unparsable, and any
/// object or array, is NaN.
///
/// ```
/// use serde_json::json;
/// use stillform::value::to_number;
///
/// assert_eq!(to_number(&json!("3")), 3.0);
/// assert_eq!(to_number(&json!(" 4.5 ")), 4.5);
/// assert_eq!(to_number(&json!("")), 0.0);
/// assert_eq!(to_number(&json!("0x1f")), 31.0);
/// assert_eq!(to_number(&json!(null)), 0.0);
/// assert!(to_number(&json!("abc")).is_nan());
/// ```
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                parse_number(trimmed)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn parse_number(text: &str) -> f64 {
    let radix = match text.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return parse_decimal(text),
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return f64::NAN;
    }
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
}

fn parse_decimal(text: &str) -> f64 {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // `str::parse` also takes `inf` and `nan` spelled any way
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// The text a pattern is matched against.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `true` for null, booleans, numbers and strings.
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values() {
        assert!(is_blank(&json!([])));
        assert!(!is_blank(&json!(false)));
        assert!(!is_blank(&json!("a")));
    }

    #[test]
    fn length_counts_chars() {
        assert_eq!(length_of(&json!("héllo")), Some(5));
        assert_eq!(length_of(&json!([1, 2])), Some(2));
        assert_eq!(length_of(&json!(12345)), None);
    }

    #[test]
    fn number_coercion() {
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(false)), 0.0);
        assert_eq!(to_number(&json!(5)), 5.0);
        assert!(to_number(&json!({})).is_nan());
        assert!(to_number(&json!("1x")).is_nan());
    }

    #[test]
    fn prefixed_integers_and_infinity() {
        assert_eq!(to_number(&json!("0x3")), 3.0);
        assert_eq!(to_number(&json!(" 0B101 ")), 5.0);
        assert_eq!(to_number(&json!("0o17")), 15.0);
        assert_eq!(to_number(&json!("-Infinity")), f64::NEG_INFINITY);
        assert_eq!(to_number(&json!("1e3")), 1000.0);
        for bad in ["0x", "0xZ", "-0x3", "0b2", "inf", "NaN", "infinity"] {
            assert!(to_number(&json!(bad)).is_nan(), "{bad}");
        }
    }

    #[test]
    fn text_of_scalars() {
        assert_eq!(to_text(&json!("a@b")), "a@b");
        assert_eq!(to_text(&json!(42)), "42");
        assert_eq!(to_text(&json!(null)), "");
    }

    #[test]
    fn scalars() {
        assert!(is_scalar(&json!(null)));
        assert!(is_scalar(&json!("x")));
        assert!(!is_scalar(&json!([1])));
        assert!(!is_scalar(&json!({"a": 1})));
    }
}

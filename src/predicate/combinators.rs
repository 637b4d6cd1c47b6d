//! Core predicate trait and logical combinators

/// A composable predicate over values of type T.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use stillform::predicate::*;
///
/// let one_to_five = numeric_within(1.0, 5.0);
/// assert!(one_to_five.check(&json!(3)));
/// assert!(!one_to_five.not().check(&json!(3)));
/// ```
pub trait Predicate<T: ?Sized>: Send + Sync {
    /// Check if the value satisfies this predicate.
    fn check(&self, value: &T) -> bool;
}

// Blanket impl for closures
impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, value: &T) -> bool {
        self(value)
    }
}

/// Extension trait for predicate combinators.
pub trait PredicateExt<T: ?Sized>: Predicate<T> + Sized {
    /// Both predicates must hold.
    fn and<P: Predicate<T>>(self, other: P) -> And<Self, P> {
        And(self, other)
    }

    /// Either predicate must hold.
    fn or<P: Predicate<T>>(self, other: P) -> Or<Self, P> {
        Or(self, other)
    }

    /// Invert the predicate.
    fn not(self) -> Not<Self> {
        Not(self)
    }
}

impl<T: ?Sized, P: Predicate<T>> PredicateExt<T> for P {}

/// AND combinator - both predicates must be true.
#[derive(Clone, Copy, Debug)]
pub struct And<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for And<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) && self.1.check(value)
    }
}

/// OR combinator - either predicate must be true.
#[derive(Clone, Copy, Debug)]
pub struct Or<P1, P2>(pub P1, pub P2);

impl<T: ?Sized, P1: Predicate<T>, P2: Predicate<T>> Predicate<T> for Or<P1, P2> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        self.0.check(value) || self.1.check(value)
    }
}

/// NOT combinator - inverts the predicate.
#[derive(Clone, Copy, Debug)]
pub struct Not<P>(pub P);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Not<P> {
    #[inline]
    fn check(&self, value: &T) -> bool {
        !self.0.check(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{blank, max_len, min_len};
    use serde_json::{json, Value};

    #[test]
    fn test_and() {
        let p = min_len(2).and(max_len(4));
        assert!(p.check(&json!("abc")));
        assert!(!p.check(&json!("a")));
        assert!(!p.check(&json!("abcde")));
    }

    #[test]
    fn test_or() {
        let p = blank().or(min_len(3));
        assert!(p.check(&json!(null)));
        assert!(p.check(&json!("abcd")));
        assert!(!p.check(&json!("ab")));
    }

    #[test]
    fn test_not() {
        let p = blank().not();
        assert!(p.check(&json!("x")));
        assert!(!p.check(&json!("")));
    }

    #[test]
    fn test_closure_as_predicate() {
        let is_home = |v: &Value| v == &json!("home");
        assert!(is_home.check(&json!("home")));
        assert!(!is_home.or(blank()).check(&json!("work")));
    }
}

//! Turning error kinds into text.

use std::collections::HashMap;

use crate::ErrorSet;

/// Lookup table from error kind to a human-readable message.
///
/// ```
/// use stillform::{ErrorSet, MessageTable};
///
/// let table = MessageTable::new()
///     .with("required", "Please enter your email address.")
///     .with("pattern", "Please enter a valid email address.");
///
/// let errors = ErrorSet::single("pattern");
/// assert_eq!(table.project(Some(&errors)), "Please enter a valid email address.");
/// assert_eq!(table.project(None), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the message for `kind`.
    pub fn with(mut self, kind: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(kind.into(), message.into());
        self
    }

    /// The message for one kind.
    pub fn get(&self, kind: &str) -> Option<&str> {
        self.messages.get(kind).map(String::as_str)
    }

    /// Join the messages of every failing kind with a single space.
    ///
    /// Kinds are visited in the set's order. Kinds without a message are
    /// skipped, and no errors at all yields the empty string.
    pub fn project(&self, errors: Option<&ErrorSet>) -> String {
        let Some(errors) = errors else {
            return String::new();
        };
        errors
            .kinds()
            .filter_map(|kind| self.get(kind))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, M: Into<String>> FromIterator<(K, M)> for MessageTable {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MessageTable::new(), |table, (kind, message)| table.with(kind, message))
    }
}

//! Declarative description of a form's shape.
//!
//! A [`Schema`] lists a group's keys in display order. Each key is a field
//! (initial value plus validators), a nested group, or an array of groups
//! stamped out by a [`GroupBuilder`]. Schemas are plain data: nothing is
//! checked until [`Form::new`](crate::Form::new) builds the tree, which is
//! where malformed keys or patterns are reported.
//!
//! ```
//! use serde_json::json;
//! use stillform::schema::{FieldSchema, GroupBuilder, Schema};
//! use stillform::validator;
//!
//! fn address() -> Schema {
//!     Schema::new().value("street", "").value("city", "")
//! }
//!
//! let schema = Schema::new()
//!     .field("name", FieldSchema::new("").validator(validator::required()))
//!     .group("contact", Schema::new().value("phone", ""))
//!     .array("addresses", GroupBuilder::new("address", address), 1);
//!
//! assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["name", "contact", "addresses"]);
//! ```

use std::time::Duration;

use crate::error::SchemaError;
use crate::validator::{self, Validator};
use crate::value::Value;

/// Ordered description of a group.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(String, SchemaNode)>,
}

/// One entry of a [`Schema`].
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A leaf value.
    Field(FieldSchema),
    /// A nested group.
    Group(Schema),
    /// A resizable list of groups.
    Array(ArraySchema),
}

impl Schema {
    /// An empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn field(mut self, key: impl Into<String>, field: FieldSchema) -> Self {
        self.entries.push((key.into(), SchemaNode::Field(field)));
        self
    }

    /// Add a field with no validators.
    pub fn value(self, key: impl Into<String>, initial: impl Into<Value>) -> Self {
        self.field(key, FieldSchema::new(initial))
    }

    /// Add a nested group.
    pub fn group(mut self, key: impl Into<String>, schema: Schema) -> Self {
        self.entries.push((key.into(), SchemaNode::Group(schema)));
        self
    }

    /// Add an array seeded with `initial` groups from `builder`.
    pub fn array(
        mut self,
        key: impl Into<String>,
        builder: GroupBuilder,
        initial: usize,
    ) -> Self {
        let array = ArraySchema { builder, initial };
        self.entries.push((key.into(), SchemaNode::Array(array)));
        self
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` for a schema with no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<(String, SchemaNode)> {
        self.entries
    }
}

/// Initial state and rules for one field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub(crate) initial: Value,
    pub(crate) validators: Vec<Validator>,
    pub(crate) debounce: Option<Duration>,
    pub(crate) defect: Option<SchemaError>,
}

impl FieldSchema {
    /// A field starting at `initial` with no validators.
    pub fn new(initial: impl Into<Value>) -> Self {
        Self {
            initial: initial.into(),
            validators: Vec::new(),
            debounce: None,
            defect: None,
        }
    }

    /// Append a validator.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Append several validators.
    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Append a [`pattern`](crate::validator::pattern) validator.
    ///
    /// A pattern that does not compile makes the form refuse to build.
    pub fn pattern(mut self, source: &str) -> Self {
        match validator::pattern(source) {
            Ok(v) => self.validators.push(v),
            Err(err) => {
                self.defect.get_or_insert(SchemaError::InvalidPattern {
                    pattern: source.to_string(),
                    reason: err.to_string(),
                });
            }
        }
        self
    }

    /// Defer validation until the value has been stable for `delay`.
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }
}

/// An array entry: its builder and how many groups to start with.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    pub(crate) builder: GroupBuilder,
    pub(crate) initial: usize,
}

/// Named factory for the groups of an array.
///
/// The factory is a plain function so every call yields the same shape.
#[derive(Debug, Clone, Copy)]
pub struct GroupBuilder {
    name: &'static str,
    build: fn() -> Schema,
}

impl GroupBuilder {
    /// Pair a name with a factory.
    pub const fn new(name: &'static str, build: fn() -> Schema) -> Self {
        Self { name, build }
    }

    /// The builder's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Produce a fresh schema.
    pub fn build(&self) -> Schema {
        (self.build)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> Schema {
        Schema::new().value("addressType", "home").value("city", "")
    }

    #[test]
    fn keys_keep_declaration_order() {
        let schema = Schema::new()
            .value("b", 1)
            .value("a", 2)
            .group("c", Schema::new());
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(schema.len(), 3);
        assert!(Schema::new().is_empty());
    }

    #[test]
    fn builder_yields_same_shape() {
        let builder = GroupBuilder::new("address", address);
        assert_eq!(builder.name(), "address");
        let first: Vec<_> = builder.build().keys().map(String::from).collect();
        let second: Vec<_> = builder.build().keys().map(String::from).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn bad_pattern_is_recorded() {
        let field = FieldSchema::new("").pattern("(");
        assert!(matches!(
            field.defect,
            Some(SchemaError::InvalidPattern { ref pattern, .. }) if pattern == "("
        ));
        assert!(field.validators.is_empty());
    }

    #[test]
    fn field_collects_validators() {
        let field = FieldSchema::new(json!(""))
            .validator(validator::required())
            .validators([validator::min_length(3), validator::max_length(9)])
            .debounce(Duration::from_millis(10));
        assert_eq!(field.validators.len(), 3);
        assert_eq!(field.debounce, Some(Duration::from_millis(10)));
    }
}

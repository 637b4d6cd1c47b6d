//! The live tree of fields, groups and group arrays.
//!
//! Controls are built from a [`Schema`] and owned by a [`Form`](crate::Form).
//! Callers read them through [`ControlRef`]; every mutation goes through the
//! form so that change events are emitted.

use std::time::Duration;

use crate::context::{ContextError, ResultContext};
use crate::error::{FormError, FormResult, SchemaError};
use crate::schema::{ArraySchema, FieldSchema, GroupBuilder, Schema, SchemaNode};
use crate::timer::Timer;
use crate::validator::Validator;
use crate::value::{is_scalar, Value};
use crate::ErrorSet;

/// Identity of a control, stable for the control's whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

#[derive(Debug, Default)]
pub(crate) struct NodeIds {
    next: u64,
}

impl NodeIds {
    pub(crate) fn next(&mut self) -> NodeId {
        self.next += 1;
        NodeId(self.next)
    }
}

/// Outcome of the most recent evaluation of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldStatus {
    /// Every validator passed.
    Valid,
    /// At least one validator failed.
    Invalid,
    /// A debounced evaluation is waiting for its quiet period to end.
    Pending,
}

impl FieldStatus {
    /// Merge the status of two siblings: invalid wins over pending, pending
    /// wins over valid.
    fn merge(self, other: FieldStatus) -> FieldStatus {
        use FieldStatus::*;
        match (self, other) {
            (Invalid, _) | (_, Invalid) => Invalid,
            (Pending, _) | (_, Pending) => Pending,
            _ => Valid,
        }
    }
}

/// A leaf holding one value and the validators that judge it.
#[derive(Debug, Clone)]
pub struct FieldControl {
    id: NodeId,
    value: Value,
    initial: Value,
    validators: Vec<Validator>,
    errors: Option<ErrorSet>,
    status: FieldStatus,
    dirty: bool,
    touched: bool,
    debounce: Option<Duration>,
    timer: Timer,
}

impl FieldControl {
    fn from_schema(schema: FieldSchema, id: NodeId) -> Result<Self, SchemaError> {
        if let Some(defect) = schema.defect {
            return Err(defect);
        }
        if !is_scalar(&schema.initial) {
            return Err(SchemaError::NonScalarValue(schema.initial.to_string()));
        }
        let mut field = FieldControl {
            id,
            value: schema.initial.clone(),
            initial: schema.initial,
            validators: schema.validators,
            errors: None,
            status: FieldStatus::Valid,
            dirty: false,
            touched: false,
            debounce: schema.debounce,
            timer: Timer::default(),
        };
        field.evaluate();
        Ok(field)
    }

    /// This field's identity.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The value the field was built with and returns to on reset.
    pub fn initial_value(&self) -> &Value {
        &self.initial
    }

    /// Active validators, in evaluation order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Failing kinds from the last completed evaluation.
    pub fn errors(&self) -> Option<&ErrorSet> {
        self.errors.as_ref()
    }

    /// `true` if `kind` failed in the last completed evaluation.
    pub fn has_error(&self, kind: &str) -> bool {
        self.errors.as_ref().is_some_and(|e| e.contains(kind))
    }

    /// Current status.
    pub fn status(&self) -> FieldStatus {
        self.status
    }

    /// `true` when the status is [`FieldStatus::Valid`].
    pub fn is_valid(&self) -> bool {
        self.status == FieldStatus::Valid
    }

    /// `true` when the status is [`FieldStatus::Invalid`].
    pub fn is_invalid(&self) -> bool {
        self.status == FieldStatus::Invalid
    }

    /// `true` while a debounced evaluation is outstanding.
    pub fn is_pending(&self) -> bool {
        self.status == FieldStatus::Pending
    }

    /// `true` once the value has been changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// `true` until the value is changed.
    pub fn is_pristine(&self) -> bool {
        !self.dirty
    }

    /// `true` once the field has been marked touched.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Quiet period applied to validation, if any.
    pub fn debounce(&self) -> Option<Duration> {
        self.debounce
    }

    /// Deadline of the outstanding debounced evaluation.
    pub fn pending_deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// Run every validator now and settle the status.
    pub(crate) fn evaluate(&mut self) -> FieldStatus {
        self.timer.cancel();
        self.errors = Validator::evaluate_all(&self.validators, &self.value);
        self.status = if self.errors.is_some() {
            FieldStatus::Invalid
        } else {
            FieldStatus::Valid
        };
        self.status
    }

    /// Store a new value, then evaluate it or start the quiet period.
    pub(crate) fn commit(&mut self, value: Value, now: Duration) -> FieldStatus {
        if value != self.value {
            self.dirty = true;
        }
        self.value = value;
        match self.debounce {
            Some(delay) => {
                self.timer.arm(now, delay);
                self.status = FieldStatus::Pending;
                self.status
            }
            None => self.evaluate(),
        }
    }

    pub(crate) fn fire_if_due(&mut self, now: Duration) -> bool {
        self.timer.fire_if_due(now)
    }

    pub(crate) fn set_validators(&mut self, validators: Vec<Validator>) {
        self.validators = validators;
    }

    pub(crate) fn add_validator(&mut self, validator: Validator) {
        self.validators.push(validator);
    }

    pub(crate) fn set_debounce(&mut self, debounce: Option<Duration>) {
        self.debounce = debounce;
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub(crate) fn reset(&mut self) -> FieldStatus {
        self.value = self.initial.clone();
        self.dirty = false;
        self.touched = false;
        self.evaluate()
    }
}

/// Named children in declaration order.
#[derive(Debug, Clone)]
pub struct Group {
    id: NodeId,
    entries: Vec<(String, Control)>,
}

/// A child of a [`Group`].
#[derive(Debug, Clone)]
pub enum Control {
    /// A leaf field.
    Field(FieldControl),
    /// A nested group.
    Group(Group),
    /// A list of groups.
    Array(GroupArray),
}

/// Borrowed view of any control.
#[derive(Debug, Clone, Copy)]
pub enum ControlRef<'a> {
    /// A leaf field.
    Field(&'a FieldControl),
    /// A group.
    Group(&'a Group),
    /// A list of groups.
    Array(&'a GroupArray),
}

pub(crate) enum ControlMut<'a> {
    Field(&'a mut FieldControl),
    Group(&'a mut Group),
    Array(&'a mut GroupArray),
}

impl Control {
    fn view(&self) -> ControlRef<'_> {
        match self {
            Control::Field(f) => ControlRef::Field(f),
            Control::Group(g) => ControlRef::Group(g),
            Control::Array(a) => ControlRef::Array(a),
        }
    }

    fn view_mut(&mut self) -> ControlMut<'_> {
        match self {
            Control::Field(f) => ControlMut::Field(f),
            Control::Group(g) => ControlMut::Group(g),
            Control::Array(a) => ControlMut::Array(a),
        }
    }
}

impl<'a> ControlRef<'a> {
    /// Identity of this control.
    pub fn id(&self) -> NodeId {
        match self {
            ControlRef::Field(f) => f.id,
            ControlRef::Group(g) => g.id,
            ControlRef::Array(a) => a.id,
        }
    }

    /// Snapshot of the value below this control.
    pub fn value(&self) -> Value {
        match self {
            ControlRef::Field(f) => f.value.clone(),
            ControlRef::Group(g) => g.value(),
            ControlRef::Array(a) => a.value(),
        }
    }

    /// Status of this control.
    pub fn status(&self) -> FieldStatus {
        match self {
            ControlRef::Field(f) => f.status,
            ControlRef::Group(g) => g.status(),
            ControlRef::Array(a) => a.status(),
        }
    }

    /// `true` when the status is [`FieldStatus::Valid`].
    pub fn is_valid(&self) -> bool {
        self.status() == FieldStatus::Valid
    }

    /// The field, or [`FormError::NotAField`].
    pub fn into_field(self, path: &str) -> FormResult<&'a FieldControl> {
        match self {
            ControlRef::Field(f) => Ok(f),
            _ => Err(FormError::NotAField(path.to_string())),
        }
    }

    /// The group, or [`FormError::NotAGroup`].
    pub fn into_group(self, path: &str) -> FormResult<&'a Group> {
        match self {
            ControlRef::Group(g) => Ok(g),
            _ => Err(FormError::NotAGroup(path.to_string())),
        }
    }

    /// The array, or [`FormError::NotAnArray`].
    pub fn into_array(self, path: &str) -> FormResult<&'a GroupArray> {
        match self {
            ControlRef::Array(a) => Ok(a),
            _ => Err(FormError::NotAnArray(path.to_string())),
        }
    }
}

impl<'a> ControlMut<'a> {
    pub(crate) fn into_field(self, path: &str) -> FormResult<&'a mut FieldControl> {
        match self {
            ControlMut::Field(f) => Ok(f),
            _ => Err(FormError::NotAField(path.to_string())),
        }
    }

    pub(crate) fn into_array(self, path: &str) -> FormResult<&'a mut GroupArray> {
        match self {
            ControlMut::Array(a) => Ok(a),
            _ => Err(FormError::NotAnArray(path.to_string())),
        }
    }
}

fn check_key(key: &str, taken: &[(String, Control)]) -> Result<(), SchemaError> {
    if key.is_empty() {
        return Err(SchemaError::EmptyKey);
    }
    if key.contains(['.', '[', ']']) {
        return Err(SchemaError::InvalidKey(key.to_string()));
    }
    if taken.iter().any(|(existing, _)| existing == key) {
        return Err(SchemaError::DuplicateKey(key.to_string()));
    }
    Ok(())
}

/// Split a dotted path into segments, rejecting empty ones. The empty
/// path has no segments.
pub(crate) fn split_path(path: &str) -> FormResult<Vec<&str>> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(FormError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

/// Join a child segment onto a parent path.
pub(crate) fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}.{segment}")
    }
}

fn not_found(path: &str, segments: &[&str], depth: usize) -> FormError {
    FormError::PathNotFound {
        path: path.to_string(),
        segment: segments[..=depth].join("."),
    }
}

impl Group {
    pub(crate) fn from_schema(
        schema: Schema,
        ids: &mut NodeIds,
    ) -> Result<Group, ContextError<SchemaError>> {
        let id = ids.next();
        let mut entries: Vec<(String, Control)> = Vec::with_capacity(schema.len());
        for (key, node) in schema.into_entries() {
            check_key(&key, &entries).map_err(ContextError::new)?;
            let control = match node {
                SchemaNode::Field(field) => Control::Field(
                    FieldControl::from_schema(field, ids.next())
                        .map_err(|err| ContextError::new(err).context(key.as_str()))?,
                ),
                SchemaNode::Group(schema) => {
                    Control::Group(Group::from_schema(schema, ids).context(key.as_str())?)
                }
                SchemaNode::Array(array) => {
                    Control::Array(GroupArray::from_schema(array, ids).context(key.as_str())?)
                }
            };
            entries.push((key, control));
        }
        Ok(Group { id, entries })
    }

    /// Identity of this group.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Child keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Direct child by key.
    pub fn get(&self, key: &str) -> Option<ControlRef<'_>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, control)| control.view())
    }

    fn get_mut(&mut self, key: &str) -> Option<ControlMut<'_>> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, control)| control.view_mut())
    }

    /// Resolve a dotted path below this group. The empty path is the group
    /// itself.
    pub fn resolve(&self, path: &str) -> FormResult<ControlRef<'_>> {
        let segments = split_path(path)?;
        let mut current = ControlRef::Group(self);
        for (depth, segment) in segments.iter().enumerate() {
            current = match current {
                ControlRef::Group(group) => group
                    .get(segment)
                    .ok_or_else(|| not_found(path, &segments, depth))?,
                ControlRef::Array(array) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| array.at(index))
                    .map(ControlRef::Group)
                    .ok_or_else(|| not_found(path, &segments, depth))?,
                ControlRef::Field(_) => return Err(not_found(path, &segments, depth)),
            };
        }
        Ok(current)
    }

    pub(crate) fn resolve_mut(&mut self, path: &str) -> FormResult<ControlMut<'_>> {
        let segments = split_path(path)?;
        let mut current = ControlMut::Group(self);
        for (depth, segment) in segments.iter().enumerate() {
            current = match current {
                ControlMut::Group(group) => group
                    .get_mut(segment)
                    .ok_or_else(|| not_found(path, &segments, depth))?,
                ControlMut::Array(array) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| array.groups.get_mut(index))
                    .map(ControlMut::Group)
                    .ok_or_else(|| not_found(path, &segments, depth))?,
                ControlMut::Field(_) => return Err(not_found(path, &segments, depth)),
            };
        }
        Ok(current)
    }

    /// Snapshot of every value below this group, keys in declaration order.
    pub fn value(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|(key, control)| (key.clone(), control.view().value()))
            .collect::<serde_json::Map<_, _>>();
        Value::Object(map)
    }

    /// Merged status of every descendant; an empty group is valid.
    pub fn status(&self) -> FieldStatus {
        self.entries
            .iter()
            .map(|(_, control)| control.view().status())
            .fold(FieldStatus::Valid, FieldStatus::merge)
    }

    /// `true` when every descendant is valid.
    pub fn is_valid(&self) -> bool {
        self.status() == FieldStatus::Valid
    }

    /// Visit every field below this group with its full path.
    pub fn for_each_field<'a>(&'a self, prefix: &str, f: &mut dyn FnMut(&str, &'a FieldControl)) {
        for (key, control) in &self.entries {
            let path = join_path(prefix, key);
            match control {
                Control::Field(field) => f(&path, field),
                Control::Group(group) => group.for_each_field(&path, f),
                Control::Array(array) => array.for_each_field(&path, f),
            }
        }
    }

    /// Visit the identity of this group and of every control below it.
    pub(crate) fn for_each_node(&self, f: &mut dyn FnMut(NodeId)) {
        f(self.id);
        for (_, control) in &self.entries {
            match control {
                Control::Field(field) => f(field.id),
                Control::Group(group) => group.for_each_node(f),
                Control::Array(array) => {
                    f(array.id);
                    for group in &array.groups {
                        group.for_each_node(f);
                    }
                }
            }
        }
    }

    pub(crate) fn for_each_field_mut(
        &mut self,
        prefix: &str,
        f: &mut dyn FnMut(&str, &mut FieldControl),
    ) {
        for (key, control) in &mut self.entries {
            let path = join_path(prefix, key);
            match control {
                Control::Field(field) => f(&path, field),
                Control::Group(group) => group.for_each_field_mut(&path, f),
                Control::Array(array) => {
                    for (index, group) in array.groups.iter_mut().enumerate() {
                        group.for_each_field_mut(&join_path(&path, &index.to_string()), f);
                    }
                }
            }
        }
    }
}

/// An ordered, resizable list of groups sharing one builder.
#[derive(Debug, Clone)]
pub struct GroupArray {
    id: NodeId,
    builder: GroupBuilder,
    groups: Vec<Group>,
}

impl GroupArray {
    fn from_schema(
        schema: ArraySchema,
        ids: &mut NodeIds,
    ) -> Result<GroupArray, ContextError<SchemaError>> {
        let id = ids.next();
        let builder = schema.builder;
        if schema.initial == 0 {
            // Nothing to seed; still prove the builder yields a valid group.
            Group::from_schema(builder.build(), &mut NodeIds::default())
                .context(format!("[{}]", builder.name()))?;
        }
        let groups = (0..schema.initial)
            .map(|index| Group::from_schema(builder.build(), ids).context(format!("[{index}]")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GroupArray {
            id,
            builder,
            groups,
        })
    }

    /// Identity of this array.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The builder used for new groups.
    pub fn builder(&self) -> GroupBuilder {
        self.builder
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when the array holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group at `index`.
    pub fn at(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Groups in order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Snapshot of every group's value.
    pub fn value(&self) -> Value {
        Value::Array(self.groups.iter().map(Group::value).collect())
    }

    /// Merged status of every group; an empty array is valid.
    pub fn status(&self) -> FieldStatus {
        self.groups
            .iter()
            .map(Group::status)
            .fold(FieldStatus::Valid, FieldStatus::merge)
    }

    /// Visit every field below this array with its full path.
    pub fn for_each_field<'a>(&'a self, prefix: &str, f: &mut dyn FnMut(&str, &'a FieldControl)) {
        for (index, group) in self.groups.iter().enumerate() {
            group.for_each_field(&join_path(prefix, &index.to_string()), f);
        }
    }

    /// Build a new group and append it, returning its index.
    pub(crate) fn push(&mut self, ids: &mut NodeIds) -> Result<usize, ContextError<SchemaError>> {
        let index = self.groups.len();
        let group =
            Group::from_schema(self.builder.build(), ids).context(format!("[{index}]"))?;
        self.groups.push(group);
        Ok(index)
    }

    /// Remove the group at `index`, shifting later groups down.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Group> {
        (index < self.groups.len()).then(|| self.groups.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator;
    use serde_json::json;

    fn address() -> Schema {
        Schema::new().value("city", "").value("zip", "")
    }

    fn tree() -> Group {
        let schema = Schema::new()
            .field(
                "name",
                FieldSchema::new("").validator(validator::required()),
            )
            .group("contact", Schema::new().value("phone", ""))
            .array("addresses", GroupBuilder::new("address", address), 2);
        Group::from_schema(schema, &mut NodeIds::default()).unwrap()
    }

    #[test]
    fn fields_are_evaluated_on_build() {
        let root = tree();
        let name = root.resolve("name").unwrap().into_field("name").unwrap();
        assert!(name.is_invalid());
        assert!(name.has_error("required"));
        assert!(name.is_pristine());
        assert!(!root.is_valid());
    }

    #[test]
    fn resolves_nested_and_indexed_paths() {
        let root = tree();
        assert!(matches!(root.resolve("contact.phone"), Ok(ControlRef::Field(_))));
        assert!(matches!(root.resolve("addresses.1"), Ok(ControlRef::Group(_))));
        assert!(matches!(root.resolve("addresses.1.zip"), Ok(ControlRef::Field(_))));
    }

    #[test]
    fn unresolved_paths_name_the_failing_segment() {
        let root = tree();
        assert_eq!(
            root.resolve("contact.fax").unwrap_err(),
            FormError::PathNotFound {
                path: "contact.fax".into(),
                segment: "contact.fax".into(),
            }
        );
        assert_eq!(
            root.resolve("addresses.2.zip").unwrap_err(),
            FormError::PathNotFound {
                path: "addresses.2.zip".into(),
                segment: "addresses.2".into(),
            }
        );
        assert_eq!(
            root.resolve("name.first").unwrap_err(),
            FormError::PathNotFound {
                path: "name.first".into(),
                segment: "name.first".into(),
            }
        );
        assert_eq!(
            root.resolve("a..b").unwrap_err(),
            FormError::InvalidPath("a..b".into())
        );
    }

    #[test]
    fn value_keeps_declaration_order() {
        let root = tree();
        assert_eq!(
            serde_json::to_string(&root.value()).unwrap(),
            r#"{"name":"","contact":{"phone":""},"addresses":[{"city":"","zip":""},{"city":"","zip":""}]}"#
        );
    }

    #[test]
    fn status_merge_prefers_invalid_then_pending() {
        use FieldStatus::*;
        assert_eq!(Valid.merge(Pending), Pending);
        assert_eq!(Pending.merge(Invalid), Invalid);
        assert_eq!(Valid.merge(Valid), Valid);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let schema = Schema::new().value("a", 1).value("a", 2);
        let err = Group::from_schema(schema, &mut NodeIds::default()).unwrap_err();
        assert_eq!(err.inner(), &SchemaError::DuplicateKey("a".into()));
    }

    #[test]
    fn reserved_characters_are_rejected() {
        let err = Group::from_schema(Schema::new().value("a.b", 1), &mut NodeIds::default())
            .unwrap_err();
        assert_eq!(err.inner(), &SchemaError::InvalidKey("a.b".into()));
        let err =
            Group::from_schema(Schema::new().value("", 1), &mut NodeIds::default()).unwrap_err();
        assert_eq!(err.inner(), &SchemaError::EmptyKey);
    }

    #[test]
    fn non_scalar_initial_value_is_rejected() {
        let schema = Schema::new().group("inner", Schema::new().value("tags", json!(["x"])));
        let err = Group::from_schema(schema, &mut NodeIds::default()).unwrap_err();
        assert_eq!(err.location(), "inner.tags");
        assert!(matches!(err.inner(), SchemaError::NonScalarValue(_)));
    }

    fn broken_address() -> Schema {
        Schema::new().value("zip", "").value("zip", "")
    }

    #[test]
    fn malformed_builder_is_caught_even_when_unseeded() {
        let schema =
            Schema::new().array("addresses", GroupBuilder::new("address", broken_address), 0);
        let err = Group::from_schema(schema, &mut NodeIds::default()).unwrap_err();
        assert_eq!(err.location(), "addresses[address]");

        let schema =
            Schema::new().array("addresses", GroupBuilder::new("address", broken_address), 2);
        let err = Group::from_schema(schema, &mut NodeIds::default()).unwrap_err();
        assert_eq!(err.location(), "addresses[0]");
    }

    #[test]
    fn push_and_remove_shift_indices() {
        let mut ids = NodeIds::default();
        let schema = Schema::new().array("addresses", GroupBuilder::new("address", address), 1);
        let mut root = Group::from_schema(schema, &mut ids).unwrap();
        let array = root
            .resolve_mut("addresses")
            .unwrap()
            .into_array("addresses")
            .unwrap();
        assert_eq!(array.push(&mut ids).unwrap(), 1);
        assert_eq!(array.push(&mut ids).unwrap(), 2);
        assert!(array.remove(5).is_none());
        assert!(array.remove(0).is_some());
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn node_ids_are_unique() {
        let root = tree();
        let mut seen = Vec::new();
        root.for_each_field("", &mut |_, field| seen.push(field.id()));
        let count = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), count);
        assert_eq!(count, 6);
    }

    #[test]
    fn containers_have_their_own_ids() {
        let root = tree();
        let mut fields = Vec::new();
        root.for_each_field("", &mut |_, field| fields.push(field.id()));
        let mut nodes = Vec::new();
        root.for_each_node(&mut |id| nodes.push(id));

        // root, contact, addresses and its two groups
        assert_eq!(nodes.len(), fields.len() + 5);
        assert!(fields.iter().all(|id| nodes.contains(id)));
        assert_eq!(root.resolve("").unwrap().id(), root.id());
        let addresses = root.resolve("addresses").unwrap();
        assert_eq!(addresses.into_array("addresses").unwrap().id(), addresses.id());
        nodes.sort();
        nodes.dedup();
        assert_eq!(nodes.len(), fields.len() + 5);
    }
}

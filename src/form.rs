//! The form: a control tree plus its listeners and clock.
//!
//! Every mutation goes through [`Form`], which commits the change, queues the
//! resulting [`Change`] events and delivers them to the listeners bound to the
//! affected controls. A field's events are followed by events on every group
//! and array above it, innermost first, carrying the container's snapshot.
//! Listeners receive `&mut Form`, so a listener may rewire
//! another field's validators and revalidate it. Events raised while a
//! listener runs are queued and delivered, in order, before the outermost
//! call returns.
//!
//! ```rust
//! use std::time::Duration;
//! use serde_json::json;
//! use stillform::schema::{FieldSchema, Schema};
//! use stillform::timer::ManualClock;
//! use stillform::{validator, Form, FormOptions};
//!
//! let clock = ManualClock::new();
//! let schema = Schema::new()
//!     .value("notification", "email")
//!     .value("phone", "")
//!     .field(
//!         "email",
//!         FieldSchema::new("")
//!             .validator(validator::required())
//!             .debounce(Duration::from_millis(1000)),
//!     );
//! let mut form = Form::with_options(schema, FormOptions::new().with_clock(clock.clone()))?;
//!
//! form.on_value_change("notification", |value, form| {
//!     if value == "text" {
//!         form.set_validators("phone", vec![validator::required()])?;
//!     } else {
//!         form.clear_validators("phone")?;
//!     }
//!     form.update_value_and_validity("phone")
//! })?;
//!
//! form.set_value("notification", json!("text"))?;
//! assert!(!form.field("phone")?.is_valid());
//!
//! form.set_value("email", json!("a@b.io"))?;
//! assert!(form.field("email")?.is_pending());
//! clock.advance(Duration::from_millis(1000));
//! assert_eq!(form.run_due_timers(), 1);
//! assert!(form.field("email")?.is_valid());
//! # Ok::<(), stillform::FormError>(())
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use crate::control::{
    join_path, ControlRef, FieldControl, FieldStatus, Group, GroupArray, NodeId, NodeIds,
};
use crate::error::{FormError, FormResult};
use crate::messages::MessageTable;
use crate::options::FormOptions;
use crate::schema::Schema;
use crate::timer::Clock;
use crate::validator::Validator;
use crate::value::{is_scalar, Value};
use crate::{ErrorSet, Validation};

/// What happened to a control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// The value was set, patched, reset or re-emitted by revalidation. For
    /// a group or array this is its snapshot after the change.
    ValueChanged(Value),
    /// The control was evaluated or entered its debounce window.
    StatusChanged {
        /// Status after the change.
        status: FieldStatus,
        /// Failing kinds from the last completed evaluation. Always `None`
        /// for groups and arrays.
        errors: Option<ErrorSet>,
    },
}

/// An event together with the path of the control it concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Path of the control at the time of the change; empty for the root.
    pub path: String,
    /// The event.
    pub event: FieldEvent,
}

/// Handle returned by [`Form::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    node: NodeId,
}

impl Subscription {
    /// Identity of the control this subscription listens to.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// A failing field and its error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path of the failing field.
    pub path: String,
    /// What failed.
    pub errors: ErrorSet,
}

type Listener = Rc<RefCell<dyn FnMut(&Change, &mut Form)>>;

struct Registration {
    subscription: Subscription,
    listener: Listener,
}

/// A live form built from a [`Schema`].
pub struct Form {
    root: Group,
    ids: NodeIds,
    clock: Rc<dyn Clock>,
    listeners: Vec<Registration>,
    next_subscription: u64,
    queue: VecDeque<(NodeId, Change)>,
    dispatching: bool,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("root", &self.root)
            .field("clock", &self.clock)
            .field("listeners", &self.listeners.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl Form {
    /// Build a form using the system clock.
    pub fn new(schema: Schema) -> FormResult<Form> {
        Self::with_options(schema, FormOptions::default())
    }

    /// Build a form with explicit options.
    pub fn with_options(schema: Schema, options: FormOptions) -> FormResult<Form> {
        let mut ids = NodeIds::default();
        let root = Group::from_schema(schema, &mut ids)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status = ?root.status(), "form built");

        Ok(Form {
            root,
            ids,
            clock: options.into_clock(),
            listeners: Vec::new(),
            next_subscription: 0,
            queue: VecDeque::new(),
            dispatching: false,
        })
    }

    /// The root group.
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// The control at `path`. The empty path is the root group.
    pub fn get(&self, path: &str) -> FormResult<ControlRef<'_>> {
        self.root.resolve(path)
    }

    /// The field at `path`.
    pub fn field(&self, path: &str) -> FormResult<&FieldControl> {
        self.get(path)?.into_field(path)
    }

    /// The group at `path`.
    pub fn group(&self, path: &str) -> FormResult<&Group> {
        self.get(path)?.into_group(path)
    }

    /// The group array at `path`.
    pub fn array(&self, path: &str) -> FormResult<&GroupArray> {
        self.get(path)?.into_array(path)
    }

    /// Snapshot of every value, keys in schema order.
    pub fn value(&self) -> Value {
        self.root.value()
    }

    /// Merged status of the whole form.
    pub fn status(&self) -> FieldStatus {
        self.root.status()
    }

    /// `true` when every field is valid.
    pub fn is_valid(&self) -> bool {
        self.status() == FieldStatus::Valid
    }

    /// Every field with errors from its last completed evaluation.
    pub fn errors(&self) -> Vec<FieldError> {
        let mut failing = Vec::new();
        self.root.for_each_field("", &mut |path, field| {
            if let Some(errors) = field.errors() {
                failing.push(FieldError {
                    path: path.to_string(),
                    errors: errors.clone(),
                });
            }
        });
        failing
    }

    /// Messages for the field at `path`, projected through `table`.
    pub fn message(&self, path: &str, table: &MessageTable) -> FormResult<String> {
        Ok(table.project(self.field(path)?.errors()))
    }

    /// Earliest outstanding debounce deadline, on the form's clock.
    pub fn next_deadline(&self) -> Option<Duration> {
        let mut earliest: Option<Duration> = None;
        self.root.for_each_field("", &mut |_, field| {
            if let Some(deadline) = field.pending_deadline() {
                earliest = Some(earliest.map_or(deadline, |e| e.min(deadline)));
            }
        });
        earliest
    }

    /// Current time on the form's clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Set one field's value and validate it (or start its debounce window).
    ///
    /// Objects and arrays are rejected with [`FormError::InvalidPatch`].
    pub fn set_value(&mut self, path: &str, value: Value) -> FormResult<()> {
        if !is_scalar(&value) {
            return Err(FormError::InvalidPatch {
                path: path.to_string(),
                expected: "a scalar value",
            });
        }
        self.commit(path, value)?;
        self.enqueue_containers(&[parent_of(path)], true);
        self.dispatch();
        Ok(())
    }

    /// Merge a partial object into the whole form.
    ///
    /// Unknown keys are ignored and unspecified fields keep their values.
    /// Array elements are patched by index, for existing groups only. A
    /// patch whose shape does not fit is rejected before anything changes.
    pub fn patch_value(&mut self, patch: &Value) -> FormResult<()> {
        let mut writes = Vec::new();
        collect_patch(ControlRef::Group(&self.root), "", patch, &mut writes)?;
        self.apply_writes(writes)
    }

    /// Merge a partial value into the control at `path`.
    pub fn patch_value_at(&mut self, path: &str, patch: &Value) -> FormResult<()> {
        let mut writes = Vec::new();
        collect_patch(self.root.resolve(path)?, path, patch, &mut writes)?;
        self.apply_writes(writes)
    }

    fn apply_writes(&mut self, writes: Vec<(String, Value)>) -> FormResult<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(fields = writes.len(), "applying patch");

        let parents: Vec<String> = writes
            .iter()
            .map(|(path, _)| parent_of(path).to_string())
            .collect();
        for (path, value) in writes {
            self.commit(&path, value)?;
        }
        self.enqueue_containers(&parents, true);
        self.dispatch();
        Ok(())
    }

    fn commit(&mut self, path: &str, value: Value) -> FormResult<()> {
        let now = self.clock.now();
        let field = self.root.resolve_mut(path)?.into_field(path)?;
        let status = field.commit(value.clone(), now);

        #[cfg(feature = "tracing")]
        match field.pending_deadline() {
            Some(deadline) => tracing::debug!(path, ?deadline, "debounce timer armed"),
            None => tracing::debug!(path, ?status, "field evaluated"),
        }

        let node = field.id();
        let errors = field.errors().cloned();
        self.enqueue(node, path, FieldEvent::ValueChanged(value));
        self.enqueue(node, path, FieldEvent::StatusChanged { status, errors });
        Ok(())
    }

    /// Replace a field's validators. Takes effect on the next evaluation.
    pub fn set_validators(&mut self, path: &str, validators: Vec<Validator>) -> FormResult<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(path, count = validators.len(), "validators replaced");

        self.field_mut(path)?.set_validators(validators);
        Ok(())
    }

    /// Remove every validator from a field. Takes effect on the next evaluation.
    pub fn clear_validators(&mut self, path: &str) -> FormResult<()> {
        self.set_validators(path, Vec::new())
    }

    /// Append a validator to a field. Takes effect on the next evaluation.
    pub fn add_validator(&mut self, path: &str, validator: Validator) -> FormResult<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(path, validator = validator.name(), "validator added");

        self.field_mut(path)?.add_validator(validator);
        Ok(())
    }

    /// Change or remove a field's debounce delay.
    ///
    /// Removing the delay from a pending field evaluates it right away. A new
    /// delay applies from the next change and leaves an armed timer alone.
    pub fn set_debounce(&mut self, path: &str, debounce: Option<Duration>) -> FormResult<()> {
        let field = self.field_mut(path)?;
        field.set_debounce(debounce);
        if debounce.is_none() && field.is_pending() {
            let node = field.id();
            self.settle(|field| field.id() == node);
        }
        Ok(())
    }

    /// Evaluate a field now, cancelling any pending debounce, and re-emit
    /// its value and status.
    pub fn update_value_and_validity(&mut self, path: &str) -> FormResult<()> {
        let field = self.field_mut(path)?;
        let status = field.evaluate();

        #[cfg(feature = "tracing")]
        tracing::debug!(path, ?status, "field revalidated");

        let node = field.id();
        let value = field.value().clone();
        let errors = field.errors().cloned();
        self.enqueue(node, path, FieldEvent::ValueChanged(value));
        self.enqueue(node, path, FieldEvent::StatusChanged { status, errors });
        self.enqueue_containers(&[parent_of(path)], true);
        self.dispatch();
        Ok(())
    }

    /// Mark a field as touched.
    pub fn mark_touched(&mut self, path: &str) -> FormResult<()> {
        self.field_mut(path)?.mark_touched();
        Ok(())
    }

    fn field_mut(&mut self, path: &str) -> FormResult<&mut FieldControl> {
        self.root.resolve_mut(path)?.into_field(path)
    }

    /// Evaluate every debounced field whose deadline has passed.
    ///
    /// Returns how many fields were evaluated.
    pub fn run_due_timers(&mut self) -> usize {
        let now = self.clock.now();
        let fired = self.settle(|field| field.fire_if_due(now));

        #[cfg(feature = "tracing")]
        if fired > 0 {
            tracing::debug!(fired, ?now, "debounce timers fired");
        }

        fired
    }

    /// Evaluate every field with an outstanding debounce right away.
    pub fn flush_pending(&mut self) -> usize {
        self.settle(|field| field.pending_deadline().is_some())
    }

    fn settle(&mut self, mut due: impl FnMut(&mut FieldControl) -> bool) -> usize {
        let mut settled = Vec::new();
        self.root.for_each_field_mut("", &mut |path, field| {
            if due(field) {
                let status = field.evaluate();
                let errors = field.errors().cloned();
                settled.push((field.id(), path.to_string(), status, errors));
            }
        });
        let count = settled.len();
        let parents: Vec<String> = settled
            .iter()
            .map(|(_, path, ..)| parent_of(path).to_string())
            .collect();
        for (node, path, status, errors) in settled {
            self.enqueue(node, &path, FieldEvent::StatusChanged { status, errors });
        }
        self.enqueue_containers(&parents, false);
        self.dispatch();
        count
    }

    /// Append a freshly built group to the array at `path`.
    ///
    /// Returns the new group's index.
    pub fn push(&mut self, path: &str) -> FormResult<usize> {
        let array = self.root.resolve_mut(path)?.into_array(path)?;
        let index = array.push(&mut self.ids)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path, index, "group pushed");

        self.enqueue_containers(&[path], true);
        self.dispatch();
        Ok(index)
    }

    /// Remove the group at `index` from the array at `path`.
    ///
    /// Later groups shift down by one. Listeners bound to the removed group
    /// or anything inside it are dropped.
    pub fn remove_at(&mut self, path: &str, index: usize) -> FormResult<()> {
        let array = self.root.resolve_mut(path)?.into_array(path)?;
        let len = array.len();
        let removed = array
            .remove(index)
            .ok_or_else(|| FormError::IndexOutOfBounds {
                path: path.to_string(),
                index,
                len,
            })?;

        let mut gone = Vec::new();
        removed.for_each_node(&mut |id| gone.push(id));
        self.listeners
            .retain(|r| !gone.contains(&r.subscription.node));

        #[cfg(feature = "tracing")]
        tracing::debug!(path, index, "group removed");

        self.enqueue_containers(&[path], true);
        self.dispatch();
        Ok(())
    }

    /// Flush pending validation and return the snapshot, or every failing
    /// field.
    pub fn submit(&mut self) -> Validation<Value, Vec<FieldError>> {
        self.flush_pending();
        let mut checks = Vec::new();
        self.root.for_each_field("", &mut |path, field| {
            let errors = field.errors().map(|errors| {
                vec![FieldError {
                    path: path.to_string(),
                    errors: errors.clone(),
                }]
            });
            checks.push(Validation::from_errors((), errors));
        });
        Validation::all_vec(checks).map(|_| self.root.value())
    }

    /// Return every field to its initial value, pristine and untouched.
    ///
    /// Pending debounce windows are cancelled.
    pub fn reset(&mut self) {
        let mut events = Vec::new();
        self.root.for_each_field_mut("", &mut |path, field| {
            let status = field.reset();
            events.push((
                field.id(),
                path.to_string(),
                field.value().clone(),
                status,
                field.errors().cloned(),
            ));
        });
        let parents: Vec<String> = events
            .iter()
            .map(|(_, path, ..)| parent_of(path).to_string())
            .collect();
        for (node, path, value, status, errors) in events {
            self.enqueue(node, &path, FieldEvent::ValueChanged(value));
            self.enqueue(node, &path, FieldEvent::StatusChanged { status, errors });
        }
        self.enqueue_containers(&parents, true);

        #[cfg(feature = "tracing")]
        tracing::debug!("form reset");

        self.dispatch();
    }

    /// Listen to every change of the control at `path`.
    ///
    /// Any field, group or array may be observed; the empty path is the root.
    /// Listeners are called in registration order and stay bound to the
    /// control itself, so a group that moves within an array keeps them.
    pub fn subscribe<F>(&mut self, path: &str, listener: F) -> FormResult<Subscription>
    where
        F: FnMut(&Change, &mut Form) + 'static,
    {
        let node = self.get(path)?.id();
        self.next_subscription += 1;
        let subscription = Subscription {
            id: self.next_subscription,
            node,
        };
        self.listeners.push(Registration {
            subscription,
            listener: Rc::new(RefCell::new(listener)),
        });
        Ok(subscription)
    }

    /// Listen to value changes only.
    ///
    /// Errors returned by the callback are logged and otherwise dropped.
    pub fn on_value_change<F>(&mut self, path: &str, mut f: F) -> FormResult<Subscription>
    where
        F: FnMut(&Value, &mut Form) -> FormResult<()> + 'static,
    {
        self.subscribe(path, move |change, form| {
            if let FieldEvent::ValueChanged(value) = &change.event {
                report(&change.path, f(value, form));
            }
        })
    }

    /// Listen to status changes only.
    pub fn on_status_change<F>(&mut self, path: &str, mut f: F) -> FormResult<Subscription>
    where
        F: FnMut(FieldStatus, Option<&ErrorSet>, &mut Form) + 'static,
    {
        self.subscribe(path, move |change, form| {
            if let FieldEvent::StatusChanged { status, errors } = &change.event {
                f(*status, errors.as_ref(), form);
            }
        })
    }

    /// Stop a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|r| r.subscription != subscription);
        self.listeners.len() != before
    }

    fn enqueue(&mut self, node: NodeId, path: &str, event: FieldEvent) {
        self.queue.push_back((
            node,
            Change {
                path: path.to_string(),
                event,
            },
        ));
    }

    /// Queue events for each container in `starts` and every container
    /// above it, deepest first and each container once. Snapshots are taken
    /// only for containers someone listens to.
    fn enqueue_containers<S: AsRef<str>>(&mut self, starts: &[S], value_changed: bool) {
        let mut paths: Vec<String> = Vec::new();
        for start in starts {
            let mut path = start.as_ref();
            loop {
                if !paths.iter().any(|seen| seen == path) {
                    paths.push(path.to_string());
                }
                if path.is_empty() {
                    break;
                }
                path = parent_of(path);
            }
        }
        paths.sort_by_key(|path| std::cmp::Reverse(depth(path)));

        let mut events = Vec::new();
        for path in paths {
            let Ok(control) = self.root.resolve(&path) else {
                continue;
            };
            let node = control.id();
            if !self.listeners.iter().any(|r| r.subscription.node == node) {
                continue;
            }
            let value = value_changed.then(|| control.value());
            events.push((node, path, value, control.status()));
        }
        for (node, path, value, status) in events {
            if let Some(value) = value {
                self.enqueue(node, &path, FieldEvent::ValueChanged(value));
            }
            self.enqueue(node, &path, FieldEvent::StatusChanged { status, errors: None });
        }
    }

    fn dispatch(&mut self) {
        if self.dispatching {
            return;
        }
        self.dispatching = true;
        while let Some((node, change)) = self.queue.pop_front() {
            let targets: Vec<(Subscription, Listener)> = self
                .listeners
                .iter()
                .filter(|r| r.subscription.node == node)
                .map(|r| (r.subscription, Rc::clone(&r.listener)))
                .collect();
            for (subscription, listener) in targets {
                // An earlier listener may have unsubscribed this one.
                if !self.listeners.iter().any(|r| r.subscription == subscription) {
                    continue;
                }
                if let Ok(mut listener) = listener.try_borrow_mut() {
                    (&mut *listener)(&change, self);
                }
            }
        }
        self.dispatching = false;
    }
}

fn report(path: &str, result: FormResult<()>) {
    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        tracing::warn!(path, %err, "listener failed");
    }
    #[cfg(not(feature = "tracing"))]
    let _ = (path, result);
}

/// Walk `patch` against the tree, collecting leaf writes without mutating.
fn collect_patch(
    control: ControlRef<'_>,
    path: &str,
    patch: &Value,
    writes: &mut Vec<(String, Value)>,
) -> FormResult<()> {
    let mismatch = |expected| FormError::InvalidPatch {
        path: path.to_string(),
        expected,
    };
    match control {
        ControlRef::Field(_) => {
            if !is_scalar(patch) {
                return Err(mismatch("a scalar value"));
            }
            writes.push((path.to_string(), patch.clone()));
        }
        ControlRef::Group(group) => {
            let object = patch.as_object().ok_or_else(|| mismatch("an object"))?;
            for (key, child) in object {
                if let Some(control) = group.get(key) {
                    collect_patch(control, &join_path(path, key), child, writes)?;
                }
            }
        }
        ControlRef::Array(array) => {
            let items = patch.as_array().ok_or_else(|| mismatch("an array"))?;
            for (index, (group, child)) in array.iter().zip(items).enumerate() {
                let child_path = join_path(path, &index.to_string());
                collect_patch(ControlRef::Group(group), &child_path, child, writes)?;
            }
        }
    }
    Ok(())
}

/// Path of the group or array that directly holds `path`.
fn parent_of(path: &str) -> &str {
    path.rfind('.').map_or("", |at| &path[..at])
}

fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.matches('.').count() + 1
    }
}

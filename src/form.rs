//! The form state controller.
//!
//! A [`FormState`] is the single source of truth for what the user has
//! entered into one form and whether it may be submitted. Observers
//! registered with [`FormState::subscribe`] are called synchronously
//! after every change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::clock::Clock;
use crate::errors::FormError;
use crate::feedback::Feedback;
use crate::record::Record;
use crate::schema::{FieldValue, FormKind, FormSchema, ValidationContext, Violation};

/// The state of a single field.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldStatus {
    /// Never edited since the form was created or reset.
    Untouched,
    Invalid(Violation),
    Valid,
}

impl FieldStatus {
    fn from_result(result: &Result<Value, Violation>) -> Self {
        match result {
            Ok(_) => FieldStatus::Valid,
            Err(violation) => FieldStatus::Invalid(violation.clone()),
        }
    }
}

/// The state of the form as a whole.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// At least one field doesn’t pass its rules.
    Incomplete,
    /// Every field passes; the form may be submitted.
    Ready,
    /// A submission is in flight.
    Submitting,
    /// The last submission was stored and the form was cleared.
    Submitted,
    /// The last submission failed; the entered values are kept.
    Failed,
}

/// Why a submission could not start.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Refusal {
    /// Another submission of this form hasn’t settled yet.
    InFlight,
    /// These fields don’t pass their rules.
    Invalid(BTreeMap<String, Violation>),
}

/// What observers are told after each change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FormSnapshot {
    pub form: FormKind,
    pub phase: Phase,
    pub can_submit: bool,
    pub dirty: bool,
    pub errors: BTreeMap<String, String>,
    pub feedback: Feedback,
}

/// Identifies an observer so it can be removed again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&FormSnapshot) + Send + Sync>;

pub struct FormState {
    schema: Arc<FormSchema>,
    clock: Arc<dyn Clock>,
    values: Vec<FieldValue>,
    statuses: Vec<FieldStatus>,
    phase: Phase,
    dirty: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl FormState {
    pub fn new(schema: Arc<FormSchema>, clock: Arc<dyn Clock>) -> Self {
        let count = schema.fields.len();

        Self {
            schema,
            clock,
            values: vec![FieldValue::Empty; count],
            statuses: vec![FieldStatus::Untouched; count],
            phase: Phase::Incomplete,
            dirty: false,
            observers: vec![],
            next_subscription: 0,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn kind(&self) -> FormKind {
        self.schema.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether anything has been entered since creation or the last
    /// reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Stores `value` in the named field and re-checks it.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&FieldStatus, FormError> {
        let index = self
            .schema
            .position(name)
            .ok_or_else(|| FormError::UnknownField {
                name: name.to_owned(),
            })?;

        self.values[index] = value.into();
        self.dirty = true;

        // pairings can change other touched fields
        let results = self.schema.validate_all(&self.values, &self.context());

        for (i, (status, result)) in self.statuses.iter_mut().zip(results.iter()).enumerate() {
            if i == index || *status != FieldStatus::Untouched {
                *status = FieldStatus::from_result(result);
            }
        }

        if self.phase != Phase::Submitting {
            self.phase = self.settled_phase();
        }

        self.notify();

        Ok(&self.statuses[index])
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    /// Every field name with its current value, in schema order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.values.iter())
    }

    pub fn status(&self, name: &str) -> Option<&FieldStatus> {
        self.schema.position(name).map(|i| &self.statuses[i])
    }

    /// Every field name with its current status, in schema order.
    pub fn statuses(&self) -> impl Iterator<Item = (&str, &FieldStatus)> {
        self.schema
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.statuses.iter())
    }

    /// Whether every field currently passes its rules. Dates are checked
    /// against today, not the day they were entered.
    pub fn is_valid(&self) -> bool {
        self.schema
            .validate_all(&self.values, &self.context())
            .iter()
            .all(Result::is_ok)
    }

    /// Whether the submit action is available.
    pub fn can_submit(&self) -> bool {
        self.phase != Phase::Submitting && self.is_valid()
    }

    /// The messages of every touched field that fails its rules.
    pub fn errors(&self) -> BTreeMap<String, String> {
        self.statuses()
            .filter_map(|(name, status)| match status {
                FieldStatus::Invalid(violation) => Some((name.to_owned(), violation.message.clone())),
                _ => None,
            })
            .collect()
    }

    /// Clears every value and error. Doesn’t cancel a submission in
    /// flight.
    pub fn reset(&mut self) {
        self.clear();

        if self.phase != Phase::Submitting {
            self.phase = Phase::Incomplete;
        }

        self.notify();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            form: self.kind(),
            phase: self.phase,
            can_submit: self.can_submit(),
            dirty: self.dirty,
            errors: self.errors(),
            feedback: Feedback::for_phase(self.phase, &self.schema.feedback),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where F: Fn(&FormSnapshot) + Send + Sync + 'static {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));

        id
    }

    /// Removes an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);

        self.observers.len() != before
    }

    /// Freezes the current values into a record stamped with `now` and
    /// marks the form as submitting. Invalid fields are marked so their
    /// messages are shown.
    pub(crate) fn begin_submission(&mut self, now: OffsetDateTime) -> Result<Record, Refusal> {
        if self.phase == Phase::Submitting {
            return Err(Refusal::InFlight);
        }

        let results = self.schema.validate_all(&self.values, &self.context());
        let mut columns = Vec::with_capacity(self.values.len());
        let mut violations = BTreeMap::new();

        for (i, (field, result)) in self.schema.fields.iter().zip(results).enumerate() {
            self.statuses[i] = FieldStatus::from_result(&result);

            match result {
                Ok(value) => columns.push((field.column().to_owned(), value)),
                Err(violation) => {
                    violations.insert(field.name.clone(), violation);
                }
            }
        }

        if !violations.is_empty() {
            self.phase = Phase::Incomplete;
            self.notify();

            return Err(Refusal::Invalid(violations));
        }

        self.phase = Phase::Submitting;
        self.notify();

        Ok(Record::new(columns, now))
    }

    /// Settles the submission in flight: on success the form is cleared,
    /// on failure everything entered is kept.
    pub(crate) fn finish_submission(&mut self, stored: bool) {
        if stored {
            self.clear();
            self.phase = Phase::Submitted;
        } else {
            self.phase = Phase::Failed;
        }

        self.notify();
    }

    fn clear(&mut self) {
        for value in self.values.iter_mut() {
            *value = FieldValue::Empty;
        }

        for status in self.statuses.iter_mut() {
            *status = FieldStatus::Untouched;
        }

        self.dirty = false;
    }

    fn settled_phase(&self) -> Phase {
        if self.is_valid() {
            Phase::Ready
        } else {
            Phase::Incomplete
        }
    }

    fn context(&self) -> ValidationContext {
        ValidationContext::new(self.clock.today())
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();

        for (_, observer) in &self.observers {
            observer(&snapshot);
        }
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("form", &self.schema.kind)
            .field("values", &self.values)
            .field("statuses", &self.statuses)
            .field("phase", &self.phase)
            .field("dirty", &self.dirty)
            .field("observers", &self.observers.len())
            .finish()
    }
}

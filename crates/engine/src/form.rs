use formgate_rules::constraints::{FieldConstraints, rules_for};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::field::{FieldRef, FieldState};
use crate::phase::{SubmitPhase, can_transition, validate_transition};
use crate::transport::FormPayload;

/// Registration input for one field: key, optional display label, and the
/// declared constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub constraints: FieldConstraints,
}

impl FieldSpec {
    #[must_use]
    pub fn new(key: impl Into<String>, constraints: FieldConstraints) -> Self {
        Self {
            key: key.into(),
            label: None,
            constraints,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Registration input for one form. Field order is DOM order and is
/// preserved everywhere downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSpec {
    pub id: String,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl FormSpec {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// Runtime state of one registered form: its fields (in registration
/// order), the derived overall validity, and the submission phase.
#[derive(Debug)]
pub struct FormState {
    pub(crate) fields: IndexMap<String, FieldState>,
    valid: bool,
    pub(crate) phase: SubmitPhase,
}

impl FormState {
    /// Build the initial state from a spec, deriving each field's rules
    /// from its declared constraints.
    pub(crate) fn from_spec(spec: &FormSpec) -> Result<Self, EngineError> {
        let mut fields = IndexMap::with_capacity(spec.fields.len());
        for field in &spec.fields {
            let state = FieldState::register(
                FieldRef::new(&spec.id, &field.key),
                rules_for(&field.constraints),
            );
            if fields.insert(field.key.clone(), state).is_some() {
                return Err(EngineError::DuplicateField {
                    form: spec.id.clone(),
                    field: field.key.clone(),
                });
            }
        }
        Ok(Self {
            fields,
            valid: false,
            phase: SubmitPhase::Idle,
        })
    }

    /// The derived overall validity. Never independently set: always the
    /// AND of every field's validity as of the last [`recompute`](Self::recompute).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Re-derive the aggregate valid flag from current field state.
    /// Called after every field validation.
    pub(crate) fn recompute(&mut self) {
        self.valid = self.fields.values().all(|field| field.valid);
    }

    /// Return every field to its unevaluated state and drop any pending
    /// debounce timers. The aggregate flag follows the fields back to
    /// `false`.
    pub(crate) fn reset(&mut self) {
        for field in self.fields.values_mut() {
            field.clear();
        }
        self.valid = false;
    }

    /// Snapshot the current raw values in field order.
    pub(crate) fn payload(&self) -> FormPayload {
        self.fields
            .iter()
            .map(|(key, field)| (key.clone(), field.value.clone()))
            .collect()
    }

    /// Move to a new submission phase, enforcing the transition relation.
    pub(crate) fn transition(&mut self, to: SubmitPhase) -> Result<(), EngineError> {
        validate_transition(self.phase, to)?;
        self.phase = to;
        Ok(())
    }

    /// Timed return to `Idle`, guarded: only fires if the phase is still
    /// `expected` and the edge to `Idle` is legal. Returns whether the
    /// phase changed. A resubmit that moved the phase on supersedes the
    /// pending restore.
    pub(crate) fn restore_idle_from(&mut self, expected: SubmitPhase) -> bool {
        if self.phase == expected && can_transition(expected, SubmitPhase::Idle) {
            self.phase = SubmitPhase::Idle;
            true
        } else {
            false
        }
    }
}

/// Read-only view of a field for callers outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub key: String,
    pub valid: bool,
    pub message: Option<String>,
    pub value: String,
}

/// Read-only view of a form for callers outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub valid: bool,
    pub phase: SubmitPhase,
    pub fields: Vec<FieldSnapshot>,
}

impl FormState {
    pub(crate) fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            valid: self.valid,
            phase: self.phase,
            fields: self
                .fields
                .iter()
                .map(|(key, field)| FieldSnapshot {
                    key: key.clone(),
                    valid: field.valid,
                    message: field.message.clone(),
                    value: field.value.clone(),
                })
                .collect(),
        }
    }
}

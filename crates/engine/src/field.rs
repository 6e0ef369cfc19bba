use formgate_rules::evaluate::Verdict;
use formgate_rules::rule::ValidationRule;
use serde::{Deserialize, Serialize};
use tokio::task::AbortHandle;

/// Names the UI element a field is bound to.
///
/// This is a relation, never ownership: the engine only hands the ref back
/// to the [`UiSink`](crate::sink::UiSink) so the renderer can locate the
/// element. The engine itself never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    /// The owning form's identifier.
    pub form: String,
    /// The field key within the form.
    pub field: String,
}

impl FieldRef {
    #[must_use]
    pub fn new(form: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            field: field.into(),
        }
    }
}

impl std::fmt::Display for FieldRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.form, self.field)
    }
}

/// An explicit handle on a pending debounced validation.
///
/// Owned by the field it was scheduled for; dropping or cancelling the
/// handle aborts the timer task, so a superseding input event cancels the
/// pending validation simply by replacing the handle.
#[derive(Debug)]
pub struct DebounceHandle {
    handle: AbortHandle,
}

impl DebounceHandle {
    pub(crate) fn new(handle: AbortHandle) -> Self {
        Self { handle }
    }

    /// Abort the pending validation without waiting for it.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for DebounceHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runtime state of one registered field.
///
/// Mutated only by the engine in response to input/blur/submit events.
/// Lives exactly as long as its form is registered.
#[derive(Debug)]
pub struct FieldState {
    /// Which UI element this state belongs to.
    pub field_ref: FieldRef,
    /// The ordered rule sequence derived at registration time.
    pub rules: Vec<ValidationRule>,
    /// Whether the last evaluation passed. Starts `false`: an unevaluated
    /// field is never shown as valid until checked once.
    pub valid: bool,
    /// The failure message of the last evaluation, if it failed.
    pub message: Option<String>,
    /// The last value observed from the UI (raw, untrimmed).
    pub value: String,
    /// Pending debounced validation, if any.
    pub(crate) debounce: Option<DebounceHandle>,
}

impl FieldState {
    /// Create the initial state for a newly registered field.
    #[must_use]
    pub(crate) fn register(field_ref: FieldRef, rules: Vec<ValidationRule>) -> Self {
        Self {
            field_ref,
            rules,
            valid: false,
            message: None,
            value: String::new(),
            debounce: None,
        }
    }

    /// Record an evaluation result. State mutation only; the engine emits
    /// the matching visual update separately.
    pub(crate) fn apply(&mut self, verdict: &Verdict) {
        self.valid = verdict.valid;
        self.message = verdict.message.clone();
    }

    /// Return the field to its unevaluated state.
    pub(crate) fn clear(&mut self) {
        self.valid = false;
        self.message = None;
        self.value.clear();
        self.debounce = None;
    }
}

//! The owned form registry and submission controller.

use std::sync::Arc;

use formgate_rules::evaluate::{Verdict, evaluate};
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::field::{DebounceHandle, FieldRef};
use crate::form::{FieldSnapshot, FormSnapshot, FormSpec, FormState};
use crate::phase::{SubmissionOutcome, SubmitPhase};
use crate::sink::{BannerKind, UiSink};
use crate::transport::{FormPayload, Transport, TransportError};

const REJECTED_BANNER: &str = "Por favor, corrija os erros antes de enviar.";
const SUCCESS_BANNER: &str = "Formulário enviado com sucesso!";
const FAILURE_BANNER: &str = "Erro ao enviar formulário. Tente novamente.";

struct Inner {
    config: EngineConfig,
    sink: Arc<dyn UiSink>,
    forms: Mutex<IndexMap<String, FormState>>,
}

/// What a submit attempt decided under the registry lock. Sink emissions
/// and the transport call happen after the lock is released.
enum Prepared {
    Rejected {
        updates: Vec<(FieldRef, Verdict)>,
    },
    Proceed {
        payload: FormPayload,
        updates: Vec<(FieldRef, Verdict)>,
    },
}

/// The engine: an explicitly constructed, owned registry of forms plus the
/// event entry points that drive them.
///
/// Cheap to clone; all clones share one registry. There is no ambient
/// global — the embedding page constructs an engine and passes it to
/// whatever wires up its events.
///
/// Registry mutations are short critical sections; no lock is held across
/// an await point. [`input`](Self::input) and the submission timers spawn
/// tokio tasks, so those entry points must be called within a runtime.
#[derive(Clone)]
pub struct FormEngine {
    inner: Arc<Inner>,
}

impl core::fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormEngine")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl FormEngine {
    /// Create an engine with the given timing configuration and rendering
    /// collaborator.
    pub fn new(config: EngineConfig, sink: Arc<dyn UiSink>) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                sink,
                forms: Mutex::new(IndexMap::new()),
            }),
        })
    }

    /// The engine's timing configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Register a form, deriving every field's rules from its declared
    /// constraints. Field order is preserved.
    pub fn register_form(&self, spec: FormSpec) -> Result<(), EngineError> {
        let form = FormState::from_spec(&spec)?;
        let mut forms = self.inner.forms.lock();
        if forms.contains_key(&spec.id) {
            return Err(EngineError::AlreadyRegistered { form: spec.id });
        }
        debug!(form = %spec.id, fields = spec.fields.len(), "form registered");
        forms.insert(spec.id, form);
        Ok(())
    }

    /// Tear a form down. Pending debounce timers are aborted with it.
    pub fn deregister_form(&self, form_id: &str) -> Result<(), EngineError> {
        match self.inner.forms.lock().shift_remove(form_id) {
            Some(_) => {
                debug!(form = form_id, "form deregistered");
                Ok(())
            }
            None => Err(EngineError::FormNotFound {
                form: form_id.to_string(),
            }),
        }
    }

    /// A field lost focus: cache the value and validate immediately.
    pub fn blur(&self, form_id: &str, field_key: &str, value: &str) {
        if self.cache_value(form_id, field_key, value) {
            self.validate_field(form_id, field_key);
        }
    }

    /// A field's value changed: cache it and schedule a debounced
    /// validation. A new input event for the same field supersedes the
    /// pending timer. With a zero debounce the field validates right away.
    pub fn input(&self, form_id: &str, field_key: &str, value: &str) {
        if !self.cache_value(form_id, field_key, value) {
            return;
        }

        let delay = self.inner.config.debounce();
        if delay.is_zero() {
            self.validate_field(form_id, field_key);
            return;
        }

        let engine = self.clone();
        let form = form_id.to_string();
        let field = field_key.to_string();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.validate_field(&form, &field);
        });

        let mut forms = self.inner.forms.lock();
        match forms
            .get_mut(form_id)
            .and_then(|form| form.fields.get_mut(field_key))
        {
            // Replacing the previous handle aborts its timer.
            Some(state) => state.debounce = Some(DebounceHandle::new(task.abort_handle())),
            None => task.abort(),
        }
    }

    /// Evaluate a field's rules against its last observed value, record
    /// the result, re-derive the form's validity, and emit the matching
    /// visual updates.
    ///
    /// Validating an unregistered field is a defensive no-op returning a
    /// passing verdict, logged at WARN: the UI stays resilient and the
    /// miswiring stays diagnosable.
    pub fn validate_field(&self, form_id: &str, field_key: &str) -> Verdict {
        let (field_ref, verdict, form_valid) = {
            let mut forms = self.inner.forms.lock();
            let Some(form) = forms.get_mut(form_id) else {
                warn!(form = form_id, "validation requested for unregistered form");
                return Verdict::pass();
            };
            let Some(field) = form.fields.get_mut(field_key) else {
                warn!(
                    form = form_id,
                    field = field_key,
                    "validation requested for unregistered field"
                );
                return Verdict::pass();
            };

            let verdict = evaluate(&field.rules, &field.value);
            field.apply(&verdict);
            field.debounce = None;
            let field_ref = field.field_ref.clone();
            form.recompute();
            (field_ref, verdict, form.is_valid())
        };

        debug!(field = %field_ref, valid = verdict.valid, "field validated");
        self.inner
            .sink
            .field_updated(&field_ref, verdict.valid, verdict.message.as_deref());
        self.inner.sink.trigger_enabled(form_id, form_valid);
        verdict
    }

    /// Run the full submission lifecycle for a form.
    ///
    /// Every field is re-validated synchronously first — a field the user
    /// never blurred must not slip through on stale state. If anything is
    /// invalid the transport is never invoked. At most one submission per
    /// form is in flight at a time; a second trigger returns
    /// [`EngineError::SubmissionInFlight`] without touching anything.
    ///
    /// The trigger control always leaves its busy state and is re-enabled,
    /// whatever the transport does.
    pub async fn submit(
        &self,
        form_id: &str,
        transport: &dyn Transport,
    ) -> Result<SubmissionOutcome, EngineError> {
        let prepared = {
            let mut forms = self.inner.forms.lock();
            let form = forms
                .get_mut(form_id)
                .ok_or_else(|| EngineError::FormNotFound {
                    form: form_id.to_string(),
                })?;

            if form.phase.is_in_flight() {
                debug!(form = form_id, "submit ignored: submission already in flight");
                return Err(EngineError::SubmissionInFlight {
                    form: form_id.to_string(),
                });
            }
            if matches!(form.phase, SubmitPhase::Submitted | SubmitPhase::Failed) {
                // Explicit resubmit supersedes the pending banner interval.
                form.transition(SubmitPhase::Idle)?;
            }
            form.transition(SubmitPhase::Validating)?;

            let mut updates = Vec::with_capacity(form.fields.len());
            for field in form.fields.values_mut() {
                let verdict = evaluate(&field.rules, &field.value);
                field.apply(&verdict);
                field.debounce = None;
                updates.push((field.field_ref.clone(), verdict));
            }
            form.recompute();

            if form.is_valid() {
                form.transition(SubmitPhase::Submitting)?;
                Prepared::Proceed {
                    payload: form.payload(),
                    updates,
                }
            } else {
                form.transition(SubmitPhase::Idle)?;
                Prepared::Rejected { updates }
            }
        };

        match prepared {
            Prepared::Rejected { updates } => {
                self.emit_field_updates(&updates);
                self.inner.sink.trigger_enabled(form_id, false);
                self.inner.sink.banner(
                    form_id,
                    BannerKind::Error,
                    REJECTED_BANNER,
                    self.inner.config.error_banner(),
                );
                info!(form = form_id, "submission rejected: validation failed");
                Ok(SubmissionOutcome::ValidationFailed)
            }
            Prepared::Proceed { payload, updates } => {
                self.emit_field_updates(&updates);
                self.inner.sink.trigger_enabled(form_id, false);
                self.inner.sink.trigger_busy(form_id, true);
                debug!(form = form_id, fields = payload.len(), "submitting payload");

                let result = transport.send(&payload).await;

                // Guaranteed cleanup: whatever the transport did, the
                // trigger leaves its busy state and is re-enabled.
                self.inner.sink.trigger_busy(form_id, false);
                self.inner.sink.trigger_enabled(form_id, true);

                match result {
                    Ok(_ack) => {
                        self.finish_success(form_id)?;
                        Ok(SubmissionOutcome::Success)
                    }
                    Err(err) => {
                        self.finish_failure(form_id, &err)?;
                        Ok(SubmissionOutcome::TransportError)
                    }
                }
            }
        }
    }

    /// Explicitly reset a form: every field back to unevaluated, values and
    /// messages cleared, pending debounce timers aborted.
    pub fn reset(&self, form_id: &str) -> Result<(), EngineError> {
        {
            let mut forms = self.inner.forms.lock();
            let form = forms
                .get_mut(form_id)
                .ok_or_else(|| EngineError::FormNotFound {
                    form: form_id.to_string(),
                })?;

            if form.phase.is_in_flight() {
                // The in-flight controller still owns the phase and will
                // settle it; only the field state is cleared here.
                warn!(
                    form = form_id,
                    phase = %form.phase,
                    "reset requested while a submission is in flight"
                );
            } else {
                form.restore_idle_from(form.phase);
            }
            form.reset();
        }

        debug!(form = form_id, "form reset");
        self.inner.sink.form_cleared(form_id);
        self.inner.sink.trigger_enabled(form_id, false);
        Ok(())
    }

    /// Read-only view of a form.
    pub fn snapshot(&self, form_id: &str) -> Result<FormSnapshot, EngineError> {
        self.inner
            .forms
            .lock()
            .get(form_id)
            .map(FormState::snapshot)
            .ok_or_else(|| EngineError::FormNotFound {
                form: form_id.to_string(),
            })
    }

    /// Read-only view of one field.
    pub fn field_snapshot(
        &self,
        form_id: &str,
        field_key: &str,
    ) -> Result<FieldSnapshot, EngineError> {
        let snapshot = self.snapshot(form_id)?;
        snapshot
            .fields
            .into_iter()
            .find(|field| field.key == field_key)
            .ok_or_else(|| EngineError::FieldNotFound {
                form: form_id.to_string(),
                field: field_key.to_string(),
            })
    }

    /// The form's derived overall validity.
    pub fn is_form_valid(&self, form_id: &str) -> Result<bool, EngineError> {
        Ok(self.snapshot(form_id)?.valid)
    }

    /// The form's current submission phase.
    pub fn phase(&self, form_id: &str) -> Result<SubmitPhase, EngineError> {
        Ok(self.snapshot(form_id)?.phase)
    }

    /// Cache the latest observed value, cancelling any pending debounce.
    /// Returns whether the field is registered; an event for an unknown
    /// field is a defensive no-op, logged once.
    fn cache_value(&self, form_id: &str, field_key: &str, value: &str) -> bool {
        let mut forms = self.inner.forms.lock();
        let Some(field) = forms
            .get_mut(form_id)
            .and_then(|form| form.fields.get_mut(field_key))
        else {
            warn!(
                form = form_id,
                field = field_key,
                "event for unregistered field ignored"
            );
            return false;
        };
        field.value = value.to_string();
        // Dropping the handle aborts any pending debounced validation.
        field.debounce = None;
        true
    }

    fn emit_field_updates(&self, updates: &[(FieldRef, Verdict)]) {
        for (field_ref, verdict) in updates {
            self.inner
                .sink
                .field_updated(field_ref, verdict.valid, verdict.message.as_deref());
        }
    }

    fn finish_success(&self, form_id: &str) -> Result<(), EngineError> {
        {
            let mut forms = self.inner.forms.lock();
            let Some(form) = forms.get_mut(form_id) else {
                warn!(form = form_id, "form deregistered while a submission was in flight");
                return Ok(());
            };
            form.transition(SubmitPhase::Submitted)?;
        }

        info!(form = form_id, "submission acknowledged");
        self.inner.sink.banner(
            form_id,
            BannerKind::Success,
            SUCCESS_BANNER,
            self.inner.config.success_banner(),
        );

        // Post-success reset; the phase guard supersedes it if a resubmit
        // gets there first.
        let engine = self.clone();
        let form = form_id.to_string();
        let delay = self.inner.config.reset_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.reset_after_success(&form);
        });
        Ok(())
    }

    fn finish_failure(&self, form_id: &str, err: &TransportError) -> Result<(), EngineError> {
        {
            let mut forms = self.inner.forms.lock();
            let Some(form) = forms.get_mut(form_id) else {
                warn!(form = form_id, "form deregistered while a submission was in flight");
                return Ok(());
            };
            form.transition(SubmitPhase::Failed)?;
        }

        warn!(form = form_id, error = %err, "submission failed in transport");
        self.inner.sink.banner(
            form_id,
            BannerKind::Error,
            FAILURE_BANNER,
            self.inner.config.error_banner(),
        );

        // The error banner interval returns the form to Idle unless a
        // resubmit gets there first.
        let engine = self.clone();
        let form = form_id.to_string();
        let delay = self.inner.config.error_banner();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.restore_idle(&form, SubmitPhase::Failed);
        });
        Ok(())
    }

    fn reset_after_success(&self, form_id: &str) {
        let cleared = {
            let mut forms = self.inner.forms.lock();
            forms.get_mut(form_id).is_some_and(|form| {
                if form.restore_idle_from(SubmitPhase::Submitted) {
                    form.reset();
                    true
                } else {
                    false
                }
            })
        };

        if cleared {
            debug!(form = form_id, "post-success reset");
            self.inner.sink.form_cleared(form_id);
            self.inner.sink.trigger_enabled(form_id, false);
        }
    }

    fn restore_idle(&self, form_id: &str, expected: SubmitPhase) {
        let restored = self
            .inner
            .forms
            .lock()
            .get_mut(form_id)
            .is_some_and(|form| form.restore_idle_from(expected));
        if restored {
            debug!(form = form_id, from = %expected, "phase restored to idle");
        }
    }
}

#[cfg(test)]
mod tests {
    use formgate_rules::constraints::{FieldConstraints, FieldKind};

    use super::*;
    use crate::form::FieldSpec;
    use crate::sink::NullSink;

    fn engine() -> FormEngine {
        FormEngine::new(EngineConfig::default(), Arc::new(NullSink)).unwrap()
    }

    fn contact_spec() -> FormSpec {
        FormSpec::new("contact")
            .with_field(FieldSpec::new(
                "name",
                FieldConstraints::default().required().with_min_length(3),
            ))
            .with_field(FieldSpec::new(
                "email",
                FieldConstraints::of_kind(FieldKind::Email).required(),
            ))
    }

    #[test]
    fn register_rejects_duplicate_form_id() {
        let engine = engine();
        engine.register_form(contact_spec()).unwrap();
        let err = engine.register_form(contact_spec()).unwrap_err();
        assert_eq!(
            err,
            EngineError::AlreadyRegistered {
                form: "contact".into()
            }
        );
    }

    #[test]
    fn deregister_unknown_form_fails_loudly() {
        let err = engine().deregister_form("ghost").unwrap_err();
        assert_eq!(err.code(), "GATE_FORM_NOT_FOUND");
    }

    #[test]
    fn blur_validates_against_cached_value() {
        let engine = engine();
        engine.register_form(contact_spec()).unwrap();

        engine.blur("contact", "email", "a@b");
        let field = engine.field_snapshot("contact", "email").unwrap();
        assert!(!field.valid);
        assert_eq!(field.message.as_deref(), Some("Digite um email válido"));
        assert_eq!(field.value, "a@b");

        engine.blur("contact", "email", "a@b.com");
        let field = engine.field_snapshot("contact", "email").unwrap();
        assert!(field.valid);
        assert!(field.message.is_none());
    }

    #[test]
    fn form_validity_is_conjunction() {
        let engine = engine();
        engine.register_form(contact_spec()).unwrap();

        engine.blur("contact", "email", "a@b.com");
        assert!(!engine.is_form_valid("contact").unwrap());

        engine.blur("contact", "name", "Maria");
        assert!(engine.is_form_valid("contact").unwrap());
    }

    #[test]
    fn validating_unknown_field_is_a_defensive_pass() {
        let engine = engine();
        engine.register_form(contact_spec()).unwrap();

        assert_eq!(engine.validate_field("ghost", "email"), Verdict::pass());
        assert_eq!(engine.validate_field("contact", "ghost"), Verdict::pass());
        // State untouched by the no-ops.
        assert!(!engine.is_form_valid("contact").unwrap());
    }

    #[test]
    fn field_snapshot_unknown_field_errors() {
        let engine = engine();
        engine.register_form(contact_spec()).unwrap();
        let err = engine.field_snapshot("contact", "ghost").unwrap_err();
        assert_eq!(err.code(), "GATE_FIELD_NOT_FOUND");
    }

    #[test]
    fn explicit_reset_returns_fields_to_unevaluated() {
        let engine = engine();
        engine.register_form(contact_spec()).unwrap();
        engine.blur("contact", "name", "Maria");
        engine.blur("contact", "email", "a@b.com");
        assert!(engine.is_form_valid("contact").unwrap());

        engine.reset("contact").unwrap();
        let snapshot = engine.snapshot("contact").unwrap();
        assert!(!snapshot.valid);
        assert_eq!(snapshot.phase, SubmitPhase::Idle);
        for field in &snapshot.fields {
            assert!(!field.valid);
            assert!(field.value.is_empty());
            assert!(field.message.is_none());
        }
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = EngineConfig {
            error_banner_ms: 0,
            ..EngineConfig::default()
        };
        let err = FormEngine::new(config, Arc::new(NullSink)).unwrap_err();
        assert_eq!(err.code(), "GATE_INVALID_CONFIG");
    }
}

use crate::phase::SubmitPhase;

/// Error type for engine operations.
///
/// These are programmer errors in the taxonomy: a rule failing on user
/// input is never an `Err` (it is a [`Verdict`](formgate_rules::evaluate::Verdict)
/// value), and a transport failure is converted to a
/// [`SubmissionOutcome`](crate::phase::SubmissionOutcome) at the controller
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No form with the given identifier is registered.
    #[error("form not found: `{form}`")]
    FormNotFound { form: String },

    /// A form with the given identifier is already registered.
    #[error("form already registered: `{form}`")]
    AlreadyRegistered { form: String },

    /// A form spec declared the same field key twice.
    #[error("duplicate field `{field}` in form `{form}`")]
    DuplicateField { form: String, field: String },

    /// The named field is not registered on the form.
    #[error("field `{field}` not found in form `{form}`")]
    FieldNotFound { form: String, field: String },

    /// A submission for this form is already in flight.
    #[error("submission already in flight for form `{form}`")]
    SubmissionInFlight { form: String },

    /// The requested phase change is not in the transition relation.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: SubmitPhase, to: SubmitPhase },

    /// The engine configuration failed validation.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl EngineError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::FormNotFound { .. } | Self::FieldNotFound { .. } => "lookup",
            Self::AlreadyRegistered { .. } | Self::DuplicateField { .. } => "registration",
            Self::SubmissionInFlight { .. } | Self::InvalidTransition { .. } => "lifecycle",
            Self::InvalidConfig { .. } => "config",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::FormNotFound { .. } => "GATE_FORM_NOT_FOUND",
            Self::AlreadyRegistered { .. } => "GATE_ALREADY_REGISTERED",
            Self::DuplicateField { .. } => "GATE_DUPLICATE_FIELD",
            Self::FieldNotFound { .. } => "GATE_FIELD_NOT_FOUND",
            Self::SubmissionInFlight { .. } => "GATE_SUBMIT_IN_FLIGHT",
            Self::InvalidTransition { .. } => "GATE_INVALID_TRANSITION",
            Self::InvalidConfig { .. } => "GATE_INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = EngineError::FormNotFound {
            form: "contact".into(),
        };
        assert_eq!(err.to_string(), "form not found: `contact`");

        let err = EngineError::DuplicateField {
            form: "contact".into(),
            field: "email".into(),
        };
        assert_eq!(err.to_string(), "duplicate field `email` in form `contact`");

        let err = EngineError::InvalidTransition {
            from: SubmitPhase::Idle,
            to: SubmitPhase::Submitted,
        };
        assert_eq!(err.to_string(), "invalid transition: idle -> submitted");
    }

    #[test]
    fn codes_are_unique_per_variant() {
        let errors = [
            EngineError::FormNotFound { form: String::new() },
            EngineError::AlreadyRegistered { form: String::new() },
            EngineError::DuplicateField {
                form: String::new(),
                field: String::new(),
            },
            EngineError::FieldNotFound {
                form: String::new(),
                field: String::new(),
            },
            EngineError::SubmissionInFlight { form: String::new() },
            EngineError::InvalidTransition {
                from: SubmitPhase::Idle,
                to: SubmitPhase::Idle,
            },
            EngineError::InvalidConfig {
                reason: String::new(),
            },
        ];

        let codes: Vec<&str> = errors.iter().map(EngineError::code).collect();
        for code in &codes {
            assert!(code.starts_with("GATE_"), "bad prefix: {code}");
        }

        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len(), "codes should be unique");
    }

    #[test]
    fn categories_are_consistent() {
        assert_eq!(
            EngineError::FormNotFound { form: String::new() }.category(),
            "lookup"
        );
        assert_eq!(
            EngineError::AlreadyRegistered { form: String::new() }.category(),
            "registration"
        );
        assert_eq!(
            EngineError::SubmissionInFlight { form: String::new() }.category(),
            "lifecycle"
        );
        assert_eq!(
            EngineError::InvalidConfig {
                reason: String::new()
            }
            .category(),
            "config"
        );
    }
}

//! Submission lifecycle: phase tracking and the closed transition relation.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Where a form currently is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    /// No submission attempt in progress.
    Idle,
    /// Synchronously re-validating every field ahead of a submit.
    Validating,
    /// The transport call is in flight.
    Submitting,
    /// The transport resolved; the success banner is displayed and a reset
    /// is scheduled.
    Submitted,
    /// The transport failed; the error banner is displayed.
    Failed,
}

impl SubmitPhase {
    /// Returns `true` if a new submission may start from this phase.
    ///
    /// `Submitted` and `Failed` count: an explicit resubmit supersedes the
    /// pending banner interval and takes the legal edge back to `Idle`.
    #[must_use]
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Submitted | Self::Failed)
    }

    /// Returns `true` if a submission attempt is actively in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }
}

impl std::fmt::Display for SubmitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Validating => write!(f, "validating"),
            Self::Submitting => write!(f, "submitting"),
            Self::Submitted => write!(f, "submitted"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Returns `true` if the phase transition from `from` to `to` is valid.
#[must_use]
pub fn can_transition(from: SubmitPhase, to: SubmitPhase) -> bool {
    matches!(
        (from, to),
        (SubmitPhase::Idle, SubmitPhase::Validating)
            | (SubmitPhase::Validating, SubmitPhase::Idle)
            | (SubmitPhase::Validating, SubmitPhase::Submitting)
            | (SubmitPhase::Submitting, SubmitPhase::Submitted)
            | (SubmitPhase::Submitting, SubmitPhase::Failed)
            | (SubmitPhase::Submitted, SubmitPhase::Idle)
            | (SubmitPhase::Failed, SubmitPhase::Idle)
    )
}

/// Validate a phase transition, returning an error if invalid.
pub fn validate_transition(from: SubmitPhase, to: SubmitPhase) -> Result<(), EngineError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition { from, to })
    }
}

/// How a completed submission attempt ended.
///
/// Transient return value of the submission controller; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Every field was valid and the transport acknowledged the payload.
    Success,
    /// At least one field was invalid; the transport was never invoked.
    ValidationFailed,
    /// The transport call failed; retryable by resubmitting.
    TransportError,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SubmitPhase::Idle, SubmitPhase::Validating, true)]
    #[case(SubmitPhase::Validating, SubmitPhase::Idle, true)]
    #[case(SubmitPhase::Validating, SubmitPhase::Submitting, true)]
    #[case(SubmitPhase::Submitting, SubmitPhase::Submitted, true)]
    #[case(SubmitPhase::Submitting, SubmitPhase::Failed, true)]
    #[case(SubmitPhase::Submitted, SubmitPhase::Idle, true)]
    #[case(SubmitPhase::Failed, SubmitPhase::Idle, true)]
    #[case(SubmitPhase::Idle, SubmitPhase::Submitting, false)]
    #[case(SubmitPhase::Idle, SubmitPhase::Submitted, false)]
    #[case(SubmitPhase::Idle, SubmitPhase::Idle, false)]
    #[case(SubmitPhase::Submitting, SubmitPhase::Idle, false)]
    #[case(SubmitPhase::Submitted, SubmitPhase::Submitting, false)]
    #[case(SubmitPhase::Failed, SubmitPhase::Submitting, false)]
    #[case(SubmitPhase::Submitted, SubmitPhase::Failed, false)]
    fn transition_relation(
        #[case] from: SubmitPhase,
        #[case] to: SubmitPhase,
        #[case] legal: bool,
    ) {
        assert_eq!(can_transition(from, to), legal, "{from} -> {to}");
        assert_eq!(validate_transition(from, to).is_ok(), legal);
    }

    #[test]
    fn invalid_transition_error_carries_both_phases() {
        let err = validate_transition(SubmitPhase::Idle, SubmitPhase::Submitted).unwrap_err();
        assert_eq!(err.to_string(), "invalid transition: idle -> submitted");
    }

    #[test]
    fn submit_acceptance() {
        assert!(SubmitPhase::Idle.accepts_submit());
        assert!(SubmitPhase::Submitted.accepts_submit());
        assert!(SubmitPhase::Failed.accepts_submit());
        assert!(!SubmitPhase::Validating.accepts_submit());
        assert!(!SubmitPhase::Submitting.accepts_submit());
    }

    #[test]
    fn in_flight_phases() {
        assert!(SubmitPhase::Validating.is_in_flight());
        assert!(SubmitPhase::Submitting.is_in_flight());
        assert!(!SubmitPhase::Idle.is_in_flight());
        assert!(!SubmitPhase::Submitted.is_in_flight());
        assert!(!SubmitPhase::Failed.is_in_flight());
    }

    #[test]
    fn display_formatting() {
        assert_eq!(SubmitPhase::Idle.to_string(), "idle");
        assert_eq!(SubmitPhase::Validating.to_string(), "validating");
        assert_eq!(SubmitPhase::Submitting.to_string(), "submitting");
        assert_eq!(SubmitPhase::Submitted.to_string(), "submitted");
        assert_eq!(SubmitPhase::Failed.to_string(), "failed");
    }
}

//! Rule evaluation: first-error-wins over an ordered rule sequence.

use std::sync::LazyLock;

use crate::rule::ValidationRule;

static EMAIL_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap());

/// The result of evaluating one field's rules against a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether every rule passed.
    pub valid: bool,
    /// The failure message of the first rule that rejected the value.
    /// `None` iff `valid`.
    pub message: Option<String>,
}

impl Verdict {
    /// A passing verdict.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing verdict with the rejecting rule's message.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Evaluates `rules` in declared order against `raw`, short-circuiting at
/// the first failing rule and returning its message.
///
/// The value is trimmed before any rule sees it. An empty rule sequence
/// always passes. Every rule except `Required` passes on an empty trimmed
/// value: emptiness is solely `Required`'s concern, so an optional email
/// field left blank is valid.
///
/// Numeric bounds are only enforced when the value parses as `f64`; a
/// non-numeric value on a numeric rule passes through. Deliberate
/// lenience: a bound never rejects a value it cannot interpret, and
/// pairing with `Required` is what enforces presence.
#[must_use]
pub fn evaluate(rules: &[ValidationRule], raw: &str) -> Verdict {
    let value = raw.trim();

    for rule in rules {
        let passed = match rule {
            ValidationRule::Required { .. } => !value.is_empty(),
            ValidationRule::EmailFormat { .. } => {
                value.is_empty() || EMAIL_REGEX.is_match(value)
            }
            ValidationRule::PhoneFormat { .. } => {
                let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                value.is_empty() || PHONE_REGEX.is_match(&compact)
            }
            // An unparseable value passes numeric bounds (see doc above).
            ValidationRule::NumericMin { value: min, .. } => {
                value.parse::<f64>().map_or(true, |n| n >= *min)
            }
            ValidationRule::NumericMax { value: max, .. } => {
                value.parse::<f64>().map_or(true, |n| n <= *max)
            }
            ValidationRule::MinLength { length, .. } => {
                value.is_empty() || value.chars().count() >= *length
            }
        };

        if !passed {
            return Verdict::fail(rule.failure_message());
        }
    }

    Verdict::pass()
}

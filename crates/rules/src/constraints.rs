use serde::{Deserialize, Serialize};

use crate::rule::ValidationRule;

/// The declared input type of a field.
///
/// `Email` and `Phone` imply a format rule; `Number` enables the numeric
/// bound constraints. The remaining kinds carry no implicit rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Select,
    Email,
    Phone,
    Number,
}

/// Constraints declared on a field in markup or config.
///
/// Read once at registration time; there is no live-reload contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Whether the user must provide a value.
    #[serde(default)]
    pub required: bool,

    /// The declared input type.
    #[serde(default)]
    pub kind: FieldKind,

    /// Numeric lower bound (inclusive). Only meaningful for `Number` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Numeric upper bound (inclusive). Only meaningful for `Number` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Minimum required character count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

impl FieldConstraints {
    /// Unconstrained field of the given kind.
    #[must_use]
    pub fn of_kind(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Mark the field as required.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the numeric lower bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the numeric upper bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the minimum character count.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}

/// Derives the ordered rule sequence for a field from its declared
/// constraints.
///
/// Ordering is fixed: presence first, then the kind-implied format rule,
/// then numeric bounds, then the length bound. Evaluation short-circuits at
/// the first failure, so this order decides which message the user sees.
/// An unconstrained field yields an empty sequence. Pure; no failure mode.
#[must_use]
pub fn rules_for(constraints: &FieldConstraints) -> Vec<ValidationRule> {
    let mut rules = Vec::new();

    if constraints.required {
        rules.push(ValidationRule::required());
    }

    match constraints.kind {
        FieldKind::Email => rules.push(ValidationRule::email_format()),
        FieldKind::Phone => rules.push(ValidationRule::phone_format()),
        FieldKind::Number => {
            if let Some(min) = constraints.min {
                rules.push(ValidationRule::numeric_min(min));
            }
            if let Some(max) = constraints.max {
                rules.push(ValidationRule::numeric_max(max));
            }
        }
        FieldKind::Text | FieldKind::Textarea | FieldKind::Select => {}
    }

    if let Some(length) = constraints.min_length {
        rules.push(ValidationRule::min_length(length));
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstrained_field_yields_no_rules() {
        assert!(rules_for(&FieldConstraints::default()).is_empty());
    }

    #[test]
    fn required_comes_first() {
        let constraints = FieldConstraints::of_kind(FieldKind::Email)
            .required()
            .with_min_length(5);

        let rules = rules_for(&constraints);
        assert_eq!(
            rules,
            vec![
                ValidationRule::required(),
                ValidationRule::email_format(),
                ValidationRule::min_length(5),
            ]
        );
    }

    #[test]
    fn number_kind_picks_up_bounds() {
        let constraints = FieldConstraints::of_kind(FieldKind::Number)
            .with_min(1.0)
            .with_max(120.0);

        let rules = rules_for(&constraints);
        assert_eq!(
            rules,
            vec![
                ValidationRule::numeric_min(1.0),
                ValidationRule::numeric_max(120.0),
            ]
        );
    }

    #[test]
    fn bounds_ignored_for_non_number_kinds() {
        let constraints = FieldConstraints::of_kind(FieldKind::Text)
            .with_min(1.0)
            .with_max(9.0);
        assert!(rules_for(&constraints).is_empty());
    }

    #[test]
    fn phone_kind_implies_format_rule() {
        let rules = rules_for(&FieldConstraints::of_kind(FieldKind::Phone));
        assert_eq!(rules, vec![ValidationRule::phone_format()]);
    }

    #[test]
    fn min_length_applies_to_any_kind() {
        let rules = rules_for(&FieldConstraints::of_kind(FieldKind::Textarea).with_min_length(10));
        assert_eq!(rules, vec![ValidationRule::min_length(10)]);
    }

    #[test]
    fn serde_defaults_fill_missing_fields() {
        let constraints: FieldConstraints = serde_json::from_str(r#"{"kind":"email"}"#).unwrap();
        assert_eq!(constraints.kind, FieldKind::Email);
        assert!(!constraints.required);
        assert!(constraints.min.is_none());
        assert!(constraints.min_length.is_none());
    }

    #[test]
    fn serde_round_trip() {
        let constraints = FieldConstraints::of_kind(FieldKind::Number)
            .required()
            .with_min(18.0)
            .with_max(120.0);

        let json = serde_json::to_string(&constraints).unwrap();
        let back: FieldConstraints = serde_json::from_str(&json).unwrap();
        assert_eq!(constraints, back);
    }
}

use serde::{Deserialize, Serialize};

/// A declarative validation rule bound to one field.
///
/// These are pure data descriptions of constraints; evaluation lives in
/// [`crate::evaluate`]. Every variant carries an optional message override;
/// when it is `None`, [`ValidationRule::failure_message`] falls back to the
/// built-in default for that variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValidationRule {
    /// The field must have a non-empty value.
    Required {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The value must look like an email address.
    EmailFormat {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The value must look like a phone number.
    PhoneFormat {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be >= `value`.
    NumericMin {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Numeric value must be <= `value`.
    NumericMax {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// The value must be at least `length` characters long.
    MinLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    /// Require a non-empty value.
    #[must_use]
    pub fn required() -> Self {
        Self::Required { message: None }
    }

    /// Require an email-shaped value.
    #[must_use]
    pub fn email_format() -> Self {
        Self::EmailFormat { message: None }
    }

    /// Require a phone-shaped value.
    #[must_use]
    pub fn phone_format() -> Self {
        Self::PhoneFormat { message: None }
    }

    /// Require a numeric minimum (inclusive).
    #[must_use]
    pub fn numeric_min(value: f64) -> Self {
        Self::NumericMin {
            value,
            message: None,
        }
    }

    /// Require a numeric maximum (inclusive).
    #[must_use]
    pub fn numeric_max(value: f64) -> Self {
        Self::NumericMax {
            value,
            message: None,
        }
    }

    /// Require a minimum character count.
    #[must_use]
    pub fn min_length(length: usize) -> Self {
        Self::MinLength {
            length,
            message: None,
        }
    }

    /// Replace the built-in failure message with a custom one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, custom: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::Required { message }
            | Self::EmailFormat { message }
            | Self::PhoneFormat { message }
            | Self::NumericMin { message, .. }
            | Self::NumericMax { message, .. }
            | Self::MinLength { message, .. } => message,
        };
        *slot = Some(custom.into());
        self
    }

    /// The message reported when this rule fails: the custom override if
    /// one was set, the built-in default otherwise.
    #[must_use]
    pub fn failure_message(&self) -> String {
        match self {
            Self::Required { message } => message
                .clone()
                .unwrap_or_else(|| "Este campo é obrigatório".to_string()),
            Self::EmailFormat { message } => message
                .clone()
                .unwrap_or_else(|| "Digite um email válido".to_string()),
            Self::PhoneFormat { message } => message
                .clone()
                .unwrap_or_else(|| "Digite um telefone válido".to_string()),
            Self::NumericMin { value, message } => message
                .clone()
                .unwrap_or_else(|| format!("Valor mínimo: {value}")),
            Self::NumericMax { value, message } => message
                .clone()
                .unwrap_or_else(|| format!("Valor máximo: {value}")),
            Self::MinLength { length, message } => message
                .clone()
                .unwrap_or_else(|| format!("Mínimo de {length} caracteres")),
        }
    }
}

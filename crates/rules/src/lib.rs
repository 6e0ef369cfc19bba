//! # formgate-rules
//!
//! The pure half of the formgate engine: declarative rule shapes, the
//! derivation of rules from declared field constraints, and rule
//! evaluation. No async, no I/O, no logging — everything here is a
//! deterministic function of its inputs.
//!
//! ```rust,ignore
//! use formgate_rules::prelude::*;
//!
//! let constraints = FieldConstraints::of_kind(FieldKind::Email).required();
//! let rules = rules_for(&constraints);
//! let verdict = evaluate(&rules, "user@example.com");
//! assert!(verdict.valid);
//! ```

pub mod constraints;
pub mod evaluate;
pub mod format;
pub mod rule;

pub mod prelude {
    pub use crate::constraints::{FieldConstraints, FieldKind, rules_for};
    pub use crate::evaluate::{Verdict, evaluate};
    pub use crate::format::format_phone;
    pub use crate::rule::ValidationRule;
}

//! # formgate-engine
//!
//! The stateful half of formgate: an owned registry of forms, per-field
//! validity tracking, debounced input validation, and a re-entrancy-guarded
//! async submission lifecycle.
//!
//! The engine never touches visual styling and never performs real network
//! I/O. Both concerns live behind traits implemented by the embedding page:
//! [`UiSink`](sink::UiSink) receives visual-state update requests, and
//! [`Transport`](transport::Transport) carries the submitted payload.
//!
//! ```rust,ignore
//! use formgate_engine::prelude::*;
//! use formgate_rules::prelude::*;
//!
//! let engine = FormEngine::new(EngineConfig::default(), Arc::new(NullSink))?;
//! engine.register_form(
//!     FormSpec::new("contact")
//!         .with_field(FieldSpec::new("email", FieldConstraints::of_kind(FieldKind::Email).required())),
//! )?;
//!
//! engine.blur("contact", "email", "user@example.com");
//! let outcome = engine.submit("contact", &FixedDelayTransport::default()).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod form;
pub mod phase;
pub mod sink;
pub mod transport;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::FormEngine;
    pub use crate::error::EngineError;
    pub use crate::field::{FieldRef, FieldState};
    pub use crate::form::{FieldSnapshot, FieldSpec, FormSnapshot, FormSpec};
    pub use crate::phase::{SubmissionOutcome, SubmitPhase};
    pub use crate::sink::{BannerKind, NullSink, UiSink};
    pub use crate::transport::{Ack, FixedDelayTransport, FormPayload, Transport, TransportError};
}

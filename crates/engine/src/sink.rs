use std::time::Duration;

use crate::field::FieldRef;

/// Which visual treatment a form-level banner gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Receives visual-state update requests from the engine.
///
/// Implemented by the rendering collaborator. The engine never styles
/// anything itself: every user-visible change travels through this trait.
/// Banners carry their visibility duration — the renderer owns dismissal.
///
/// All methods default to no-ops so a renderer only implements the
/// requests it cares about.
pub trait UiSink: Send + Sync {
    /// A field was evaluated: mark it valid/invalid and show or clear its
    /// message. At most one message per field at a time.
    fn field_updated(&self, field: &FieldRef, valid: bool, message: Option<&str>) {
        let _ = (field, valid, message);
    }

    /// Show a form-level banner for `visible_for`, replacing any banner
    /// currently shown for the form.
    fn banner(&self, form: &str, kind: BannerKind, message: &str, visible_for: Duration) {
        let _ = (form, kind, message, visible_for);
    }

    /// Enable or disable the form's trigger control (submit gating).
    fn trigger_enabled(&self, form: &str, enabled: bool) {
        let _ = (form, enabled);
    }

    /// Put the trigger control into or out of its busy state while a
    /// submission is in flight.
    fn trigger_busy(&self, form: &str, busy: bool) {
        let _ = (form, busy);
    }

    /// The form was reset: clear every field's visual state.
    fn form_cleared(&self, form: &str) {
        let _ = form;
    }
}

/// A sink that drops every request. Useful for headless tests and for
/// driving the engine before a renderer is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl UiSink for NullSink {}

//! Drives a contact form through its full lifecycle with a console sink.
//!
//! ```bash
//! cargo run -p formgate-engine --example contact_form
//! ```

use std::sync::Arc;
use std::time::Duration;

use formgate_engine::prelude::*;
use formgate_rules::constraints::{FieldConstraints, FieldKind};

/// Prints every visual-state request instead of styling a document.
struct ConsoleSink;

impl UiSink for ConsoleSink {
    fn field_updated(&self, field: &FieldRef, valid: bool, message: Option<&str>) {
        match message {
            Some(message) => println!("  [{field}] invalid: {message}"),
            None => println!("  [{field}] {}", if valid { "valid" } else { "unevaluated" }),
        }
    }

    fn banner(&self, form: &str, kind: BannerKind, message: &str, visible_for: Duration) {
        println!("  [{form}] {kind:?} banner for {visible_for:?}: {message}");
    }

    fn trigger_enabled(&self, form: &str, enabled: bool) {
        println!("  [{form}] submit {}", if enabled { "enabled" } else { "disabled" });
    }

    fn trigger_busy(&self, form: &str, busy: bool) {
        println!("  [{form}] submit busy: {busy}");
    }

    fn form_cleared(&self, form: &str) {
        println!("  [{form}] form cleared");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), EngineError> {
    let engine = FormEngine::new(EngineConfig::default(), Arc::new(ConsoleSink))?;

    engine.register_form(
        FormSpec::new("contact")
            .with_field(
                FieldSpec::new("name", FieldConstraints::default().required().with_min_length(3))
                    .with_label("Nome"),
            )
            .with_field(
                FieldSpec::new("email", FieldConstraints::of_kind(FieldKind::Email).required())
                    .with_label("Email"),
            )
            .with_field(
                FieldSpec::new(
                    "age",
                    FieldConstraints::of_kind(FieldKind::Number)
                        .with_min(18.0)
                        .with_max(120.0),
                )
                .with_label("Idade"),
            ),
    )?;

    println!("typing an invalid email:");
    engine.blur("contact", "email", "maria@");

    println!("\nsubmitting with an invalid field:");
    let outcome = engine.submit("contact", &FixedDelayTransport::default()).await?;
    println!("  outcome: {outcome:?}");

    println!("\nfixing the form:");
    engine.blur("contact", "name", "Maria Silva");
    engine.blur("contact", "email", "maria@example.com");
    engine.blur("contact", "age", "30");

    println!("\nsubmitting:");
    let outcome = engine.submit("contact", &FixedDelayTransport::default()).await?;
    println!("  outcome: {outcome:?}");

    // Let the post-success reset fire before exiting.
    tokio::time::sleep(engine.config().reset_delay() + Duration::from_millis(100)).await;
    Ok(())
}

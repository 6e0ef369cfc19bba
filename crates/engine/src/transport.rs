use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The raw values of a form at submit time, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload {
    fields: IndexMap<String, String>,
}

impl FormPayload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Opaque acknowledgement of a delivered payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack;

/// Error type for transport failures.
///
/// Always caught at the submission-controller boundary and converted to a
/// [`SubmissionOutcome`](crate::phase::SubmissionOutcome); it never reaches
/// the embedding page as a raw error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The destination could not be reached at all.
    #[error("transport unreachable: {reason}")]
    Unreachable { reason: String },

    /// The destination answered with a failure.
    #[error("submission rejected by remote: {reason}")]
    Rejected { reason: String },
}

impl TransportError {
    /// Whether resubmitting the same payload might succeed.
    ///
    /// Transport failures are transient in this taxonomy; both variants
    /// are retryable by resubmitting.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        true
    }
}

/// Carries a submitted payload to its destination.
///
/// Stands in for a real backend. The contract has no timeout: the call is
/// treated as always eventually resolving.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: &FormPayload) -> Result<Ack, TransportError>;
}

/// A transport stand-in that acknowledges every payload after a fixed
/// delay, with no real network I/O.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelayTransport {
    delay_ms: u64,
}

impl FixedDelayTransport {
    /// Stand-in with a custom delay.
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for FixedDelayTransport {
    fn default() -> Self {
        Self { delay_ms: 1_500 }
    }
}

#[async_trait]
impl Transport for FixedDelayTransport {
    async fn send(&self, _payload: &FormPayload) -> Result<Ack, TransportError> {
        tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        Ok(Ack)
    }
}

//! Mutation subscribers: hooks run after every successful mutation.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

/// Description of a mutation that has just been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationRecord {
    /// Module that owns the mutated state.
    pub module: String,
    /// Operation name local to the module (e.g. `addBar`).
    pub operation: String,
    /// Store-wide mutation type (e.g. `foo/addBar`).
    #[serde(rename = "type")]
    pub mutation_type: String,
    pub payload: Value,
}

/// Handle returned by [`Store::subscribe`](super::Store::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Observer notified with the mutation and the module's new state.
///
/// Subscribers observe; they cannot change state.
pub trait MutationSubscriber: Send + Sync {
    fn on_mutation(&self, record: &MutationRecord, state: &Value);
}

impl<F> MutationSubscriber for F
where
    F: Fn(&MutationRecord, &Value) + Send + Sync,
{
    fn on_mutation(&self, record: &MutationRecord, state: &Value) {
        self(record, state)
    }
}

/// A committed mutation whose subscribers have not been called yet.
pub(crate) struct PendingNotification {
    pub(crate) record: MutationRecord,
    pub(crate) state: Value,
    pub(crate) subscribers: Vec<Arc<dyn MutationSubscriber>>,
}

impl PendingNotification {
    pub(crate) fn deliver(self) {
        for subscriber in &self.subscribers {
            subscriber.on_mutation(&self.record, &self.state);
        }
    }
}

/// Logs each mutation through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutationLogger;

impl MutationSubscriber for MutationLogger {
    fn on_mutation(&self, record: &MutationRecord, state: &Value) {
        tracing::info!(
            mutation = %record.mutation_type,
            payload = %record.payload,
            state = %state,
            "Mutation committed"
        );
    }
}

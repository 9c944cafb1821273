use serde::{Deserialize, Serialize};

/// Envelope for a published event.
///
/// `sequence_number` is the revision of the publishing aggregate after the
/// event was applied, so a subscriber can tell whether it has seen every
/// change (revisions increase by exactly one per event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(aggregate_type: impl Into<String>, sequence_number: u64, payload: E) -> Self {
        Self {
            aggregate_type: aggregate_type.into(),
            sequence_number,
            payload,
        }
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}

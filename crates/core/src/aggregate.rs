//! Aggregate root trait for command/event driven state.

use crate::error::{DomainError, DomainResult};

/// Aggregate root marker + minimal interface.
///
/// The registry is a single long-lived aggregate, so there is no identifier
/// here: only a revision counter used to detect stale decisions.
pub trait AggregateRoot {
    /// Monotonically increasing revision of the aggregate's state.
    ///
    /// Incremented once per applied event.
    fn version(&self) -> u64;
}

/// Optimistic concurrency expectation: the exact version the aggregate must
/// still be at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExpectedVersion(pub u64);

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        self.0 == actual
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "state changed since the action was requested (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` validates and returns events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// Aggregates must not perform IO. Persistence and notification are the job
/// of whoever owns the aggregate.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}

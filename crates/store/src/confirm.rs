//! Two-step confirmation for destructive actions.
//!
//! A handler that needs the operator's consent returns a
//! [`PendingConfirmation`] instead of acting. The caller shows the prompt and
//! resolves it with [`RegistryStore::confirm`](crate::RegistryStore::confirm)
//! or [`RegistryStore::cancel`](crate::RegistryStore::cancel).

use rukun_core::ExpectedVersion;
use rukun_residents::DeathRecord;

use crate::registry::RegistryCommand;

/// A deferred command awaiting a yes/no answer.
///
/// It remembers the registry version it was requested at: if anything else
/// changed the registry in between (shifting indexes, for instance), the
/// confirmation is refused rather than applied to the wrong record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending confirmation does nothing until confirmed or cancelled"]
pub struct PendingConfirmation {
    prompt: String,
    command: RegistryCommand,
    expected: ExpectedVersion,
}

impl PendingConfirmation {
    pub(crate) fn new(prompt: impl Into<String>, command: RegistryCommand, version: u64) -> Self {
        Self {
            prompt: prompt.into(),
            command,
            expected: ExpectedVersion(version),
        }
    }

    /// Question to put to the operator.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub(crate) fn into_parts(self) -> (RegistryCommand, ExpectedVersion) {
        (self.command, self.expected)
    }
}

/// Outcome of registering a death.
///
/// The record is already stored. `removal` asks whether to also drop every
/// active resident carrying the same national id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathRegistration {
    pub record: DeathRecord,
    /// Active residents the removal would take out.
    pub matching_residents: usize,
    pub removal: PendingConfirmation,
}

use chrono::{DateTime, Utc};

/// A fact about something that changed in an aggregate.
///
/// Events are published after the change is stored and never edited
/// afterwards; a correction is a new event.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Dotted name, stable across releases (e.g. "registry.resident.added").
    fn event_type(&self) -> &'static str;

    /// Wall-clock time of the operator action that caused the event.
    fn occurred_at(&self) -> DateTime<Utc>;
}

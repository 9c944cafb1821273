//! Change events and the in-process bus that distributes them.
//!
//! Stores append state changes as events and publish them here; views
//! subscribe to re-render.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

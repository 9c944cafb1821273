//! `rukun-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no IO).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use error::{require_text, DomainError, DomainResult};
pub use id::TransactionId;
pub use value_object::Amount;

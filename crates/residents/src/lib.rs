//! Residents domain module (resident registry and death registry).
//!
//! Business rules for the people the association tracks, implemented purely
//! as deterministic domain logic (no IO, no storage).

pub mod death;
pub mod resident;

pub use death::{DeathRecord, parse_death_date};
pub use resident::{ResidencyStatus, Resident, ResidentCounts, recent_residents};

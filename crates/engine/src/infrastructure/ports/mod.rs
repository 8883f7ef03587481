//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Storage (character ledger, accounts)
//! - Password hashing
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::{PasswordError, RepoError};
pub use repos::*;
pub use testing::{ClockPort, PasswordHasherPort, RandomPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockPasswordHasherPort, MockRandomPort};

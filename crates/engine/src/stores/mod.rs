//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in the ledger:
//! - `ProgressStore` - active mission runs
//! - `TokenStore` - login tokens

pub mod progress;
pub mod tokens;

pub use progress::{ProgressGuard, ProgressStore};
pub use tokens::{SystemRandom, TokenStore};

//! In-memory adapters for the storage ports.

mod accounts;
mod characters;

pub use accounts::InMemoryAccountRepo;
pub use characters::InMemoryCharacterRepo;

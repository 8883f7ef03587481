//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate the ports, catalogs and stores to fulfill user stories.

pub mod auth;
pub mod character;
pub mod mission;
pub mod shop;

// Re-export main types
pub use auth::{AuthError, AuthUseCases};
pub use character::{CharacterError, CharacterUseCases};
pub use mission::{MissionError, MissionUseCases};
pub use shop::{ShopError, ShopUseCases};

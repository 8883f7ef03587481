//! MidianText Engine library.
//!
//! This crate contains all server-side code for the MidianText RPG backend.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration (accounts, characters, shop, missions)
//! - `stores/` - In-process runtime state (mission progress, login tokens)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Shared fixtures for unit and router tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;

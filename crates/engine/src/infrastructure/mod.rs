//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod memory;
pub mod password;
pub mod ports;

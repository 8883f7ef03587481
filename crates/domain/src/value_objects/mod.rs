//! Value objects - immutable types without identity.

mod character_update;

pub use character_update::{CharacterField, CharacterUpdate, FieldChange};

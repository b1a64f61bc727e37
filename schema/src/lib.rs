// Battle Tower Schema - Shared type definitions
// This crate holds the plain, serializable data shared between the battle
// engine, the catalog adapter and the persistence adapter.

// Re-export the main types
pub use catalog_data::*;
pub use creature_types::*;
pub use snapshot::*;
pub use stat_types::*;

pub mod catalog_data;
pub mod creature_types;
pub mod snapshot;
pub mod stat_types;

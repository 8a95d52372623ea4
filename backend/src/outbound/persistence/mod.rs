//! Persistence adapters implementing the driven repository ports.

pub mod memory;

pub use memory::{InMemoryStore, SeedError};

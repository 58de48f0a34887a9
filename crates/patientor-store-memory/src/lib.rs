//! In-memory backend for the Patientor patient store.
//!
//! All state lives in process memory behind a single async lock; nothing is
//! persisted. A [`Seed`] file can populate the store at startup.

mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use seed::Seed;
pub use store::MemoryStore;

#[cfg(test)]
mod tests;

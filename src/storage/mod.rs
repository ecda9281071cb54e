//! Preference storage for Tally.
//!
//! All persisted state lives in a simple string key → string value store.
//! The `PrefStore` trait is the seam between the engine and the storage
//! mechanism; `FilePrefStore` is the production implementation and
//! `MemoryPrefStore` backs tests.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FilePrefStore;
pub use memory::MemoryPrefStore;
pub use traits::PrefStore;

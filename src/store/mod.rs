//! Persistence layer — namespaced boolean preferences.

pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlPreferences;
pub use memory::MemoryPreferences;
pub use traits::PreferenceStore;

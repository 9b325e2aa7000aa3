//! Infrastructure layer for tablevote
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod candidates;
pub mod config;
pub mod logging;
pub mod membership;
pub mod store;

// Re-export commonly used types
pub use candidates::{JsonFileCandidateSource, StaticCandidateSource};
pub use config::{
    ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig, FilePreferencesConfig,
    FileSourceConfig, FileStoreConfig,
};
pub use logging::JsonlMealEventLogger;
pub use membership::InMemoryMembership;
pub use store::{InMemoryMealStore, JsonFileMealStore, StoreBackend};

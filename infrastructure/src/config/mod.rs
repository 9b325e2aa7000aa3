//! Configuration file loading for tablevote
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TABLEVOTE_` environment variables (`TABLEVOTE_STORE__BACKEND=json`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./tablevote.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/tablevote/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLoggingConfig, FileOutputConfig, FilePreferencesConfig, FileSourceConfig,
    FileStoreConfig,
};
pub use loader::ConfigLoader;

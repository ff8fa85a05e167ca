//! wvbridge configuration.
//!
//! TOML-based configuration for the webview host: widget settings, the
//! start page, session persistence and logging. All sections use serde
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wvbridge_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{:?}", config.start.url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LoggingConfig, SessionConfig, StartConfig, WebViewSection, WvConfig};

use wvbridge_common::ConfigError;

/// Load config from the platform default path, creating a default file
/// when none exists. An invalid file is logged and replaced by defaults.
pub fn load_config() -> Result<WvConfig, ConfigError> {
    toml_loader::load_default()
}

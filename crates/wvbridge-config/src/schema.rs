//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wvbridge_common::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WvConfig {
    pub webview: WebViewSection,
    pub start: StartConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Settings applied once when the embedded widget is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebViewSection {
    pub transparent: bool,
    /// Dev tools are always on in debug builds.
    pub devtools: bool,
    pub user_agent: Option<String>,
    pub clipboard: bool,
    pub autoplay: bool,
}

impl Default for WebViewSection {
    fn default() -> Self {
        Self {
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some("wvbridge/0.1".to_string()),
            clipboard: true,
            autoplay: false,
        }
    }
}

/// First page shown when no persisted session is restored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub url: Option<String>,
    pub headers: HashMap<String, String>,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            url: Some("https://example.com/".to_string()),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for persisted sessions. Defaults to the platform data dir.
    pub state_dir: Option<PathBuf>,
    /// Restore navigation history from the previous run.
    pub restore: bool,
    /// Session key used when none is given on the command line.
    pub id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            restore: true,
            id: "main".to_string(),
        }
    }
}

impl SessionConfig {
    /// The configured state directory, or `<data_local_dir>/wvbridge/sessions`.
    pub fn resolved_state_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_local_dir().ok_or_else(|| {
            ConfigError::ParseError("could not determine data directory".into())
        })?;
        Ok(base.join("wvbridge").join("sessions"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures raised by the widget bridge to the caller of a specific
/// operation. Errors reported by the widget itself never use this type;
/// they are recorded on the view state instead.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("a widget is already attached to this view state")]
    AlreadyAttached,

    #[error("navigator is already consumed by another attached widget")]
    NavigatorBusy,

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("widget creation failed: {0}")]
    WidgetCreation(String),

    #[error("navigation state restore failed: {0}")]
    Restore(String),

    #[error("session store error: {0}")]
    Session(String),
}

/// Top-level error for the host binary.
#[derive(Debug, thiserror::Error)]
pub enum WvError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("start.url has no scheme".into());
        assert_eq!(
            err.to_string(),
            "config validation error: start.url has no scheme"
        );
    }

    #[test]
    fn bridge_error_display() {
        assert_eq!(
            BridgeError::AlreadyAttached.to_string(),
            "a widget is already attached to this view state"
        );
        assert_eq!(
            BridgeError::NavigatorBusy.to_string(),
            "navigator is already consumed by another attached widget"
        );
        assert_eq!(
            BridgeError::InvalidState("no url".into()).to_string(),
            "invalid state: no url"
        );
        assert_eq!(
            BridgeError::Restore("truncated blob".into()).to_string(),
            "navigation state restore failed: truncated blob"
        );
    }

    #[test]
    fn wv_error_from_bridge() {
        let err: WvError = BridgeError::NavigatorBusy.into();
        assert!(matches!(err, WvError::Bridge(BridgeError::NavigatorBusy)));
        assert!(err.to_string().contains("navigator"));
    }

    #[test]
    fn wv_error_from_config() {
        let err: WvError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, WvError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn wv_error_other() {
        let err = WvError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}

//! Full configuration validation.

use crate::schema::WvConfig;
use wvbridge_common::{ConfigError, SessionId};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WvConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if let Some(ua) = &config.webview.user_agent {
        if ua.trim().is_empty() {
            errors.push("webview.user_agent must not be empty (omit it instead)".into());
        }
    }

    if let Some(url) = &config.start.url {
        if !has_scheme(url) {
            errors.push(format!("start.url has no scheme: {url:?}"));
        }
    }

    for name in config.start.headers.keys() {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == ':') {
            errors.push(format!("start.headers has an invalid header name: {name:?}"));
        }
    }

    if SessionId::parse(&config.session.id).is_none() {
        errors.push(format!(
            "session.id must be alphanumeric, '-' or '_': {:?}",
            config.session.id
        ));
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(format!(
            "logging.level must be one of {}: {:?}",
            LOG_LEVELS.join(", "),
            config.logging.level
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// `scheme:rest` where the scheme starts with a letter and has only
/// letters, digits, `+`, `-` or `.`.
fn has_scheme(url: &str) -> bool {
    match url.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&WvConfig::default()).is_ok());
    }

    #[test]
    fn accepts_common_schemes() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("about:blank"));
        assert!(has_scheme("file:///tmp/index.html"));
    }

    #[test]
    fn rejects_scheme_less_start_url() {
        let mut config = WvConfig::default();
        config.start.url = Some("example.com".into());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("start.url"));
    }

    #[test]
    fn rejects_empty_user_agent() {
        let mut config = WvConfig::default();
        config.webview.user_agent = Some("  ".into());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_bad_header_names() {
        let mut config = WvConfig::default();
        config
            .start
            .headers
            .insert("Bad Header".into(), "1".into());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("Bad Header"));
    }

    #[test]
    fn rejects_unsafe_session_id() {
        let mut config = WvConfig::default();
        config.session.id = "../escape".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = WvConfig::default();
        config.start.url = Some("nope".into());
        config.logging.level = "loud".into();
        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("start.url"));
        assert!(msg.contains("logging.level"));
    }
}

mod app;
mod cli;

use std::path::Path;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;
use wvbridge_common::{ConfigError, WvError};
use wvbridge_config::WvConfig;

use crate::app::{UserEvent, WvApp};

const DEFAULT_DIRECTIVE: &str = "wvbridge=info";

fn env_filter(directive: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match directive
        .parse::<Directive>()
        .or_else(|_| DEFAULT_DIRECTIVE.parse())
    {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn read_config(override_path: Option<&str>) -> wvbridge_common::Result<WvConfig> {
    let config = match override_path {
        Some(path) => {
            tracing::info!("Using config override: {path}");
            wvbridge_config::toml_loader::load_from_path(Path::new(path))?
        }
        None => wvbridge_config::load_config()?,
    };
    Ok(config)
}

fn load_config(override_path: Option<&str>) -> WvConfig {
    read_config(override_path).unwrap_or_else(|e| {
        match e {
            WvError::Config(ConfigError::FileNotFound(path)) => {
                tracing::warn!("Config file {} not found, using defaults", path.display())
            }
            e => tracing::warn!("Config load failed, using defaults: {e}"),
        }
        WvConfig::default()
    })
}

fn run(config: WvConfig, args: &cli::Args) -> wvbridge_common::Result<()> {
    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .map_err(|e| WvError::Other(format!("failed to create event loop: {e}")))?;
    let proxy = event_loop.create_proxy();
    let mut app = WvApp::new(config, args, proxy);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| WvError::Other(format!("event loop error: {e}")))
}

fn main() {
    let args = cli::parse();

    // Config loading logs through a provisional subscriber until the
    // configured level is known.
    let early = args
        .log_level
        .as_deref()
        .map(cli::log_directive)
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string());
    let config = {
        let _guard = tracing_subscriber::fmt()
            .with_env_filter(env_filter(&early))
            .set_default();
        load_config(args.config.as_deref())
    };

    let directive = args
        .log_level
        .as_deref()
        .map(cli::log_directive)
        .unwrap_or_else(|| cli::log_directive(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&directive))
        .init();

    tracing::info!("wvbridge v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config, &args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_override_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let result = read_config(missing.to_str());
        assert!(matches!(
            result,
            Err(WvError::Config(ConfigError::FileNotFound(_)))
        ));
    }

    #[test]
    fn unparsable_override_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[start\nurl =").unwrap();

        assert!(matches!(
            read_config(path.to_str()),
            Err(WvError::Config(ConfigError::ParseError(_)))
        ));
        let config = load_config(path.to_str());
        assert_eq!(config.session.id, WvConfig::default().session.id);
    }

    #[test]
    fn override_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nid = \"work\"\n").unwrap();
        assert_eq!(load_config(path.to_str()).session.id, "work");
    }
}

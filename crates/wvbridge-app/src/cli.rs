use clap::Parser;

/// wvbridge: a single-window browser host with persistent navigation state.
#[derive(Parser, Debug)]
#[command(name = "wvbridge", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level or filter directive (e.g. `debug`, `wvbridge_webview=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Open this URL instead of the configured start page.
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// Session to restore and save on exit.
    #[arg(short = 's', long)]
    pub session: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Turn a `--log-level` / `[logging] level` value into a filter directive.
/// Bare levels apply to all wvbridge crates.
pub fn log_directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("wvbridge={level}")
    }
}

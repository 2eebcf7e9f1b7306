//! Structured logging setup
//!
//! Installs a `tracing` subscriber that writes to stderr. The filter comes
//! from `CONDUIT_LOG`, then `RUST_LOG`, and otherwise from the `-v` count.
//! Colors are only used when stderr is a terminal.

use std::env;
use std::sync::Once;

use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable read before `RUST_LOG`
pub const LOG_ENV: &str = "CONDUIT_LOG";

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used for the `conduit` target when no filter variable is set
    pub level: Level,

    /// Include the module target in each line
    pub include_target: bool,

    /// Force ANSI colors on or off; `None` follows the terminal
    pub ansi: Option<bool>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            include_target: false,
            ansi: None,
        }
    }
}

impl LoggingConfig {
    /// Config for a `-v` count
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = level_for_verbosity(verbose);
        Self {
            level,
            include_target: level >= Level::DEBUG,
            ..Default::default()
        }
    }
}

/// 0 → warn, 1 → info, 2 → debug, 3+ → trace
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter directives: the first non-empty variable wins, else `conduit=<level>`
fn filter_directives(lookup: impl Fn(&str) -> Option<String>, level: Level) -> String {
    [LOG_ENV, "RUST_LOG"]
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| format!("conduit={}", level))
}

/// Install the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let directives = filter_directives(|name| env::var(name).ok(), config.level);
        let filter = EnvFilter::new(directives);
        let ansi = config
            .ansi
            .unwrap_or_else(|| std::io::stderr().is_terminal());

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_target(config.include_target)
                    .without_time(),
            )
            .try_init();
    });
}

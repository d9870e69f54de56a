//! Tracing initialization for CLI and TUI modes.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so its logs go to
//! a rolling file under `<home>/logs` instead, since stray stderr lines would
//! corrupt the alternate screen.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter when RUST_LOG is unset.
const DEFAULT_FILTER: &str = "bookverse=info";

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Initializes stderr logging for CLI commands.
///
/// Safe to call once per process; a second call is ignored.
pub fn init_cli() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Initializes file logging for the TUI.
///
/// Returns the appender guard; drop it only at process exit or buffered
/// lines are lost.
pub fn init_tui() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = crate::config::paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        // No log dir, no logs; the TUI itself must still come up.
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, "bookverse.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init();

    Some(guard)
}

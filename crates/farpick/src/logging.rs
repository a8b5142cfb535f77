use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Level used on stderr, where the picker also draws.
const STDERR_DEFAULT_LEVEL: &str = "error";
const FILE_DEFAULT_LEVEL: &str = "warn";

/// Installs the global `tracing` subscriber.
///
/// Logs are appended to `log_file` when one is given and go to stderr
/// otherwise; stdout only ever carries the selection. `RUST_LOG` overrides
/// the default level.
///
/// # Errors
/// Returns an error when `log_file` cannot be opened. Logging then falls
/// back to stderr.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let Some(log_file) = log_file else {
        init_stderr_logging();

        return Ok(());
    };

    let file = match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => file,
        Err(error) => {
            init_stderr_logging();

            return Err(error);
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(FILE_DEFAULT_LEVEL))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(STDERR_DEFAULT_LEVEL))
        .with_writer(io::stderr)
        .try_init();
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

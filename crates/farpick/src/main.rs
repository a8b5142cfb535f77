use std::process::ExitCode;

use clap::Parser;
use farpick::config::Cli;
use tracing::error;

/// Exit code for configuration and terminal failures.
const EXIT_RUN_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = farpick::logging::init_logging(cli.log_file.as_deref()) {
        error!("failed to open log file: {err}");
    }

    match farpick::runtime::launch(cli).await {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err}");

            ExitCode::from(EXIT_RUN_ERROR)
        }
    }
}

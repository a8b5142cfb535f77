//! Command-line and environment configuration for the `farpick` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::app::{DEFAULT_INITIAL_PATH, NavigatorConfig};
use crate::domain::SelectionMode;
use crate::infra::http::TransportConfig;

/// Server used when neither `--server` nor `FARPICK_SERVER` is set.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Invalid configuration detected before the picker starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid server url `{url}`: {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url `{0}` must use http or https")]
    UnsupportedServerUrl(String),
    #[error("--timeout-secs must be greater than zero")]
    ZeroTimeout,
}

/// Pick a directory or a file on a remote filesystem.
///
/// The picker is drawn on stderr; the picked directory path, or the picked
/// file's content, is written to stdout.
#[derive(Clone, Debug, Parser)]
#[command(name = "farpick", version)]
pub struct Cli {
    /// Base URL of the file-serving API.
    #[arg(long, env = "FARPICK_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// What to pick: `directory` or `file`.
    #[arg(long, default_value_t = SelectionMode::Directory)]
    pub mode: SelectionMode,

    /// Remote path shown first.
    #[arg(long, default_value = DEFAULT_INITIAL_PATH)]
    pub path: String,

    /// Abort each request after this many seconds. Waits indefinitely when
    /// unset.
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Append logs to this file instead of stderr, which the picker draws on.
    #[arg(long, env = "FARPICK_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Builds the HTTP transport settings.
    ///
    /// # Errors
    /// Returns an error when the server URL does not parse, is not an
    /// http(s) URL, or the timeout is zero.
    pub fn transport_config(&self) -> Result<TransportConfig, ConfigError> {
        let base_url =
            Url::parse(&self.server).map_err(|source| ConfigError::InvalidServerUrl {
                url: self.server.clone(),
                source,
            })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedServerUrl(self.server.clone()));
        }

        let timeout = match self.timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(seconds) => Some(Duration::from_secs(seconds)),
            None => None,
        };

        Ok(TransportConfig { base_url, timeout })
    }

    /// Builds the navigator settings.
    pub fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig::new(self.mode).with_initial_path(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pick_directory_from_home() {
        // Arrange
        let args = ["farpick", "--server", "http://files.local:9000"];

        // Act
        let cli = Cli::try_parse_from(args).expect("failed to parse args");

        // Assert
        assert_eq!(
            cli.navigator_config(),
            NavigatorConfig::new(SelectionMode::Directory)
        );
        assert_eq!(cli.navigator_config().initial_path, "~");
        assert_eq!(
            cli.transport_config().expect("invalid config"),
            TransportConfig {
                base_url: Url::parse("http://files.local:9000").expect("failed to parse url"),
                timeout: None,
            }
        );
    }

    #[test]
    fn test_parses_file_mode_path_and_timeout() {
        // Arrange
        let args = [
            "farpick",
            "--server",
            "https://files.local/api/",
            "--mode",
            "file",
            "--path",
            "/etc",
            "--timeout-secs",
            "10",
        ];

        // Act
        let cli = Cli::try_parse_from(args).expect("failed to parse args");

        // Assert
        assert_eq!(
            cli.navigator_config(),
            NavigatorConfig::new(SelectionMode::File).with_initial_path("/etc")
        );
        assert_eq!(
            cli.transport_config().expect("invalid config").timeout,
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_parses_log_file() {
        // Arrange
        let args = ["farpick", "--log-file", "/tmp/farpick.log"];

        // Act
        let cli = Cli::try_parse_from(args).expect("failed to parse args");

        // Assert
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/farpick.log")));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        // Arrange
        let args = ["farpick", "--mode", "folder"];

        // Act
        let result = Cli::try_parse_from(args);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_transport_config_rejects_non_http_scheme() {
        // Arrange
        let cli = Cli::try_parse_from(["farpick", "--server", "ftp://files.local"])
            .expect("failed to parse args");

        // Act
        let result = cli.transport_config();

        // Assert
        assert!(matches!(result, Err(ConfigError::UnsupportedServerUrl(_))));
    }

    #[test]
    fn test_transport_config_rejects_unparsable_url() {
        // Arrange
        let cli = Cli::try_parse_from(["farpick", "--server", "not a url"])
            .expect("failed to parse args");

        // Act
        let result = cli.transport_config();

        // Assert
        assert!(matches!(
            result,
            Err(ConfigError::InvalidServerUrl { .. })
        ));
    }

    #[test]
    fn test_transport_config_rejects_zero_timeout() {
        // Arrange
        let cli = Cli::try_parse_from([
            "farpick",
            "--server",
            "http://files.local",
            "--timeout-secs",
            "0",
        ])
        .expect("failed to parse args");

        // Act
        let result = cli.transport_config();

        // Assert
        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }
}

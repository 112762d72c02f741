//! Bot token resolution.
//!
//! The token is looked up in an options file first (the layout used when the
//! bot runs as a home-automation add-on), then on the command line or in the
//! `TOKEN` environment variable.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, TelegramError};

/// Default location of the add-on options file.
pub const DEFAULT_OPTIONS_FILE: &str = "/data/options.json";

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TOKEN";

/// Contents of the options file.
#[derive(Debug, Deserialize)]
struct OptionsFile {
    #[serde(rename = "TOKEN")]
    token: String,
}

/// Resolved bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token.
    pub token: String,
}

impl BotConfig {
    /// Resolve the token from `options_file`, falling back to `cli_token`.
    ///
    /// An options file that exists but cannot be parsed is logged and
    /// skipped.
    pub fn resolve(options_file: &Path, cli_token: Option<&str>) -> Result<Self> {
        if options_file.exists() {
            match read_options(options_file) {
                Ok(token) if !token.is_empty() => {
                    debug!(path = %options_file.display(), "Token loaded from options file");
                    return Ok(Self { token });
                }
                Ok(_) => {
                    warn!(path = %options_file.display(), "Options file has an empty token");
                }
                Err(e) => {
                    warn!(path = %options_file.display(), error = %e, "Failed to read options file");
                }
            }
        }

        match cli_token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => Ok(Self {
                token: token.to_string(),
            }),
            None => Err(TelegramError::NoToken),
        }
    }
}

fn read_options(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    let options: OptionsFile = serde_json::from_str(&content)?;
    Ok(options.token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_options_file_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"TOKEN": "from-file"}"#).unwrap();

        let config = BotConfig::resolve(&path, Some("from-cli")).unwrap();
        assert_eq!(config.token, "from-file");
    }

    #[test]
    fn test_missing_file_uses_cli() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let config = BotConfig::resolve(&path, Some("from-cli")).unwrap();
        assert_eq!(config.token, "from-cli");
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, "not json").unwrap();

        let config = BotConfig::resolve(&path, Some("from-cli")).unwrap();
        assert_eq!(config.token, "from-cli");
    }

    #[test]
    fn test_broken_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"token": "lowercase key"}"#).unwrap();

        assert!(matches!(read_options(&path), Err(TelegramError::JsonError(_))));
    }

    #[test]
    fn test_no_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(
            BotConfig::resolve(&path, None),
            Err(TelegramError::NoToken)
        ));
        assert!(matches!(
            BotConfig::resolve(&path, Some("  ")),
            Err(TelegramError::NoToken)
        ));
    }
}

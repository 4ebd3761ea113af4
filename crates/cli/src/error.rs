//! CLI error types.

use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Settings file error
    Config(String),
    /// Ad unit file error
    AdUnit(String),
    /// Bid request assembly error
    Request(String),
    /// IO error
    Io(std::io::Error),
    /// TOML parsing error
    Toml(String),
    /// JSON parsing or serialization error
    Json(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::AdUnit(msg) => write!(f, "Ad unit error: {msg}"),
            CliError::Request(msg) => write!(f, "Request error: {msg}"),
            CliError::Io(err) => write!(f, "IO error: {err}"),
            CliError::Toml(msg) => write!(f, "TOML error: {msg}"),
            CliError::Json(msg) => write!(f, "JSON error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Toml(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_cli_error_display() {
        assert_eq!(
            format!("{}", CliError::Config("test".into())),
            "Configuration error: test"
        );
        assert_eq!(
            format!("{}", CliError::AdUnit("test".into())),
            "Ad unit error: test"
        );
        assert_eq!(
            format!("{}", CliError::Request("test".into())),
            "Request error: test"
        );
        assert_eq!(
            format!("{}", CliError::Toml("test".into())),
            "TOML error: test"
        );
        assert_eq!(
            format!("{}", CliError::Json("test".into())),
            "JSON error: test"
        );
    }

    #[test]
    fn test_cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn test_cli_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        let cli_err: CliError = json_err.into();
        assert!(matches!(cli_err, CliError::Json(_)));
    }

    #[test]
    fn test_cli_error_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.source().is_some());

        let config_err = CliError::Config("test".into());
        assert!(config_err.source().is_none());
    }
}

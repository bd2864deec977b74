//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sitepulse_config::ConfigError;
use sitepulse_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const OFFLINE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(sitepulse::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             URL: {url}\n\
             Try: sitepulse sites --backend-url <URL>"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(sitepulse::tls_error),
        help(
            "Use --insecure (-k) to accept self-signed certificates,\n\
             or point ca_cert in the config file at a PEM bundle."
        )
    )]
    TlsError { reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(sitepulse::timeout),
        help("Raise [timeouts] registry in the config file or check backend load.")
    )]
    Timeout { url: String },

    // ── Registry ─────────────────────────────────────────────────────
    #[error("Site registry error: {message}")]
    #[diagnostic(code(sitepulse::registry))]
    Registry { message: String },

    // ── Results ──────────────────────────────────────────────────────
    #[error("{count} site(s) offline")]
    #[diagnostic(
        code(sitepulse::offline),
        help("Reported because --fail-on-offline was set.")
    )]
    OfflineSites { count: usize },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sitepulse::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No backend URL configured")]
    #[diagnostic(
        code(sitepulse::no_backend),
        help(
            "Set backend_url in {path},\n\
             export SITEPULSE_BACKEND_URL, or pass --backend-url.\n\
             Create a config with: sitepulse config init"
        )
    )]
    NoBackend { path: String },

    #[error("Invalid configuration: {field}: {reason}")]
    #[diagnostic(code(sitepulse::invalid_config))]
    InvalidConfig { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(sitepulse::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write config: {0}")]
    #[diagnostic(code(sitepulse::serialize))]
    Serialization(#[from] toml::ser::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(sitepulse::internal))]
    Internal(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } | Self::Timeout { .. } => {
                exit_code::CONNECTION
            }
            Self::NoBackend { .. } | Self::InvalidConfig { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::OfflineSites { .. } => exit_code::OFFLINE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                if let Some(tls) = reason.strip_prefix("TLS error: ") {
                    CliError::TlsError {
                        reason: tls.to_owned(),
                    }
                } else {
                    CliError::ConnectionFailed {
                        url,
                        source: reason.into(),
                    }
                }
            }
            CoreError::Timeout { url } => CliError::Timeout { url },
            CoreError::Registry { message, status: _ } => CliError::Registry { message },
            CoreError::Config { message } => CliError::InvalidConfig {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::InvalidConfig { field, reason },
            ConfigError::Serialization(e) => CliError::Serialization(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(
            CliError::NoBackend { path: String::new() }.exit_code(),
            exit_code::CONFIG
        );
        assert_eq!(CliError::OfflineSites { count: 2 }.exit_code(), exit_code::OFFLINE);
        assert_eq!(
            CliError::from(CoreError::Timeout { url: "x".into() }).exit_code(),
            exit_code::CONNECTION
        );
    }

    #[test]
    fn tls_reason_is_unwrapped() {
        let err = CliError::from(CoreError::ConnectionFailed {
            url: String::new(),
            reason: "TLS error: bad pem".into(),
        });
        assert!(matches!(err, CliError::TlsError { ref reason } if reason == "bad pem"));
    }
}

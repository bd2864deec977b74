// ── Core error types ──
//
// User-facing errors from sitepulse-core. Consumers never see reqwest or
// serde errors directly; `From<sitepulse_api::Error>` folds them into
// these variants. Probe failures never reach this type at all.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── Registry errors ──────────────────────────────────────────────
    #[error("Site registry error: {message}")]
    Registry {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sitepulse_api::Error> for CoreError {
    fn from(err: sitepulse_api::Error) -> Self {
        match err {
            sitepulse_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Registry {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            sitepulse_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            sitepulse_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            sitepulse_api::Error::Registry { status, message } => CoreError::Registry {
                message: format!("HTTP {status}: {message}"),
                status: Some(status),
            },
            sitepulse_api::Error::Deserialization { message, body: _ } => CoreError::Registry {
                message: format!("unexpected response: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_status_is_kept() {
        let err = CoreError::from(sitepulse_api::Error::Registry {
            status: 502,
            message: "Bad Gateway".into(),
        });
        assert!(matches!(err, CoreError::Registry { status: Some(502), .. }));
    }

    #[test]
    fn tls_is_a_connection_failure() {
        let err = CoreError::from(sitepulse_api::Error::Tls("bad pem".into()));
        assert!(matches!(err, CoreError::ConnectionFailed { .. }));
    }
}

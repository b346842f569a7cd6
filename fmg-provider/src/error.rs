use thiserror::Error;

/// Status code FortiManager returns for a missing object
pub const OBJECT_NOT_FOUND: i64 = -3;

/// Error type for the FortiManager JSON-RPC client.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected or no session available.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-success HTTP status from the endpoint.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// TLS setup error (CA bundle unreadable or invalid).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── JSON-RPC ────────────────────────────────────────────────────
    /// Non-zero status code in a JSON-RPC result.
    #[error("API error {code} on {url}: {message}")]
    Api {
        code: i64,
        message: String,
        url: String,
    },

    /// Response body did not match the JSON-RPC envelope.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Configuration ───────────────────────────────────────────────
    /// Provider configuration is incomplete or inconsistent.
    #[error("Invalid provider configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the API reported that the object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { code, .. } if *code == OBJECT_NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = Error::Api {
            code: -6,
            message: "Invalid url".into(),
            url: "/pm/config/device/FGT1/global/system/global".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error -6 on /pm/config/device/FGT1/global/system/global: Invalid url"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn object_missing_is_not_found() {
        let err = Error::Api {
            code: -3,
            message: "Object does not exist".into(),
            url: "/x".into(),
        };
        assert!(err.is_not_found());
    }
}

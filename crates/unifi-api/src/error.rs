use thiserror::Error;

/// Top-level error type for the `unifi-api` crate.
///
/// Construction-time validation (`InvalidBaseUrl`, `InvalidSiteName`) keeps a
/// client from being built at all; every other variant is a runtime failure
/// that leaves the session state untouched, except where login/logout flip it.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// The controller base URL is not an `https://` URL.
    #[error("Invalid base URL '{url}': must begin with https://")]
    InvalidBaseUrl { url: String },

    /// The site name is empty (after trimming).
    #[error("Invalid site name: must be a non-empty string")]
    InvalidSiteName,

    // ── Authentication ──────────────────────────────────────────────
    /// The login exchange completed but the controller refused it.
    #[error("Login failed (HTTP {status})")]
    LoginFailed { status: u16 },

    /// An authenticated request was attempted on a logged-out session.
    #[error("Login required -- call login() before issuing requests")]
    LoginRequired,

    // ── Transport ───────────────────────────────────────────────────
    /// The transport gave up waiting for the controller.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx response or a network failure other than a timeout.
    #[error("Request to {url} failed: {message}")]
    Request {
        status: Option<u16>,
        url: String,
        message: String,
    },

    /// URL parsing error while joining a path onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Envelope ────────────────────────────────────────────────────
    /// The controller answered HTTP 2xx but `meta.rc` was not `"ok"`.
    #[error("Controller rejected the request (rc={rc}): {message}")]
    Api { rc: String, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Arguments ───────────────────────────────────────────────────
    /// A caller-supplied payload is missing something the endpoint needs.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl Error {
    /// Map a `reqwest` transport failure onto the timeout / general split.
    pub(crate) fn from_transport(err: &reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout { url: url.to_owned() }
        } else {
            Self::Request {
                status: err.status().map(|s| s.as_u16()),
                url: url.to_owned(),
                message: err.to_string(),
            }
        }
    }

    /// Returns `true` if the transport timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if logging in (again) might resolve this error.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::LoginFailed { .. } | Self::LoginRequired => true,
            Self::Request {
                status: Some(401), ..
            } => true,
            _ => false,
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::LoginFailed { status } => Some(*status),
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }
}

//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with actionable
//! help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use unifi_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Request to {url} failed")]
    #[diagnostic(
        code(unifi::request_failed),
        help(
            "Check that the controller is running and accessible.\n\
             URL: {url}"
        )
    )]
    RequestFailed {
        url: String,
        status: Option<u16>,
        #[source]
        source: unifi_api::Error,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(unifi::tls_error),
        help(
            "The controller usually presents a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or pass --ca-cert / set ca_cert in your profile."
        )
    )]
    Tls { message: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(unifi::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(unifi::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             The password is read from UNIFI_PASSWORD, then the keyring, then the profile's `password` key."
        )
    )]
    AuthFailed { status: u16, profile: String },

    #[error("Not logged in to the controller")]
    #[diagnostic(
        code(unifi::login_required),
        help("The session ended before the request was sent. Re-run the command.")
    )]
    LoginRequired,

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(unifi::no_credentials),
        help(
            "Pass --username and set UNIFI_PASSWORD, store the password with\n\
             `unifi config set-password`, or add `username` and `password` to the profile."
        )
    )]
    NoCredentials { profile: String },

    // ── Controller ───────────────────────────────────────────────────

    #[error("Controller rejected the request: {message}")]
    #[diagnostic(code(unifi::api_error), help("Controller result code: {rc}"))]
    ApiError { rc: String, message: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(unifi::not_found),
        help("Run: unifi {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Unexpected response from controller: {message}")]
    #[diagnostic(code(unifi::bad_response), help("Run with -vvv to log the raw response body."))]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unifi::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(unifi::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(unifi::no_config),
        help(
            "Pass --controller https://<host> or add a profile to\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(unifi::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(unifi::json), help("Check the JSON payload and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(unifi::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RequestFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::LoginRequired | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── unifi_api::Error → CliError ──────────────────────────────────────

impl From<unifi_api::Error> for CliError {
    fn from(err: unifi_api::Error) -> Self {
        use unifi_api::Error as E;

        match err {
            E::InvalidBaseUrl { url } => CliError::Validation {
                field: "controller".into(),
                reason: format!("'{url}' must be an https:// URL"),
            },
            E::InvalidSiteName => CliError::Validation {
                field: "site".into(),
                reason: "must be a non-empty slug".into(),
            },
            E::LoginFailed { status } => CliError::AuthFailed {
                status,
                profile: "current".into(),
            },
            E::Timeout { url } => CliError::Timeout { url },
            E::Tls(message) => CliError::Tls { message },
            E::Api { rc, message } => CliError::ApiError { rc, message },
            E::Deserialization { message, .. } => CliError::BadResponse { message },
            E::Validation { field, reason } => CliError::Validation { field, reason },
            E::LoginRequired => CliError::LoginRequired,
            E::InvalidUrl(err) => CliError::Validation {
                field: "path".into(),
                reason: err.to_string(),
            },
            E::Request {
                status,
                url,
                message,
            } => CliError::RequestFailed {
                source: E::Request {
                    status,
                    url: url.clone(),
                    message,
                },
                url,
                status,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_exit_codes() {
        let cases = [
            (unifi_api::Error::LoginFailed { status: 400 }, exit_code::AUTH),
            (
                unifi_api::Error::Timeout {
                    url: "https://c/api".into(),
                },
                exit_code::TIMEOUT,
            ),
            (
                unifi_api::Error::Request {
                    status: Some(500),
                    url: "https://c/api".into(),
                    message: "500 Internal Server Error".into(),
                },
                exit_code::CONNECTION,
            ),
            (
                unifi_api::Error::InvalidBaseUrl {
                    url: "http://c".into(),
                },
                exit_code::USAGE,
            ),
            (
                unifi_api::Error::Api {
                    rc: "error".into(),
                    message: "api.err.NoPermission".into(),
                },
                exit_code::GENERAL,
            ),
        ];

        for (err, code) in cases {
            let label = err.to_string();
            assert_eq!(CliError::from(err).exit_code(), code, "{label}");
        }
    }

    #[test]
    fn request_failure_keeps_status_and_url() {
        let err = CliError::from(unifi_api::Error::Request {
            status: Some(502),
            url: "https://c/proxy/network/api/s/default/stat/health".into(),
            message: "502 Bad Gateway".into(),
        });
        match err {
            CliError::RequestFailed { url, status, .. } => {
                assert_eq!(status, Some(502));
                assert!(url.ends_with("/stat/health"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn login_required_is_an_auth_error() {
        let err = CliError::from(unifi_api::Error::LoginRequired);
        assert!(matches!(err, CliError::LoginRequired));
        assert_eq!(err.exit_code(), exit_code::AUTH);
        assert_eq!(err.to_string(), "Not logged in to the controller");
    }

    #[test]
    fn unjoinable_path_is_a_validation_error() {
        let err = CliError::from(unifi_api::Error::InvalidUrl(url::ParseError::EmptyHost));
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "path"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn missing_credentials_from_config() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "home".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}

// ── Runtime connection configuration ──
//
// Describes *how* to reach one controller site. The library never reads
// config files; callers (the CLI via `unifi-config`) build one of these.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

pub const DEFAULT_BASE_URL: &str = "https://127.0.0.1:8443";
pub const DEFAULT_SITE: &str = "default";
pub const DEFAULT_SESSION_COOKIE: &str = "unificookie";

/// Everything needed to construct a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Controller root, e.g. `https://192.168.1.1` or `https://host:8443`.
    pub base_url: String,
    /// Site slug (not the display name).
    pub site: String,
    pub credentials: Credentials,
    /// Label for the exported session cookie.
    pub session_cookie_name: String,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            site: DEFAULT_SITE.into(),
            credentials,
            session_cookie_name: DEFAULT_SESSION_COOKIE.into(),
            transport: TransportConfig::default(),
        }
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = name.into();
        self
    }
}

/// Trim the base URL and require `https://`.
///
/// Returns the URL without a trailing slash so endpoint paths can be
/// appended verbatim.
pub(crate) fn validate_base_url(raw: &str, require_https: bool) -> Result<String, Error> {
    let trimmed = raw.trim();
    if require_https && !trimmed.starts_with("https://") {
        return Err(Error::InvalidBaseUrl {
            url: trimmed.to_owned(),
        });
    }
    Url::parse(trimmed).map_err(|_| Error::InvalidBaseUrl {
        url: trimmed.to_owned(),
    })?;
    Ok(trimmed.trim_end_matches('/').to_owned())
}

/// Trim and lower-case the site slug; reject it if nothing is left.
pub(crate) fn validate_site(raw: &str) -> Result<String, Error> {
    let site = raw.trim().to_lowercase();
    if site.is_empty() {
        return Err(Error::InvalidSiteName);
    }
    Ok(site)
}

pub(crate) fn normalize_credentials(credentials: &Credentials) -> Credentials {
    Credentials {
        username: credentials.username.trim().to_owned(),
        password: SecretString::from(credentials.password.expose_secret().trim().to_owned()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn base_url_is_trimmed_and_stripped() {
        assert_eq!(
            validate_base_url("  https://10.0.0.1:8443/ ", true).unwrap(),
            "https://10.0.0.1:8443"
        );
    }

    #[test]
    fn plain_http_is_rejected() {
        let err = validate_base_url("http://10.0.0.1:8443", true).unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }

    #[test]
    fn unparsable_https_url_is_rejected() {
        let err = validate_base_url("https://", true).unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }

    #[test]
    fn site_is_trimmed_and_lowercased() {
        assert_eq!(validate_site("  Branch01 ").unwrap(), "branch01");
    }

    #[test]
    fn blank_site_is_rejected() {
        assert!(matches!(validate_site("   "), Err(Error::InvalidSiteName)));
        assert!(matches!(validate_site(""), Err(Error::InvalidSiteName)));
    }

    #[test]
    fn credentials_are_trimmed() {
        let creds = normalize_credentials(&Credentials::new(" admin ", " secret\n".to_owned()));
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password.expose_secret(), "secret");
    }
}

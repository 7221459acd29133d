// Session-owning HTTP client
//
// Wraps `reqwest::Client` with controller-specific URL construction,
// flavor-aware path rewriting, CSRF propagation, and envelope unwrapping.
// Login/logout live in `session.rs`; endpoint groups are inherent methods
// in `endpoints/` to keep this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::Jar;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use tracing::{debug, trace};
use url::Url;

use crate::auth::{ControllerFlavor, Credentials, SessionState};
use crate::config::{self, ClientConfig};
use crate::envelope::Envelope;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Header the controller uses to hand out and check its CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// HTTP verbs a request may use. Anything else is sent as `GET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Parse a verb name, falling back to `GET` for anything unrecognised.
    pub fn parse_or_default(method: &str) -> Self {
        method.trim().parse().unwrap_or_default()
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Patch => Self::PATCH,
        }
    }
}

/// Client for one site on one controller.
///
/// Owns the cookie jar and the [`SessionState`]. Not meant to be shared
/// between tasks: state transitions take `&mut self`, so callers that need
/// parallelism use one client per task.
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) jar: Arc<Jar>,
    /// Controller root without a trailing slash.
    pub(crate) base_url: String,
    pub(crate) site: String,
    pub(crate) credentials: Credentials,
    pub(crate) session_cookie_name: String,
    pub(crate) transport: TransportConfig,
    pub(crate) state: SessionState,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("site", &self.site)
            .field("username", &self.credentials.username)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Validate `config` and build a logged-out client.
    ///
    /// Fails with [`Error::InvalidBaseUrl`] unless the base URL is
    /// `https://`, and with [`Error::InvalidSiteName`] for a blank site.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::build(config, true)
    }

    pub(crate) fn build(config: ClientConfig, require_https: bool) -> Result<Self, Error> {
        let base_url = config::validate_base_url(&config.base_url, require_https)?;
        let site = config::validate_site(&config.site)?;
        let jar = Arc::new(Jar::default());
        let http = config.transport.build_client(Arc::clone(&jar))?;

        debug!(%base_url, %site, "client created");

        Ok(Self {
            http,
            jar,
            base_url,
            site,
            credentials: config::normalize_credentials(&config.credentials),
            session_cookie_name: config.session_cookie_name.trim().to_owned(),
            transport: config.transport,
            state: SessionState::LoggedOut,
        })
    }

    /// The normalized site slug.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// The controller base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in()
    }

    /// The detected controller flavor, once logged in.
    pub fn flavor(&self) -> Option<ControllerFlavor> {
        self.state.flavor()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Logical path for a site-scoped endpoint: `/api/s/{site}/{suffix}`.
    pub fn site_path(&self, suffix: &str) -> String {
        format!("/api/s/{}/{}", self.site, suffix.trim_start_matches('/'))
    }

    /// Absolute URL for a physical path (already flavor-resolved).
    pub(crate) fn url_for(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}{path}", self.base_url))?)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Send an authenticated request and return the parsed JSON body.
    ///
    /// `endpoint` is the logical path (e.g. `/api/s/default/stat/sta`); it
    /// is rewritten for the controller flavor before sending. An empty body
    /// yields an empty JSON object. The envelope is *not* inspected here:
    /// HTTP 200 does not mean the controller accepted the command, so the
    /// caller checks `meta.rc` (see [`Envelope`]).
    pub async fn dispatch(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Value, Error> {
        let SessionState::LoggedIn { flavor, csrf_token } = &self.state else {
            return Err(Error::LoginRequired);
        };

        let url = self.url_for(&flavor.resolve_path(endpoint))?;
        debug!(%method, %url, "dispatching request");

        let mut builder = self.http.request(method.into(), url.clone());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            trace!(%body, "request body");
            builder = builder.json(body);
        }
        if let Some(token) = csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| Error::from_transport(&e, url.as_str()))?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        if !status.is_success() {
            return Err(Error::Request {
                status: Some(status.as_u16()),
                message: format!(
                    "{} {} for url: {final_url}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
                url: final_url,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(|e| Error::from_transport(&e, &final_url))?;
        trace!(status = %status, body = %text, "response");

        if text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: text.clone(),
            }
        })
    }

    // ── Typed request helpers ────────────────────────────────────────

    /// Dispatch and unwrap the envelope, returning `data`.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let raw = self.dispatch(endpoint, method, body, query).await?;
        Ok(Envelope::<T>::from_value(raw)?.data)
    }

    /// `GET` a site-scoped endpoint and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        self.request(endpoint, HttpMethod::Get, None, &[]).await
    }

    /// `GET` with query parameters and unwrap the envelope.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        self.request(endpoint, HttpMethod::Get, None, query).await
    }

    /// `POST` a JSON body and unwrap the envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<T, Error> {
        self.request(endpoint, HttpMethod::Post, Some(body), &[])
            .await
    }

    /// `PUT` a JSON body and unwrap the envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<T, Error> {
        self.request(endpoint, HttpMethod::Put, Some(body), &[])
            .await
    }

    /// `POST` a command whose only interesting outcome is `meta.rc`.
    pub(crate) async fn command(&self, endpoint: &str, body: &Value) -> Result<(), Error> {
        let _: Value = self.post(endpoint, body).await?;
        Ok(())
    }
}

// Session lifecycle
//
// Cookie-based login/logout with controller flavor detection. The login
// endpoint sets the session cookie in the client's jar; every later
// request carries it automatically, plus the CSRF token if one was issued.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::REFERER;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, warn};

use crate::auth::{ControllerFlavor, SessionState};
use crate::client::{CSRF_HEADER, Client};
use crate::error::Error;

/// The session cookie currently held for the controller, labelled with the
/// configured cookie name so callers can persist it.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    /// Raw `Cookie` header value for the controller URL.
    pub value: SecretString,
}

impl Client {
    /// Authenticate with the controller.
    ///
    /// Returns immediately if already logged in. Otherwise requests the base
    /// URL to tell a UniFi OS gateway (HTTP 200) from a legacy controller,
    /// then posts the credentials to the flavor's login path:
    /// - UniFi OS: `POST /api/auth/login` (with a `Referer` header)
    /// - Legacy: `POST /api/login`
    pub async fn login(&mut self) -> Result<(), Error> {
        if self.state.is_logged_in() {
            debug!("already logged in");
            return Ok(());
        }

        let flavor = self.detect_flavor().await?;
        let url = self.url_for(flavor.login_path())?;
        debug!(%url, ?flavor, "logging in");

        let body = json!({
            "username": self.credentials.username,
            "password": self.credentials.password.expose_secret(),
            "remember": true,
        });

        let mut builder = self.http.post(url.clone()).json(&body);
        if flavor == ControllerFlavor::UnifiOs {
            builder = builder.header(REFERER, format!("{}/login", self.base_url));
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| Error::from_transport(&e, url.as_str()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            debug!(%status, "login rejected");
            return Err(Error::LoginFailed {
                status: status.as_u16(),
            });
        }

        let csrf_token = resp
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        if csrf_token.is_some() {
            debug!("storing CSRF token");
        }

        self.state = SessionState::LoggedIn { flavor, csrf_token };
        debug!("login successful");
        Ok(())
    }

    /// Unauthenticated `GET {base}/`: a UniFi OS gateway serves its web UI
    /// there with 200, a legacy controller redirects or errors.
    async fn detect_flavor(&self) -> Result<ControllerFlavor, Error> {
        let url = self.url_for("/")?;
        debug!(%url, "probing controller flavor");

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::from_transport(&e, url.as_str()))?;

        let flavor = if resp.status() == StatusCode::OK {
            ControllerFlavor::UnifiOs
        } else {
            ControllerFlavor::Legacy
        };
        debug!(status = %resp.status(), ?flavor, "controller flavor detected");
        Ok(flavor)
    }

    /// End the current session.
    ///
    /// A no-op when logged out. Local state (flag, CSRF token, cookies) is
    /// cleared even if the logout request itself fails; the failure is
    /// still returned.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let SessionState::LoggedIn { flavor, csrf_token } = &self.state else {
            debug!("not logged in, nothing to do");
            return Ok(());
        };

        let url = self.url_for(flavor.logout_path())?;
        debug!(%url, "logging out");

        let mut builder = self.http.post(url.clone());
        if let Some(token) = csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        let sent = builder.send().await;

        self.state = SessionState::LoggedOut;
        self.reset_cookies()?;

        sent.map_err(|e| Error::from_transport(&e, url.as_str()))?;
        debug!("logout complete");
        Ok(())
    }

    /// Explicitly release the session. Same as [`logout`](Self::logout).
    pub async fn close(&mut self) -> Result<(), Error> {
        self.logout().await
    }

    /// Run `f` inside a logged-in session, closing it afterwards.
    ///
    /// The closure's result is returned unchanged. A failure while closing
    /// is logged and dropped; it never replaces the closure's outcome.
    pub async fn with_session<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: AsyncFnOnce(&mut Self) -> Result<T, Error>,
    {
        self.login().await?;
        let result = f(&mut *self).await;
        if let Err(err) = self.close().await {
            warn!(error = %err, "failed to close session");
        }
        result
    }

    /// The session cookie currently in the jar, if any.
    pub fn session_cookie(&self) -> Option<SessionCookie> {
        let url = self.url_for("/").ok()?;
        let header = self.jar.cookies(&url)?;
        let value = header.to_str().ok()?.to_owned();
        Some(SessionCookie {
            name: self.session_cookie_name.clone(),
            value: SecretString::from(value),
        })
    }

    /// Swap in an empty cookie jar. `reqwest::cookie::Jar` cannot be
    /// cleared in place, so the HTTP client is rebuilt around the new jar.
    fn reset_cookies(&mut self) -> Result<(), Error> {
        let jar = Arc::new(Jar::default());
        self.http = self.transport.build_client(Arc::clone(&jar))?;
        self.jar = jar;
        Ok(())
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if self.state.is_logged_in() {
            warn!(
                base_url = %self.base_url,
                "client dropped while logged in; call close() to end the session"
            );
        }
    }
}

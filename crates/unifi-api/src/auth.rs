use secrecy::SecretString;

/// Which generation of controller the session is talking to.
///
/// Both expose the same logical management API; only the physical routes
/// differ. The flavor is discovered by the unauthenticated root request in
/// [`Client::login`](crate::Client::login).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerFlavor {
    /// UniFi OS gateway (UDM, UCG, Cloud Key Gen2+). The network
    /// application sits behind the `/proxy/network` reverse proxy.
    UnifiOs,
    /// Standalone Network Application, usually on port 8443.
    Legacy,
}

impl ControllerFlavor {
    /// Prefix that every site-scoped API path starts with.
    pub const SITE_SCOPED_PREFIX: &'static str = "/api/s/";

    /// Route segment the OS flavor puts in front of site-scoped paths.
    pub const NETWORK_PROXY: &'static str = "/proxy/network";

    /// The login endpoint path.
    pub fn login_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/login",
            Self::Legacy => "/api/login",
        }
    }

    /// The logout endpoint path.
    pub fn logout_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/logout",
            Self::Legacy => "/logout",
        }
    }

    /// Map a logical endpoint path onto the physical route for this flavor.
    ///
    /// On UniFi OS any `/api/s/...` path is routed through the network
    /// proxy; every other path (and every legacy path) passes through.
    pub fn resolve_path(self, endpoint: &str) -> String {
        match self {
            Self::UnifiOs if endpoint.starts_with(Self::SITE_SCOPED_PREFIX) => {
                format!("{}{endpoint}", Self::NETWORK_PROXY)
            }
            Self::UnifiOs | Self::Legacy => endpoint.to_owned(),
        }
    }
}

/// Authentication state of a session.
///
/// The flavor and CSRF token only exist while logged in, so they live
/// inside the `LoggedIn` variant rather than beside a boolean flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn {
        flavor: ControllerFlavor,
        /// Captured from the `x-csrf-token` login response header.
        csrf_token: Option<String>,
    },
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    pub fn flavor(&self) -> Option<ControllerFlavor> {
        match self {
            Self::LoggedIn { flavor, .. } => Some(*flavor),
            Self::LoggedOut => None,
        }
    }

    pub fn csrf_token(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { csrf_token, .. } => csrf_token.as_deref(),
            Self::LoggedOut => None,
        }
    }
}

/// Username/password pair for cookie-session login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_flavor_proxies_site_scoped_paths() {
        assert_eq!(
            ControllerFlavor::UnifiOs.resolve_path("/api/s/default/stat/sta"),
            "/proxy/network/api/s/default/stat/sta"
        );
    }

    #[test]
    fn os_flavor_leaves_controller_paths_alone() {
        assert_eq!(
            ControllerFlavor::UnifiOs.resolve_path("/api/self/sites"),
            "/api/self/sites"
        );
        assert_eq!(
            ControllerFlavor::UnifiOs.resolve_path("/api/auth/logout"),
            "/api/auth/logout"
        );
    }

    #[test]
    fn legacy_flavor_never_rewrites() {
        assert_eq!(
            ControllerFlavor::Legacy.resolve_path("/api/s/default/stat/sta"),
            "/api/s/default/stat/sta"
        );
    }

    #[test]
    fn login_and_logout_paths_differ_per_flavor() {
        assert_eq!(ControllerFlavor::UnifiOs.login_path(), "/api/auth/login");
        assert_eq!(ControllerFlavor::Legacy.login_path(), "/api/login");
        assert_eq!(ControllerFlavor::UnifiOs.logout_path(), "/api/auth/logout");
        assert_eq!(ControllerFlavor::Legacy.logout_path(), "/logout");
    }

    #[test]
    fn logged_out_state_has_no_flavor_or_token() {
        let state = SessionState::default();
        assert!(!state.is_logged_in());
        assert_eq!(state.flavor(), None);
        assert_eq!(state.csrf_token(), None);
    }
}

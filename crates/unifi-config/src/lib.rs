//! Profile configuration for UniFi controller tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `unifi_api::ClientConfig`. The CLI layers its flag
//! overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use unifi_api::{ClientConfig, Credentials, TlsMode, TransportConfig};

/// Environment variable consulted before any plaintext password.
pub const PASSWORD_ENV: &str = "UNIFI_PASSWORD";
/// Environment variable consulted when a profile has no username.
pub const USERNAME_ENV: &str = "UNIFI_USERNAME";
/// Keyring service name; entries are keyed `{profile}/password`.
pub const KEYRING_SERVICE: &str = "unifi";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    ProfileNotFound { name: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Pick the active profile: `name`, else `default_profile`, else
    /// `"default"`.
    pub fn profile<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|p| (name, p))
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named controller profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Controller base URL (e.g., "https://192.168.1.1:8443").
    pub controller: String,

    /// Site slug.
    #[serde(default = "default_site")]
    pub site: String,

    pub username: Option<String>,

    /// Password (plaintext; `UNIFI_PASSWORD` and the keyring take
    /// precedence).
    pub password: Option<String>,

    /// Name used when exporting the session cookie.
    pub session_cookie: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// `false` verifies against the system roots; unset or `true` accepts
    /// self-signed certificates.
    pub insecure: Option<bool>,

    /// Override the global timeout (seconds).
    pub timeout: Option<u64>,
}

fn default_site() -> String {
    unifi_api::DEFAULT_SITE.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unifi", "unifi").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("unifi");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment.
///
/// Env keys are `UNIFI_`-prefixed with `__` separating nesting levels,
/// e.g. `UNIFI_DEFAULTS__TIMEOUT` or `UNIFI_PROFILES__HOME__SITE`.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("UNIFI_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve username + password for a profile.
///
/// Username: profile, then `UNIFI_USERNAME`. Password:
/// 1. `UNIFI_PASSWORD`
/// 2. system keyring (`unifi` / `{profile}/password`)
/// 3. the profile's plaintext value
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .ok_or_else(no_credentials)?;

    let password = std::env::var(PASSWORD_ENV)
        .ok()
        .or_else(|| keyring_password(profile_name))
        .or_else(|| profile.password.clone())
        .ok_or_else(no_credentials)?;

    Ok(Credentials::new(username, SecretString::from(password)))
}

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
}

// A missing secret service or entry just means the next tier applies.
fn keyring_password(profile_name: &str) -> Option<String> {
    keyring_entry(profile_name).ok()?.get_password().ok()
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password.expose_secret())?;
    Ok(())
}

/// TLS mode for a profile: custom CA wins, then an explicit
/// `insecure = false` selects the system roots, otherwise accept the
/// self-signed certificate local controllers ship with.
pub fn resolve_tls(profile: &Profile) -> TlsMode {
    if let Some(ref ca_path) = profile.ca_cert {
        return TlsMode::CustomCa(ca_path.clone());
    }
    match profile.insecure {
        Some(false) => TlsMode::System,
        _ => TlsMode::DangerAcceptInvalid,
    }
}

/// Build a `ClientConfig` from a profile, with no CLI overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    url::Url::parse(&profile.controller).map_err(|_| ConfigError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {}", profile.controller),
    })?;

    let credentials = resolve_credentials(profile, profile_name)?;
    let transport = TransportConfig {
        tls: resolve_tls(profile),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    };

    let mut config = ClientConfig::new(profile.controller.clone(), credentials)
        .with_site(profile.site.clone())
        .with_transport(transport);
    if let Some(ref cookie) = profile.session_cookie {
        config = config.with_session_cookie_name(cookie.clone());
    }
    Ok(config)
}

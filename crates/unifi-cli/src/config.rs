//! Merges the TOML profile with CLI flag overrides and hands the result to
//! `unifi_config` for translation into a `unifi_api::ClientConfig`.

use std::io::IsTerminal;

use clap::ValueEnum;

use unifi_api::ClientConfig;
use unifi_config::{Config, ConfigError, Profile};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Load config, returning a default if the file is missing or unreadable.
pub fn load_config_or_default() -> Config {
    unifi_config::load_config().unwrap_or_default()
}

/// `--output`, else `defaults.output` from the config file, else table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&cfg.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Table)
}

/// Profile named on the command line, else the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the client configuration from profile + flags.
///
/// An explicitly requested profile must exist. Without any profile the
/// flags alone must name a controller. The password comes from
/// `UNIFI_PASSWORD` or the profile; on a terminal it is prompted for.
pub fn build_client_config(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let base = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            let controller = global.controller.clone().ok_or_else(|| CliError::NoConfig {
                path: unifi_config::config_path().display().to_string(),
            })?;
            Profile {
                controller,
                site: unifi_api::DEFAULT_SITE.into(),
                username: None,
                password: None,
                session_cookie: None,
                ca_cert: None,
                insecure: None,
                timeout: None,
            }
        }
    };

    let mut merged = apply_overrides(base, global);
    match unifi_config::profile_to_client_config(&merged, &profile_name, &cfg.defaults) {
        Err(ConfigError::NoCredentials { .. })
            if merged.username.is_some() && merged.password.is_none() && std::io::stdin().is_terminal() =>
        {
            merged.password = Some(rpassword::prompt_password("Controller password: ")?);
            Ok(unifi_config::profile_to_client_config(
                &merged,
                &profile_name,
                &cfg.defaults,
            )?)
        }
        other => Ok(other?),
    }
}

/// Sorted, comma-separated profile names for error help text.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref controller) = global.controller {
        profile.controller.clone_from(controller);
    }
    if let Some(ref site) = global.site {
        profile.site.clone_from(site);
    }
    if global.username.is_some() {
        profile.username.clone_from(&global.username);
    }
    if global.ca_cert.is_some() {
        profile.ca_cert.clone_from(&global.ca_cert);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    profile
}

/// The config with every password replaced, for `config show`.
pub fn redacted(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("********".into());
        }
    }
    cfg
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["unifi"];
        argv.extend_from_slice(args);
        argv.push("health");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_home() -> Config {
        let mut cfg = Config::default();
        cfg.default_profile = Some("home".into());
        cfg.profiles.insert(
            "home".into(),
            Profile {
                controller: "https://192.168.1.1".into(),
                site: "default".into(),
                username: Some("admin".into()),
                password: Some("secret".into()),
                session_cookie: None,
                ca_cert: None,
                insecure: None,
                timeout: Some(15),
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_home();
        let g = global(&["--site", "branch", "--timeout", "5", "-u", "ops"]);

        let client = build_client_config(&g, &cfg).unwrap();

        assert_eq!(client.base_url, "https://192.168.1.1");
        assert_eq!(client.site, "branch");
        assert_eq!(client.credentials.username, "ops");
        assert_eq!(client.transport.timeout.as_secs(), 5);
    }

    #[test]
    fn unknown_explicit_profile_lists_available() {
        let cfg = config_with_home();
        let err = build_client_config(&global(&["--profile", "lab"]), &cfg).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "lab");
                assert_eq!(available, "home");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn no_profile_and_no_controller_is_no_config() {
        let err = build_client_config(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn flags_alone_reach_credential_resolution() {
        // Test processes have no terminal, so a missing password is not
        // prompted for.
        let g = global(&["-c", "https://10.0.0.1:8443", "-k"]);
        let err = build_client_config(&g, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoCredentials { ref profile } if profile == "default"));
    }

    #[test]
    fn insecure_flag_selects_danger_mode() {
        let mut cfg = config_with_home();
        cfg.profiles.get_mut("home").unwrap().insecure = Some(false);

        let verified = build_client_config(&global(&[]), &cfg).unwrap();
        assert_eq!(verified.transport.tls, unifi_api::TlsMode::System);

        let relaxed = build_client_config(&global(&["-k"]), &cfg).unwrap();
        assert_eq!(relaxed.transport.tls, unifi_api::TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn output_falls_back_to_config_default() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Yaml);
        assert_eq!(
            output_format(&global(&["-o", "json"]), &cfg),
            OutputFormat::Json
        );
        cfg.defaults.output = "bogus".into();
        assert_eq!(output_format(&global(&[]), &cfg), OutputFormat::Table);
    }

    #[test]
    fn redaction_hides_passwords() {
        let cfg = redacted(config_with_home());
        assert_eq!(cfg.profiles["home"].password.as_deref(), Some("********"));
    }
}

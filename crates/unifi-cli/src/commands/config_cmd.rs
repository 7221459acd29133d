//! Config subcommand handlers. These never touch the controller.

use secrecy::SecretString;
use unifi_config::ConfigError;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::Ctx;

pub fn handle(args: ConfigArgs, global: &GlobalOpts, ctx: Ctx) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::redacted(config::load_config_or_default());
            let out = output::render_single(
                ctx.format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| c.default_profile.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &unifi_config::config_path().display().to_string(),
                ctx.quiet,
            );
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = unifi_config::load_config()?;
            match cfg.profile(Some(name.as_str())) {
                Ok(_) => {}
                Err(ConfigError::ProfileNotFound { name }) => {
                    return Err(CliError::ProfileNotFound {
                        name,
                        available: config::available_profiles(&cfg),
                    });
                }
                Err(other) => return Err(other.into()),
            }
            cfg.default_profile = Some(name.clone());
            unifi_config::save_config(&cfg)?;
            if !ctx.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile = config::active_profile_name(global, &cfg);
            let password = rpassword::prompt_password(format!("Password for profile '{profile}': "))?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "must not be empty".into(),
                });
            }
            unifi_config::store_password(&profile, &SecretString::from(password))?;
            if !ctx.quiet {
                eprintln!("Password for '{profile}' stored in the system keyring");
            }
            Ok(())
        }
    }
}

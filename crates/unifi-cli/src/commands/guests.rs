//! Hotspot guest authorization handlers.

use unifi_api::{Client, GuestAuthorization};

use crate::cli::{GuestsArgs, GuestsCommand};
use crate::error::CliError;

use super::Ctx;

pub async fn handle(client: &mut Client, args: GuestsArgs, ctx: Ctx) -> Result<(), CliError> {
    match args.command {
        GuestsCommand::Authorize {
            mac,
            minutes,
            up,
            down,
            megabytes,
            ap_mac,
        } => {
            let limits = GuestAuthorization {
                up,
                down,
                megabytes,
                ap_mac,
            };
            client
                .with_session(async |c| c.authorize_guest(&mac, minutes, &limits).await)
                .await?;
            if !ctx.quiet {
                eprintln!("Guest {mac} authorized for {minutes} minutes");
            }
            Ok(())
        }

        GuestsCommand::Unauthorize { mac } => {
            client
                .with_session(async |c| c.unauthorize_guest(&mac).await)
                .await?;
            if !ctx.quiet {
                eprintln!("Guest {mac} unauthorized");
            }
            Ok(())
        }
    }
}

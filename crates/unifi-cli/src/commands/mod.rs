//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod alarms;
pub mod clients;
pub mod config_cmd;
pub mod devices;
pub mod guests;
pub mod health;
pub mod request;
pub mod sites;
pub mod vouchers;

use unifi_api::Client;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;

/// Rendering choices shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct Ctx {
    pub format: OutputFormat,
    pub quiet: bool,
}

/// Dispatch a controller-bound command to the appropriate handler.
///
/// Each handler runs inside its own login/logout pair.
pub async fn dispatch(cmd: Command, client: &mut Client, ctx: Ctx) -> Result<(), CliError> {
    match cmd {
        Command::Sites => sites::handle(client, ctx).await,
        Command::Devices(args) => devices::handle(client, args, ctx).await,
        Command::Clients(args) => clients::handle(client, args, ctx).await,
        Command::Health => health::handle(client, ctx).await,
        Command::Alarms(args) => alarms::handle(client, args, ctx).await,
        Command::Vouchers(args) => vouchers::handle(client, args, ctx).await,
        Command::Guests(args) => guests::handle(client, args, ctx).await,
        Command::Request(args) => request::handle(client, args, ctx).await,
        // Config and Completions are handled before a client exists
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

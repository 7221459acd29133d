//! Client (station) command handler.

use tabled::Tabled;
use unifi_api::{Client, Station};

use crate::cli::ClientsArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled)]
struct StationRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Guest")]
    guest: &'static str,
}

impl From<&Station> for StationRow {
    fn from(s: &Station) -> Self {
        let network = if s.is_wired == Some(true) {
            "wired".into()
        } else {
            output::cell(s.essid.as_deref())
        };
        Self {
            name: output::cell(s.name.as_deref().or(s.hostname.as_deref())),
            mac: s.mac.clone(),
            ip: output::cell(s.ip.as_deref()),
            network,
            signal: output::cell(s.signal),
            guest: if s.is_guest == Some(true) { "yes" } else { "no" },
        }
    }
}

pub async fn handle(client: &mut Client, args: ClientsArgs, ctx: Ctx) -> Result<(), CliError> {
    let mac = args.mac.as_deref();
    let stations = client
        .with_session(async |c| c.list_clients(mac).await)
        .await?;

    let out = output::render_list(ctx.format, &stations, |s| StationRow::from(s), |s| s.mac.clone())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

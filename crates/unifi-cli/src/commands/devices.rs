//! Device command handler.

use tabled::Tabled;
use unifi_api::{Client, Device};

use crate::cli::DevicesArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "State")]
    state: &'static str,
    #[tabled(rename = "Clients")]
    clients: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: output::cell(d.name.as_deref()),
            mac: d.mac.clone(),
            ip: output::cell(d.ip.as_deref()),
            model: output::cell(d.model.as_deref()),
            version: output::cell(d.version.as_deref()),
            state: state_label(d.state),
            clients: output::cell(d.num_sta),
        }
    }
}

fn state_label(state: i32) -> &'static str {
    match state {
        0 => "offline",
        1 => "online",
        2 => "pending",
        4 => "upgrading",
        5 => "provisioning",
        _ => "unknown",
    }
}

pub async fn handle(client: &mut Client, args: DevicesArgs, ctx: Ctx) -> Result<(), CliError> {
    let mac = args.mac.as_deref();
    let devices = client
        .with_session(async |c| c.list_devices(mac).await)
        .await?;

    if let (Some(mac), true) = (mac, devices.is_empty()) {
        return Err(CliError::NotFound {
            resource_type: "device".into(),
            identifier: mac.into(),
            list_command: "devices".into(),
        });
    }

    let out = output::render_list(ctx.format, &devices, |d| DeviceRow::from(d), |d| d.mac.clone())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

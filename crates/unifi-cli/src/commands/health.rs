//! Subsystem health handler.

use serde_json::Value;
use tabled::Tabled;
use unifi_api::Client;

use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled)]
struct HealthRow {
    #[tabled(rename = "Subsystem")]
    subsystem: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Adopted")]
    adopted: String,
    #[tabled(rename = "Users")]
    users: String,
}

fn to_row(row: &Value) -> HealthRow {
    HealthRow {
        subsystem: output::json_cell(row, "subsystem"),
        status: output::json_cell(row, "status"),
        adopted: output::json_cell(row, "num_adopted"),
        users: output::json_cell(row, "num_user"),
    }
}

pub async fn handle(client: &mut Client, ctx: Ctx) -> Result<(), CliError> {
    let health = client.with_session(async |c| c.list_health().await).await?;
    let out = output::render_list(ctx.format, &health, to_row, |r| {
        output::json_cell(r, "subsystem")
    })?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

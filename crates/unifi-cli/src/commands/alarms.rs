//! Alarm command handler.

use tabled::Tabled;
use unifi_api::{Alarm, Client};

use crate::cli::AlarmsArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlarmRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Archived")]
    archived: &'static str,
}

impl From<&Alarm> for AlarmRow {
    fn from(a: &Alarm) -> Self {
        Self {
            id: a.id.clone(),
            time: output::cell(a.datetime.as_deref()),
            key: output::cell(a.key.as_deref()),
            message: output::cell(a.msg.as_deref()),
            archived: if a.archived == Some(true) { "yes" } else { "no" },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &mut Client, args: AlarmsArgs, ctx: Ctx) -> Result<(), CliError> {
    let alarms = client
        .with_session(async |c| c.list_alarms(args.archived).await)
        .await?;
    let out = output::render_list(ctx.format, &alarms, |a| AlarmRow::from(a), |a| a.id.clone())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

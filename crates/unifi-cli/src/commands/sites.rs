//! Site command handler.

use tabled::Tabled;
use unifi_api::{Client, Site};

use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    desc: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            name: s.name.clone(),
            desc: output::cell(s.desc.as_deref()),
            role: output::cell(s.role.as_deref()),
            id: s.id.clone(),
        }
    }
}

pub async fn handle(client: &mut Client, ctx: Ctx) -> Result<(), CliError> {
    let sites = client.with_session(async |c| c.list_sites().await).await?;
    let out = output::render_list(ctx.format, &sites, |s| SiteRow::from(s), |s| s.name.clone())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

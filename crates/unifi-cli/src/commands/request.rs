//! Raw request passthrough.
//!
//! Sends any logical API path through the session and prints the response
//! body untouched, envelope included, so `meta.rc` stays visible.

use serde_json::Value;
use unifi_api::{Client, HttpMethod};

use crate::cli::RequestArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn handle(client: &mut Client, args: RequestArgs, ctx: Ctx) -> Result<(), CliError> {
    let body = parse_body(args.data.as_deref())?;
    let method = HttpMethod::parse_or_default(&args.method);
    tracing::debug!(%method, path = %args.path, "raw request");

    let response = client
        .with_session(async |c| c.dispatch(&args.path, method, body.as_ref(), &[]).await)
        .await?;

    let out = output::render_single(
        ctx.format,
        &response,
        |v| serde_json::to_string_pretty(v).unwrap_or_default(),
        |v| output::json_cell(v.get("meta").unwrap_or(&Value::Null), "rc"),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

fn parse_body(data: Option<&str>) -> Result<Option<Value>, CliError> {
    data.map(serde_json::from_str).transpose().map_err(CliError::from)
}

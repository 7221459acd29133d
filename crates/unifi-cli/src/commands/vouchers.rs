//! Hotspot voucher handlers.

use tabled::Tabled;
use unifi_api::{Client, Voucher, VoucherRequest};

use crate::cli::{VouchersArgs, VouchersCommand};
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Tabled)]
struct VoucherRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Minutes")]
    minutes: String,
    #[tabled(rename = "Quota")]
    quota: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl From<&Voucher> for VoucherRow {
    fn from(v: &Voucher) -> Self {
        Self {
            code: v.code.clone(),
            minutes: output::cell(v.duration),
            quota: match v.quota {
                Some(0) => "unlimited".into(),
                other => output::cell(other),
            },
            used: output::cell(v.used),
            created: output::timestamp(v.create_time),
            note: output::cell(v.note.as_deref()),
        }
    }
}

pub async fn handle(client: &mut Client, args: VouchersArgs, ctx: Ctx) -> Result<(), CliError> {
    match args.command {
        VouchersCommand::List => {
            let vouchers = client
                .with_session(async |c| c.list_vouchers(None).await)
                .await?;
            let out = output::render_list(
                ctx.format,
                &vouchers,
                |v| VoucherRow::from(v),
                |v| v.code.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        VouchersCommand::Create {
            minutes,
            count,
            quota,
            note,
            up,
            down,
            megabytes,
        } => {
            let request = VoucherRequest {
                count,
                quota,
                note,
                up,
                down,
                megabytes,
                ..VoucherRequest::new(minutes)
            };

            // The create call only echoes the batch timestamp; the codes
            // themselves are looked up with it in the same session.
            let vouchers = client
                .with_session(async |c| {
                    let batches = c.create_vouchers(&request).await?;
                    let Some(batch) = batches.first() else {
                        return Ok(Vec::new());
                    };
                    let all = c.list_vouchers(None).await?;
                    Ok(all
                        .into_iter()
                        .filter(|v| v.create_time == Some(batch.create_time))
                        .collect::<Vec<_>>())
                })
                .await?;

            let out = output::render_list(
                ctx.format,
                &vouchers,
                |v| VoucherRow::from(v),
                |v| v.code.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}

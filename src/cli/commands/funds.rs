use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::json;

use crate::cli::utils::{format_rupiah, output_data, output_success};
use crate::cli::CliContext;

#[derive(Subcommand)]
pub enum FundsCommands {
    #[command(about = "Total disbursed, spent and remaining")]
    Summary,

    #[command(about = "Record money received for a project")]
    Disburse {
        #[arg(help = "Project ID")]
        project: i64,
        #[arg(help = "Amount received")]
        amount: Decimal,
        #[arg(help = "Date received (YYYY-MM-DD)")]
        date: NaiveDate,
        #[arg(long, help = "Disbursement phase, e.g. \"Tahap 1\"")]
        phase: Option<String>,
        #[arg(long, help = "Source of funds, e.g. \"Dana Desa\"")]
        source: Option<String>,
    },

    #[command(about = "Record money spent on a project")]
    Spend {
        #[arg(help = "Project ID")]
        project: i64,
        #[arg(help = "Amount spent")]
        amount: Decimal,
        #[arg(help = "Date spent (YYYY-MM-DD)")]
        date: NaiveDate,
        #[arg(long, help = "What the money was spent on")]
        description: Option<String>,
    },
}

pub async fn handle(cmd: FundsCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        FundsCommands::Summary => {
            let summary = ctx.client().funds_summary().await?;
            output_data(ctx.output, &summary, |s| {
                println!("Disbursed: {}", format_rupiah(s.total_disbursed));
                println!("Spent:     {}", format_rupiah(s.total_spent));
                println!("Remaining: {}", format_rupiah(s.remaining));
            })
        }
        FundsCommands::Disburse {
            project,
            amount,
            date,
            phase,
            source,
        } => {
            let disbursement = ctx
                .authed_client()?
                .create_disbursement(project, amount, date, phase.as_deref(), source.as_deref())
                .await?;
            output_success(
                ctx.output,
                &format!(
                    "Recorded {} received for project #{}",
                    format_rupiah(disbursement.amount),
                    project
                ),
                Some(json!({ "disbursement": disbursement })),
            )
        }
        FundsCommands::Spend {
            project,
            amount,
            date,
            description,
        } => {
            let expense = ctx
                .authed_client()?
                .create_expense(project, amount, date, description.as_deref())
                .await?;
            output_success(
                ctx.output,
                &format!(
                    "Recorded {} spent on project #{}",
                    format_rupiah(expense.amount_spent),
                    project
                ),
                Some(json!({ "expense": expense })),
            )
        }
    }
}

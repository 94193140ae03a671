use clap::Subcommand;

use crate::cli::utils::{format_rupiah, output_data, print_project};
use crate::cli::CliContext;

#[derive(Subcommand)]
pub enum ReportCommands {
    #[command(about = "Accountability report (LPJ) for one project")]
    Lpj {
        #[arg(help = "Project ID")]
        project: i64,
    },
}

pub async fn handle(cmd: ReportCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        ReportCommands::Lpj { project } => {
            let report = ctx.client().lpj_report(project).await?;
            output_data(ctx.output, &report, |report| {
                print_project(&report.project);
                println!();
                println!("Disbursements ({}):", report.disbursements.len());
                for d in &report.disbursements {
                    println!(
                        "  {}  {:>18}  {}",
                        d.date_received,
                        format_rupiah(d.amount),
                        d.source_of_fund.as_deref().unwrap_or("-")
                    );
                }
                println!("Expenses ({}):", report.expenses.len());
                for e in &report.expenses {
                    println!(
                        "  {}  {:>18}  {}",
                        e.date_spent,
                        format_rupiah(e.amount_spent),
                        e.description.as_deref().unwrap_or("-")
                    );
                }
                println!("Progress updates: {}", report.progress.len());
                if let Some(latest) = report.progress.last() {
                    println!("  latest: {}% complete", latest.completion_percentage);
                }
                println!("Feedback: {}", report.feedback.len());
                println!();
                println!("Disbursed: {}", format_rupiah(report.summary.total_disbursed));
                println!("Spent:     {}", format_rupiah(report.summary.total_spent));
                println!("Remaining: {}", format_rupiah(report.summary.remaining));
            })
        }
    }
}

use clap::Subcommand;

use crate::cli::utils::{format_rupiah, output_data};
use crate::cli::CliContext;

#[derive(Subcommand)]
pub enum MetricsCommands {
    #[command(about = "Projects created and money in/out per month")]
    Monthly,
}

pub async fn handle(cmd: MetricsCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        MetricsCommands::Monthly => {
            let metrics = ctx.client().monthly_metrics().await?;
            output_data(ctx.output, &metrics, |metrics| {
                if metrics.is_empty() {
                    println!("No projects yet");
                    return;
                }
                println!("{:<8}  {:>8}  {:>20}  {:>20}", "MONTH", "PROJECTS", "FUNDS IN", "FUNDS OUT");
                for (month, m) in metrics {
                    println!(
                        "{:<8}  {:>8}  {:>20}  {:>20}",
                        month,
                        m.projects,
                        format_rupiah(m.funds_in),
                        format_rupiah(m.funds_out)
                    );
                }
            })
        }
    }
}

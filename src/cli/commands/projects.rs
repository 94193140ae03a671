use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::json;

use crate::cli::cache::{ProjectCache, ProjectDraft};
use crate::cli::utils::{output_data, output_success, print_project, print_project_table};
use crate::cli::CliContext;

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List projects in priority order")]
    List {
        #[arg(long, help = "Only show projects with this status (draft, approved, ...)")]
        status: Option<String>,
    },

    #[command(about = "Show one project")]
    Show {
        #[arg(help = "Project ID")]
        id: i64,
    },

    #[command(about = "Propose a new project (starts as draft)")]
    Add {
        #[arg(help = "Project title")]
        title: String,
        #[arg(long, help = "Description")]
        description: Option<String>,
        #[arg(long, help = "Location within the village")]
        location: Option<String>,
        #[arg(long, help = "Estimated budget in rupiah")]
        budget: Option<Decimal>,
    },

    #[command(about = "Set a project's status")]
    Status {
        #[arg(help = "Project ID")]
        id: i64,
        #[arg(help = "New status")]
        status: String,
    },

    #[command(about = "Rank projects; the first ID becomes priority 1")]
    Prioritize {
        #[arg(required = true, help = "Project IDs in priority order")]
        ids: Vec<i64>,
    },
}

pub async fn handle(cmd: ProjectCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        ProjectCommands::List { status } => {
            let cache = ProjectCache::new(ctx.client());
            cache.refresh().await?;
            let projects = match status {
                Some(status) => cache.with_status(&status).await,
                None => cache.projects().await,
            };
            output_data(ctx.output, &projects, |projects| print_project_table(projects))
        }
        ProjectCommands::Show { id } => {
            let project = ctx.client().get_project(id).await?;
            output_data(ctx.output, &project, print_project)
        }
        ProjectCommands::Add {
            title,
            description,
            location,
            budget,
        } => {
            let cache = ProjectCache::new(ctx.authed_client()?);
            let project = cache
                .add_project(ProjectDraft {
                    title,
                    description,
                    location,
                    estimated_budget: budget,
                })
                .await?;

            output_success(
                ctx.output,
                &format!("Created project #{} {}", project.project_id, project.title),
                Some(json!({ "project": project })),
            )
        }
        ProjectCommands::Status { id, status } => {
            let project = ctx.authed_client()?.update_status(id, &status).await?;
            output_success(
                ctx.output,
                &format!("Project #{} is now {}", project.project_id, project.status),
                Some(json!({ "project": project })),
            )
        }
        ProjectCommands::Prioritize { ids } => {
            let response = ctx.authed_client()?.set_priority(&ids).await?;
            output_success(ctx.output, &response.message, Some(json!({ "priority_list": ids })))
        }
    }
}

pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::client::ApiClient;
use crate::cli::config::Session;

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "village")]
#[command(about = "Village CLI - track village infrastructure projects, funds and reports")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "VILLAGE_SERVER",
        help = "API base URL (defaults to the saved session, then http://localhost:3000)"
    )]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Registration, login and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Project records, status and priority")]
    Projects {
        #[command(subcommand)]
        cmd: commands::projects::ProjectCommands,
    },

    #[command(about = "Fund disbursements and expenses")]
    Funds {
        #[command(subcommand)]
        cmd: commands::funds::FundsCommands,
    },

    #[command(about = "Accountability reports")]
    Report {
        #[command(subcommand)]
        cmd: commands::report::ReportCommands,
    },

    #[command(about = "Aggregated project metrics")]
    Metrics {
        #[command(subcommand)]
        cmd: commands::metrics::MetricsCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// What every command needs: where to talk, how to print, and the saved session
pub struct CliContext {
    pub output: OutputFormat,
    pub server: String,
    pub session: Session,
    pub session_path: PathBuf,
}

impl CliContext {
    /// Client carrying the saved token, if any
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.server).with_token(self.session.token.clone())
    }

    /// Fails early for commands that need a login
    pub fn authed_client(&self) -> anyhow::Result<ApiClient> {
        if self.session.token.is_none() {
            anyhow::bail!("Not logged in. Run `village auth login <email> --password <password>` first");
        }
        Ok(self.client())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = OutputFormat::from_cli(&cli);
    let session_path = config::session_path()?;
    let session = Session::load_from(&session_path)?;

    let server = cli
        .server
        .clone()
        .or_else(|| session.server.clone())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    let mut ctx = CliContext {
        output,
        server,
        session,
        session_path,
    };

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &mut ctx).await,
        Commands::Projects { cmd } => commands::projects::handle(cmd, &ctx).await,
        Commands::Funds { cmd } => commands::funds::handle(cmd, &ctx).await,
        Commands::Report { cmd } => commands::report::handle(cmd, &ctx).await,
        Commands::Metrics { cmd } => commands::metrics::handle(cmd, &ctx).await,
    }
}

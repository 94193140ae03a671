use clap::Subcommand;
use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_data, output_success};
use crate::cli::CliContext;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create an account and log in as it")]
    Register {
        #[arg(help = "Full name")]
        name: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "VILLAGE_PASSWORD", help = "Password")]
        password: String,
        #[arg(long, help = "Role (villager, official, admin); server defaults to villager")]
        role: Option<String>,
    },

    #[command(about = "Log in and save the token")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "VILLAGE_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Forget the saved token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, ctx: &mut CliContext) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register {
            name,
            email,
            password,
            role,
        } => {
            let client = ApiClient::new(&ctx.server);
            let auth = client
                .register(&name, &email, &password, role.as_deref())
                .await?;
            let user = auth.user.clone();
            ctx.session.login(&ctx.server, auth.token, auth.user);
            ctx.session.save_to(&ctx.session_path)?;

            output_success(
                ctx.output,
                &format!("Registered {} <{}> as {}", user.name, user.email, user.role),
                Some(json!({ "user": user })),
            )
        }
        AuthCommands::Login { email, password } => {
            let client = ApiClient::new(&ctx.server);
            let auth = client.login(&email, &password).await?;
            let user = auth.user.clone();
            ctx.session.login(&ctx.server, auth.token, auth.user);
            ctx.session.save_to(&ctx.session_path)?;

            output_success(
                ctx.output,
                &format!("Logged in as {} ({})", user.name, user.role),
                Some(json!({ "user": user })),
            )
        }
        AuthCommands::Logout => {
            ctx.session.logout();
            ctx.session.save_to(&ctx.session_path)?;
            output_success(ctx.output, "Logged out", None)
        }
        AuthCommands::Status => {
            if ctx.session.token.is_none() {
                return output_data(
                    ctx.output,
                    &json!({ "server": ctx.server, "authenticated": false }),
                    |_| println!("Not logged in (server: {})", ctx.server),
                );
            }

            // The saved token may have expired since login
            let verified = ctx.client().me().await;
            let status = json!({
                "server": ctx.server,
                "authenticated": verified.is_ok(),
                "user": verified.as_ref().ok(),
                "error": verified.as_ref().err().map(|e| e.to_string()),
            });

            output_data(ctx.output, &status, |_| match &verified {
                Ok(user) => println!(
                    "Logged in as {} <{}> ({}) on {}",
                    user.name, user.email, user.role, ctx.server
                ),
                Err(e) => println!("Session no longer valid on {}: {}", ctx.server, e),
            })
        }
    }
}


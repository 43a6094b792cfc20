//! recruit-auth - terminal client for the recruiting portal's auth backend.

mod args;
mod console;
mod signup;

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Cli, Commands, EmailUpdateAction};
use auth_client_lib::session::token;
use auth_client_lib::{AuthClient, ClientConfig};
use common::{AppError, AppResult};
use console::Console;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        error!(code = e.code(), "command failed: {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.http.base_url = url;
    }

    let client = Arc::new(AuthClient::from_config(config)?);
    if client.init().await?.is_some() {
        debug!("restored stored session");
    }
    let mut console = Console::new();

    match cli.command {
        Commands::Signup(args) => signup::run(client, &mut console, args).await?,
        Commands::Login(args) => {
            let password = console.prompt("Password: ").await?;
            let session = client.login(&args.email, &password).await?;
            println!("Signed in as {} ({}).", session.user.display_name(), session.user.role);
        }
        Commands::Google(args) => {
            let session = client.google_login(&args.credential, args.role).await?;
            println!("Signed in as {} ({}).", session.user.display_name(), session.user.role);
        }
        Commands::LinkedinUrl(args) => {
            let url = client.linkedin()?.authorization_url(args.role, Utc::now())?;
            println!("{}", url);
        }
        Commands::LinkedinCallback { url } => {
            let callback = client.linkedin()?.parse_callback(&url, Utc::now())?;
            println!(
                "LinkedIn authorized a {} sign-in (code {}).",
                callback.state.role, callback.code
            );
        }
        Commands::Refresh => {
            let session = client.refresh().await?;
            println!("Session refreshed for {}.", session.user.display_name());
        }
        Commands::Logout => {
            let was_signed_in = client.session().is_authenticated();
            client.logout().await?;
            if was_signed_in {
                println!("Signed out.");
            } else {
                println!("Not signed in.");
            }
        }
        Commands::Whoami => whoami(&client)?,
        Commands::EmailUpdate { action } => match action {
            EmailUpdateAction::Request { email } => {
                client.request_email_update(&email).await?;
                println!("A code was sent to {}.", email.trim());
            }
            EmailUpdateAction::Verify { email, otp } => {
                client.verify_email_update(&email, &otp).await?;
                println!("Email changed to {}.", email.trim());
            }
        },
    }

    Ok(())
}

fn whoami(client: &AuthClient) -> AppResult<()> {
    let session = client.session().current().ok_or(AppError::Unauthorized)?;
    let user = &session.user;

    println!("id:     {}", user.id);
    println!("name:   {}", user.full_name.as_deref().unwrap_or("-"));
    println!("email:  {}", user.email.as_deref().unwrap_or("-"));
    println!("role:   {}", user.role);
    println!("since:  {}", session.created_at.to_rfc3339());

    match token::expires_at(&session.access_token) {
        Ok(Some(exp)) if exp <= Utc::now() => println!("token:  expired at {}", exp.to_rfc3339()),
        Ok(Some(exp)) => println!("token:  valid until {}", exp.to_rfc3339()),
        _ => println!("token:  no expiry"),
    }
    Ok(())
}

//! Notely Server: application entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use notely_db::DbManager;
use notely_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use notely_server::{AppState, ServerConfig, router, seed};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-tenant notes API", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// Provision the demo tenants and users before serving.
        #[arg(long)]
        seed: bool,
    },
    /// Provision the demo tenants and users, then exit.
    Seed,
}

fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("notely=info,tower_http=info"))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.config.log_json)?;

    let auth_config = cli.config.auth_config()?;
    let db = DbManager::connect(&cli.config.db_config())
        .await
        .context("connecting to SurrealDB")?;

    let (serve, with_seed) = match cli.command {
        None => (true, false),
        Some(Command::Serve { seed }) => (true, seed),
        Some(Command::Seed) => (false, true),
    };

    if with_seed {
        let tenants = SurrealTenantRepository::new(db.client().clone());
        let users =
            SurrealUserRepository::with_pepper(db.client().clone(), auth_config.pepper.clone());
        seed::seed(&tenants, &users).await?;
    }
    if !serve {
        return Ok(());
    }

    let app = router(AppState::new(db.client().clone(), auth_config));
    let listener = tokio::net::TcpListener::bind(cli.config.bind)
        .await
        .with_context(|| format!("binding {}", cli.config.bind))?;
    tracing::info!(addr = %cli.config.bind, "Notely server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Notely server stopped.");
    Ok(())
}

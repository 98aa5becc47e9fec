//! Naviera Server: application entry point.

mod config;
mod seed;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use naviera_api::{AppState, create_router};
use naviera_db::{DbConfig, DbManager};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AuthArgs, DbArgs};
use crate::seed::{SeedOwner, SeedRequest};

#[derive(Parser)]
#[command(name = "naviera-server")]
#[command(about = "Multi-tenant logistics backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the HTTP API
    Serve {
        #[arg(long, env = "NAVIERA_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
        #[command(flatten)]
        db: DbArgs,
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Apply pending schema migrations and exit
    Migrate {
        #[command(flatten)]
        db: DbArgs,
    },
    /// Create a tenant and, optionally, its owner
    Seed {
        #[arg(long)]
        slug: String,
        #[arg(long)]
        name: String,
        #[arg(long, requires = "owner_subject")]
        owner_email: Option<String>,
        #[arg(long, requires = "owner_email")]
        owner_subject: Option<String>,
        #[command(flatten)]
        db: DbArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("naviera_server=info,naviera_api=info,naviera_auth=info,naviera_db=info,tower_http=info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    match Cli::parse().command {
        Commands::Serve { bind, db, auth } => serve(bind, db.into(), auth).await,
        Commands::Migrate { db } => {
            connect(&db.into()).await?;
            info!("Migrations applied");
            Ok(())
        }
        Commands::Seed {
            slug,
            name,
            owner_email,
            owner_subject,
            db,
        } => {
            let manager = connect(&db.into()).await?;
            let owner = owner_email
                .zip(owner_subject)
                .map(|(email, subject)| SeedOwner { email, subject });
            let report = seed::seed(manager.client(), SeedRequest { slug, name, owner }).await?;
            info!(
                tenant_id = %report.tenant.id,
                tenant_created = report.tenant_created,
                owner_created = report.owner_created,
                "Seed complete"
            );
            Ok(())
        }
    }
}

async fn connect(config: &DbConfig) -> Result<DbManager> {
    let manager = DbManager::connect(config)
        .await
        .context("failed to connect to SurrealDB")?;
    naviera_db::run_migrations(manager.client())
        .await
        .context("failed to apply migrations")?;
    Ok(manager)
}

async fn serve(bind: SocketAddr, db: DbConfig, auth: AuthArgs) -> Result<()> {
    info!("Starting Naviera server...");

    let auth = auth.into_config()?;
    let manager = connect(&db).await?;
    let state = AppState::new(manager.client().clone(), &auth)
        .context("invalid identity provider configuration")?;

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(%bind, "Listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Naviera server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use nav_core::domain::Viewer;
use nav_core::services::NavigationEngine;
use nav_infrastructure::build_engine;
use nav_shared::config::NavConfig;
use nav_shared::telemetry::init_telemetry;

mod pages;

#[derive(Parser, Debug)]
#[command(
    name = "navctl",
    version,
    about = "Role-aware navigation tree and route resolution"
)]
struct Cli {
    /// Extra configuration file layered over config/default
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the navigation tree visible to the given roles
    Tree {
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
        /// Skip the cache and fetch the manifest again
        #[arg(long)]
        refresh: bool,
    },
    /// Resolve a path or component hint to its content
    Resolve { hint: String },
    /// Print the route table for the given roles
    Routes {
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Print the breadcrumb trail for a path
    Breadcrumbs {
        path: String,
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Check whether the given roles may open a path
    Check {
        path: String,
        #[arg(long, value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Drop the cached manifest
    ClearCache,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = NavConfig::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    let _guard = init_telemetry(&config.logging)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    let engine = build_engine(&config, pages::dashboard_registry())?;
    let output = run(&engine, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(engine: &NavigationEngine, command: Command) -> Result<Value> {
    let value = match command {
        Command::Tree { roles, refresh } => {
            let tree = if refresh {
                engine.refresh_tree(&roles).await
            } else {
                engine.get_navigation_tree(&roles).await
            };
            serde_json::to_value(tree)?
        }
        Command::Resolve { hint } => serde_json::to_value(engine.resolve_hint(&hint).await)?,
        Command::Routes { roles } => {
            engine.login(Viewer::authenticated("navctl", roles)).await?;
            serde_json::to_value(engine.routes())?
        }
        Command::Breadcrumbs { path, roles } => {
            engine.login(Viewer::authenticated("navctl", roles)).await?;
            serde_json::to_value(engine.breadcrumbs(&path))?
        }
        Command::Check { path, roles } => {
            engine.login(Viewer::authenticated("navctl", roles)).await?;
            match engine.authorize(&path) {
                Ok(()) => serde_json::json!({ "path": path, "allowed": true }),
                Err(e) => serde_json::json!({ "path": path, "allowed": false, "reason": e.to_string() }),
            }
        }
        Command::ClearCache => {
            engine.fetcher().cache().clear().await;
            serde_json::json!({ "cleared": engine.fetcher().cache().key() })
        }
    };
    Ok(value)
}

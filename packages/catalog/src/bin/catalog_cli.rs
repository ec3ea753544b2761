//! Operator CLI for the channel catalog
//!
//! Runs schema migrations and exposes the read and review operations for
//! scripting. Every command prints a single JSON document on stdout; logs go
//! to stderr.

use anyhow::{bail, Context, Result};
use catalog_core::common::{ActionResult, Caller, CatalogError, ChannelId, CreationId, EditId};
use catalog_core::config::Config;
use catalog_core::domains::catalog::activities as catalog;
use catalog_core::domains::catalog::models::{Region, SearchFilter};
use catalog_core::domains::submissions::{actions, activities as submissions, SubmissionRef};
use catalog_core::kernel::ServerDeps;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catalog_cli")]
#[command(about = "Channel catalog operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Search published channels
    Search {
        /// Case-insensitive substring of the channel name
        #[arg(long)]
        name: Option<String>,
        /// Exact region tag, e.g. 🇯🇵
        #[arg(long)]
        region: Option<String>,
    },

    /// Show one published channel with its blocklist
    Show { channel_id: i64 },

    /// List the pending review queue
    Queue {
        #[arg(long)]
        reviewer: String,
    },

    /// Approve a pending submission
    Approve(ReviewArgs),

    /// Reject a pending submission
    Reject(ReviewArgs),
}

#[derive(Args)]
struct ReviewArgs {
    /// Reviewer user id (acts with reviewer privileges)
    #[arg(long)]
    reviewer: String,
    /// Pending creation id
    #[arg(long, conflicts_with = "edit")]
    creation: Option<String>,
    /// Pending edit id
    #[arg(long)]
    edit: Option<String>,
}

impl ReviewArgs {
    fn submission(&self) -> Result<SubmissionRef> {
        match (&self.creation, &self.edit) {
            (Some(id), None) => Ok(SubmissionRef::Creation(
                CreationId::parse(id).context("Invalid creation id")?,
            )),
            (None, Some(id)) => Ok(SubmissionRef::Edit(
                EditId::parse(id).context("Invalid edit id")?,
            )),
            _ => bail!("Pass exactly one of --creation or --edit"),
        }
    }

    fn caller(&self) -> Caller {
        Caller::reviewer(self.reviewer.clone())
    }
}

#[derive(Serialize)]
struct ChannelDetail {
    #[serde(flatten)]
    channel: catalog_core::domains::catalog::ChannelData,
    patterns: Vec<String>,
}

/// Full configuration plus live connections; every command except `migrate`
async fn load_deps() -> Result<ServerDeps> {
    let config = Config::from_env().context("Failed to load configuration")?;
    ServerDeps::from_config(&config).await
}

fn output<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_core=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => cmd_migrate(&Config::database_url_from_env()?).await,
        Commands::Search { name, region } => {
            let deps = load_deps().await?;
            cmd_search(name, region, &deps).await
        }
        Commands::Show { channel_id } => {
            let deps = load_deps().await?;
            cmd_show(ChannelId::new(channel_id), &deps).await
        }
        Commands::Queue { reviewer } => {
            let deps = load_deps().await?;
            let result =
                submissions::list_pending_queue(&Caller::reviewer(reviewer), &deps).await;
            output(&ActionResult::from_result("queue", result))
        }
        Commands::Approve(args) => {
            let deps = load_deps().await?;
            let result = actions::approve(&args.caller(), args.submission()?, &deps).await;
            output(&result)
        }
        Commands::Reject(args) => {
            let deps = load_deps().await?;
            let result = actions::reject(&args.caller(), args.submission()?, &deps).await;
            output(&result)
        }
    }
}

async fn cmd_migrate(database_url: &str) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations applied");
    output(&ActionResult::ok(()))
}

async fn cmd_search(name: Option<String>, region: Option<String>, deps: &ServerDeps) -> Result<()> {
    let region = match region {
        Some(tag) => match tag.parse::<Region>() {
            Ok(region) => Some(region),
            Err(e) => return output(&ActionResult::<()>::failed(&e)),
        },
        None => None,
    };

    let filter = SearchFilter { name, region };
    output(&ActionResult::from_result(
        "search",
        catalog::search(&filter, deps).await,
    ))
}

async fn cmd_show(channel_id: ChannelId, deps: &ServerDeps) -> Result<()> {
    let result = async {
        let channel = catalog::get_by_id(channel_id, deps).await?;
        let patterns = catalog::get_blocklist(channel_id, deps).await?;
        Ok::<_, CatalogError>(ChannelDetail { channel, patterns })
    }
    .await;

    output(&ActionResult::from_result("show", result))
}

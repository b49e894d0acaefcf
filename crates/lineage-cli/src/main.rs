//! Lineage CLI - Command line interface for the genealogy graph

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, person, query, relationship, tree};
use lineage_engine::{PersonStore, QueryEngine, RelationshipManager};
use lineage_storage::RedbBackend;

#[derive(Parser)]
#[command(name = "lineage")]
#[command(author, version, about = "Family tree management on an embedded graph")]
pub struct Cli {
    /// Data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<String>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(config::default_data_dir)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage people
    Person(person::PersonArgs),
    /// Manage marriages and parentage
    Relationship(relationship::RelationshipArgs),
    /// Query the family graph
    Query(query::QueryArgs),
    /// Export the family tree edge list
    Tree(tree::TreeArgs),
    /// Load the example family data
    Seed,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the three services over one backend
pub struct AppContext {
    pub people: PersonStore,
    pub relationships: RelationshipManager,
    pub queries: QueryEngine,
}

impl AppContext {
    pub async fn new(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = cli.data_dir();
        std::fs::create_dir_all(&data_dir)?;

        let db_path = data_dir.join("lineage.redb");
        tracing::debug!("Using database at: {:?}", db_path);

        let backend = Arc::new(RedbBackend::open(&db_path)?);

        Ok(Self {
            people: PersonStore::new(backend.clone()),
            relationships: RelationshipManager::new(backend.clone()),
            queries: QueryEngine::new(backend),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting lineage CLI");

    // Completions need no storage
    if let Commands::Completions(args) = &cli.command {
        completions::run(args)?;
        return Ok(());
    }

    let ctx = AppContext::new(&cli).await?;

    match &cli.command {
        Commands::Person(args) => person::run(args, &cli, &ctx).await?,
        Commands::Relationship(args) => relationship::run(args, &cli, &ctx).await?,
        Commands::Query(args) => query::run(args, &cli, &ctx).await?,
        Commands::Tree(args) => tree::run(args, &cli, &ctx).await?,
        Commands::Seed => {
            lineage_engine::seed::seed_example_family(&ctx.people, &ctx.relationships).await?;
            println!("Seeded example family data");
        }
        Commands::Completions(_) => unreachable!(),
    }

    Ok(())
}

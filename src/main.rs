//! MTG Catalog Import - Main Binary
//!
//! Rebuilds the card, set and raw-card collections from a catalog file

use anyhow::Context;
use clap::{Parser, Subcommand};
use mtg_catalog_import::{
    config::ImportConfig,
    loader::CatalogLoader,
    store::MemoryStore,
    telemetry::{self, VerbosityLevel},
    ImportPipeline, Keywords,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mtg-import")]
#[command(about = "MTG Catalog Import - build the searchable card collections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a catalog, replacing any previous output
    Import {
        /// Catalog file (.json array of card records)
        #[arg(value_name = "CATALOG", env = "MTG_IMPORT_CATALOG")]
        catalog: PathBuf,

        /// Directory for rawCards.json, cards.json and sets.json
        #[arg(long, default_value = "import-output", env = "MTG_IMPORT_OUTPUT_DIR")]
        output_dir: PathBuf,

        /// JSON file overriding the built-in keyword tables
        #[arg(long, value_name = "KEYWORDS_FILE", env = "MTG_IMPORT_KEYWORDS")]
        keywords: Option<PathBuf>,

        /// Maximum number of cards processed concurrently
        #[arg(long, default_value_t = 100, env = "MTG_IMPORT_CONCURRENCY")]
        concurrency: usize,

        /// Log progress every N imported cards
        #[arg(long, default_value_t = 100, env = "MTG_IMPORT_PROGRESS_INTERVAL")]
        progress_interval: usize,

        /// Seed the per-card random values for reproducible output
        #[arg(long, env = "MTG_IMPORT_SEED")]
        seed: Option<u64>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose); RUST_LOG takes precedence
        #[arg(long, short = 'v', default_value = "normal", env = "MTG_IMPORT_VERBOSITY")]
        verbosity: VerbosityLevel,
    },

    /// Print the built-in keyword tables as JSON (a starting point for --keywords)
    Keywords,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            catalog,
            output_dir,
            keywords,
            concurrency,
            progress_interval,
            seed,
            verbosity,
        } => {
            let config = ImportConfig {
                catalog,
                output_dir,
                keywords,
                max_concurrency: concurrency,
                progress_interval,
                seed,
                verbosity,
            };
            run_import(config).await?
        }
        Commands::Keywords => {
            let json = serde_json::to_string_pretty(&Keywords::builtin())?;
            println!("{json}");
        }
    }

    Ok(())
}

async fn run_import(config: ImportConfig) -> anyhow::Result<()> {
    telemetry::init(config.verbosity);
    config.validate()?;

    let keywords = config
        .load_keywords()
        .context("failed to load keyword tables")?;
    let records = CatalogLoader::load_async(&config.catalog)
        .await
        .context("failed to read card catalog")?;

    let store = Arc::new(MemoryStore::new());
    let pipeline = ImportPipeline::new(
        Arc::clone(&store),
        Arc::new(keywords),
        config.pipeline_options(),
    );

    let summary = pipeline.run(records).await.context("card import failed")?;
    store
        .save_to_dir(&config.output_dir)
        .await
        .with_context(|| format!("failed to save {}", config.output_dir.display()))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

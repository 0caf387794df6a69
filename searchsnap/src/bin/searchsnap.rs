//! Command-line entry point for snapshot capture and classification.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use searchsnap::classify::{classify_snapshot, Classifier, GeminiClassifier};
use searchsnap::config::{Credentials, SearchConfig};
use searchsnap::pipeline::SnapshotPipeline;
use searchsnap::search::{GoogleCustomSearch, SearchClient};

#[derive(Parser)]
#[command(name = "searchsnap", version, about = "Dated web-search snapshots and keyword classification")]
struct Cli {
    /// Path to the YAML credentials file.
    #[arg(long, default_value = "keys.yaml", global = true)]
    keys: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search keywords and persist one snapshot per keyword.
    Search {
        /// Keywords to search.
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Directory snapshot records are written to.
        #[arg(long, default_value = "data/snapshots")]
        output_dir: PathBuf,

        /// Maximum results collected per keyword.
        #[arg(long, default_value_t = 30)]
        max_results: usize,

        /// Results requested per API page.
        #[arg(long, default_value_t = 10)]
        results_per_page: usize,

        /// Result language restriction (Custom Search `lr` value).
        #[arg(long, default_value = "lang_ja")]
        language: String,
    },

    /// Classify a keyword into one of the given categories.
    Classify {
        /// Snapshot file to take context snippets from.
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Bare keyword, used when no snapshot is given.
        #[arg(long)]
        keyword: Option<String>,

        /// Candidate category labels.
        #[arg(long, required = true, num_args = 1..)]
        categories: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let credentials =
        Credentials::load(&cli.keys).with_context(|| format!("loading {}", cli.keys.display()))?;

    match cli.command {
        Command::Search {
            keywords,
            output_dir,
            max_results,
            results_per_page,
            language,
        } => {
            let google = credentials.google()?;
            let config = SearchConfig::new(&google.api_key, &google.custom_search_engine_id)
                .with_output_dir(&output_dir)
                .with_max_results(max_results)
                .with_results_per_page(results_per_page)
                .with_language(language);

            let api = GoogleCustomSearch::new(&config)?;
            let client = SearchClient::new(api, config)?;

            let summary = SnapshotPipeline::from_client(client)?.run(&keywords).await;
            println!(
                "searched {} keyword(s): {} saved, {} empty, {} failed",
                summary.searched, summary.saved, summary.empty, summary.failed
            );
        }

        Command::Classify {
            snapshot,
            keyword,
            categories,
        } => {
            let gemini = credentials.gemini()?;
            let classifier = GeminiClassifier::new(&gemini.api_key)?;

            let label = match (snapshot, keyword) {
                (Some(path), _) => classify_snapshot(&classifier, &path, &categories).await?,
                (None, Some(keyword)) => classifier.classify(&keyword, None, &categories).await?,
                (None, None) => bail!("either --snapshot or --keyword must be provided"),
            };
            println!("{label}");
        }
    }

    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use phish_scoring::batch::{BatchRunner, ExtractionJob, ScoringJob};
use phish_scoring::config::Settings;
use phish_scoring::features::{extract_features, FeatureSchema};
use phish_scoring::reference::load_reference_data;
use phish_scoring::scoring::{score_url, ScorerVersion};
use phish_scoring::url_parser::normalize_with;
use phish_scoring::utils::init_logger;

#[derive(Parser, Debug)]
#[command(name = "phish-scoring", version, about = "URL phishing features and heuristic scores")]
struct Cli {
    /// Settings file (TOML); defaults to ./phish_scoring.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log directory, overrides the settings file
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append feature columns to a CSV with a `url` column
    Extract {
        #[arg(long, value_enum, default_value = "v3")]
        schema: FeatureSchema,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Write run metadata JSON here
        #[arg(long)]
        metadata: Option<PathBuf>,
        /// Required input header, comma separated, order-sensitive
        #[arg(long, value_delimiter = ',')]
        expect_columns: Option<Vec<String>>,
    },
    /// Append heuristic scores to a CSV with a `url` column
    Score {
        #[arg(long, value_enum, default_value = "v2")]
        scorer: ScorerVersion,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Drop repeated URLs (trimmed, lower-cased, no trailing slash)
        #[arg(long)]
        dedupe: bool,
        /// Also write one CSV per score band
        #[arg(long)]
        split_bands: bool,
    },
    /// Print parse, features and score of one URL as JSON
    Inspect {
        url: String,
        #[arg(long, value_enum, default_value = "v3")]
        schema: FeatureSchema,
        #[arg(long, value_enum, default_value = "v2")]
        scorer: ScorerVersion,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if cli.log_dir.is_some() {
        settings.log_dir = cli.log_dir.clone();
    }
    init_logger(settings.log_dir.as_deref()).context("failed to initialise logging")?;

    let reference = load_reference_data(&settings.reference, settings.weights)
        .context("failed to load reference data")?;
    let reference = Arc::new(reference);

    match cli.command {
        Command::Extract {
            schema,
            input,
            output,
            metadata,
            expect_columns,
        } => {
            let runner = BatchRunner::new(Arc::clone(&reference))
                .with_chunk_size(settings.batch.chunk_size)
                .with_reference_paths(settings.reference.clone());
            let job = ExtractionJob {
                schema,
                input,
                output,
                metadata,
                expected_columns: expect_columns,
            };
            let meta = runner
                .run_extraction(&job)
                .await
                .with_context(|| format!("extraction of {} failed", job.input.display()))?;
            info!("Run {} finished", meta.run_id);
            println!(
                "{} rows written to {} ({} degraded, {} failed, {} unreadable)",
                meta.rows_out,
                job.output.display(),
                meta.degraded_rows,
                meta.failed_rows,
                meta.unreadable_rows
            );
        }
        Command::Score {
            scorer,
            input,
            output,
            dedupe,
            split_bands,
        } => {
            let runner = BatchRunner::new(Arc::clone(&reference))
                .with_chunk_size(settings.batch.chunk_size);
            let job = ScoringJob {
                version: scorer,
                input,
                output,
                dedupe: dedupe || settings.batch.dedupe,
                split_bands,
            };
            let summary = runner
                .run_scoring(&job)
                .await
                .with_context(|| format!("scoring of {} failed", job.input.display()))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Inspect { url, schema, scorer } => {
            let parsed = normalize_with(&url, reference.suffixes());
            let features = extract_features(schema, &url, &reference);
            let score = score_url(scorer, &url, reference.whitelist().as_slice());
            let report = serde_json::json!({
                "url": url,
                "parsed": parsed,
                "schema": schema,
                "features": features.to_map(),
                "degraded": features.degraded,
                "scorer": scorer,
                "score": score.score,
                "band": score.band(),
                "signals": score.signals,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

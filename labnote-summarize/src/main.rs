//! labnote-summarize - wet/dry lab digest generator
//!
//! Reads a list of updates, asks Gemini for a wet-lab and a dry-lab summary
//! of each, and writes the latest relevant summary per audience.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use labnote_common::config::{resolve_data_root, TomlConfig};
use labnote_common::storage::validate_user_id;
use labnote_common::{FileStore, LabType};
use labnote_summarize::gemini::{GeminiClient, DEFAULT_API_BASE, DEFAULT_MODEL};
use labnote_summarize::input::{load_updates_file, SourceUpdate};
use labnote_summarize::retry::RetryPolicy;
use labnote_summarize::runner::parse_pause_seconds;
use labnote_summarize::{summarize_updates, write_digests, SummarizeOptions};
use tracing::info;

const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Command-line arguments for labnote-summarize
#[derive(Parser, Debug)]
#[command(name = "labnote-summarize")]
#[command(about = "Generate wet-lab and dry-lab digests from lab updates")]
#[command(version)]
struct Args {
    /// Path to updates JSON (array)
    #[arg(long, required_unless_present = "user")]
    updates: Option<PathBuf>,

    /// Summarize a stored user's update log and write the digests the server reads
    #[arg(long)]
    user: Option<String>,

    /// Data root used with --user
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Path to config.toml used to resolve the data root
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path for the wet-lab digest (default: wetlab.json)
    #[arg(long)]
    wet_out: Option<PathBuf>,

    /// Output path for the dry-lab digest (default: drylab.json)
    #[arg(long)]
    dry_out: Option<PathBuf>,

    /// Gemini model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Attempts per Gemini call
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,

    /// Seconds to sleep after every Gemini call
    #[arg(long, default_value = "0", value_parser = parse_pause_seconds)]
    sleep: Duration,

    /// Generation temperature
    #[arg(long, default_value_t = 0.3)]
    temperature: f32,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labnote_summarize=info,labnote_common=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let api_key = match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("ERROR: {} is not set.", API_KEY_ENV);
            return Ok(ExitCode::from(2));
        }
    };

    let (updates, wet_out, dry_out) = match &args.user {
        Some(user_id) => {
            validate_user_id(user_id)?;
            let config = TomlConfig::load_or_default(args.config.as_deref())?;
            let store = FileStore::new(resolve_data_root(args.data_root.as_deref(), &config));

            let updates: Vec<SourceUpdate> = match &args.updates {
                Some(path) => load_updates_file(path).await?,
                None => store
                    .load_updates(user_id)
                    .await?
                    .into_iter()
                    .map(SourceUpdate::from)
                    .collect(),
            };
            let wet_out = args
                .wet_out
                .clone()
                .unwrap_or_else(|| store.digest_path(user_id, LabType::Wet));
            let dry_out = args
                .dry_out
                .clone()
                .unwrap_or_else(|| store.digest_path(user_id, LabType::Dry));
            (updates, wet_out, dry_out)
        }
        None => {
            let path = args
                .updates
                .as_deref()
                .context("--updates is required unless --user is given")?;
            (
                load_updates_file(path).await?,
                args.wet_out.clone().unwrap_or_else(|| PathBuf::from("wetlab.json")),
                args.dry_out.clone().unwrap_or_else(|| PathBuf::from("drylab.json")),
            )
        }
    };

    info!(count = updates.len(), model = %args.model, "Summarizing updates");

    let client = GeminiClient::with_base(api_key, args.api_base.clone())?;
    let options = SummarizeOptions {
        model: args.model.clone(),
        temperature: args.temperature,
        retry: RetryPolicy::with_attempts(args.retries),
        pause: args.sleep,
    };

    let digests = summarize_updates(&client, updates, &options).await?;
    write_digests(&digests, &wet_out, &dry_out).await?;

    Ok(ExitCode::SUCCESS)
}

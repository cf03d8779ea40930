//! LiteLLM user import - bulk user creation from a CSV file

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use litellm_user_import::config::loader::parse_delimiter;
use litellm_user_import::utils::logging::init_logging;
use litellm_user_import::{
    Batch, BatchView, Config, ProxyUserClient, RecordSubmitter, SubmissionOrchestrator,
    SubmissionState, ValidationOutcome, export_results, template,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "user-import", version, about = "Bulk-create LiteLLM proxy users from a CSV file")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Proxy base URL
    #[arg(long, global = true, env = "LITELLM_PROXY_URL")]
    base_url: Option<String>,

    /// Admin key for the proxy
    #[arg(long, global = true, env = "LITELLM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Field delimiter; `\t` or `tab` for tabs
    #[arg(long, global = true)]
    delimiter: Option<String>,

    /// Log filter, e.g. `debug` or `litellm_user_import=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print an example input file
    Template {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Decode and validate a file without submitting anything
    Validate {
        file: PathBuf,
        /// Print rows and report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a user for every valid row
    Import(ImportArgs),
}

#[derive(Debug, Args)]
struct ImportArgs {
    file: PathBuf,

    /// Rows in flight at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-row timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Write per-row results to this file
    #[arg(long)]
    results: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.global.log_level.as_deref(), cli.global.log_json) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli).await?;

    match cli.command {
        Command::Template { output } => write_template(&config, output).await,
        Command::Validate { file, json } => validate_file(&config, &file, json).await,
        Command::Import(args) => import_file(config, args).await,
    }
}

/// Defaults, then the YAML file, then the environment, then flags
async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.global.config {
        Some(path) => Config::read_file(path).await?,
        None => Config::default(),
    };
    config.apply_env()?;

    if let Some(base_url) = &cli.global.base_url {
        config.proxy.base_url = base_url.clone();
    }
    if let Some(api_key) = &cli.global.api_key {
        config.proxy.api_key = Some(api_key.clone());
    }
    if let Some(delimiter) = &cli.global.delimiter {
        config.input.delimiter = parse_delimiter(delimiter)?;
    }
    if let Command::Import(args) = &cli.command {
        if let Some(concurrency) = args.concurrency {
            config.submission.concurrency = concurrency;
        }
        if let Some(timeout) = args.timeout {
            config.submission.timeout = timeout;
        }
    }

    config.validate()?;
    debug!("Effective configuration:\n{}", config.to_yaml()?);
    Ok(config)
}

async fn write_template(config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let text = template(config.input.delimiter);
    match output {
        Some(path) => {
            tokio::fs::write(&path, text)
                .await
                .with_context(|| format!("writing template to {}", path.display()))?;
            info!("Template written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

async fn read_batch(config: &Config, file: &Path) -> anyhow::Result<Batch> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let batch = Batch::from_text(&text, config.input.delimiter)
        .with_context(|| format!("decoding {}", file.display()))?;

    let report = batch.report();
    info!(
        "Loaded {} rows from {} ({} valid, {} invalid)",
        report.total,
        file.display(),
        report.valid_count,
        report.invalid_count
    );
    if report.valid_count == 0 {
        warn!("No valid rows in {}", file.display());
    } else if report.invalid_count > 0 {
        warn!("{} invalid rows will be skipped", report.invalid_count);
    }
    Ok(batch)
}

async fn validate_file(config: &Config, file: &Path, json: bool) -> anyhow::Result<()> {
    let batch = read_batch(config, file).await?;
    let view = batch.view();

    if json {
        let output = serde_json::json!({
            "rows": view.snapshot(),
            "report": view.report(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for row in view.snapshot() {
        if let ValidationOutcome::Invalid(reasons) = &row.outcome {
            println!("line {}: {}", row.record.line, reasons.join("; "));
        }
    }
    println!("{}", view.report());
    Ok(())
}

async fn import_file(config: Config, args: ImportArgs) -> anyhow::Result<()> {
    let batch = read_batch(&config, &args.file).await?;
    let identifiers: Vec<String> = batch
        .entries()
        .iter()
        .map(|entry| entry.record.identifier.clone())
        .collect();

    let client = ProxyUserClient::new(&config.proxy)?;
    info!("Submitting to {}", client.endpoint());
    let submitter: Arc<dyn RecordSubmitter> = Arc::new(client);

    let orchestrator = SubmissionOrchestrator::new(config.submission.to_submission_config());
    let mut run = orchestrator.spawn(batch, submitter, CancellationToken::new());
    let view = run.view().clone();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            signal = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                if let Err(e) = signal {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                    continue;
                }
                warn!("Interrupted; waiting for in-flight rows to finish");
                run.cancel();
            }
            update = run.next_update() => match update {
                Some(update) => {
                    let identifier = identifiers
                        .get(update.index)
                        .map(String::as_str)
                        .unwrap_or_default();
                    match &update.state {
                        SubmissionState::Succeeded => info!("Created {}", identifier),
                        SubmissionState::Failed(failure) => {
                            warn!("Failed {}: {}", identifier, failure)
                        }
                        _ => {}
                    }
                }
                None => break,
            }
        }
    }

    let report = run.finish().await?;
    if !report.is_settled() {
        warn!(
            "{} valid rows were not submitted",
            report.not_submitted
        );
    }

    if let Some(path) = &args.results {
        write_results(&view, config.input.delimiter, path).await?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

async fn write_results(view: &BatchView, delimiter: char, path: &Path) -> anyhow::Result<()> {
    tokio::fs::write(path, export_results(view, delimiter))
        .await
        .with_context(|| format!("writing results to {}", path.display()))?;
    info!("Results written to {}", path.display());
    Ok(())
}

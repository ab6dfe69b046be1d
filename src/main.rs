use anyhow::{bail, Context, Result};
use apiline::cli::commands::{RunCommand, ValidateCommand};
use apiline::cli::discovery::{discover, Discovery};
use apiline::cli::output::*;
use apiline::cli::{Cli, Command};
use apiline::{ExecutionEngine, HttpClientConfig, PipelineConfig, ReqwestDispatcher};
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over --verbose
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_pipelines(cmd, &cli).await,
        Command::Validate(cmd) => validate_pipelines(cmd),
    }
}

/// Expand paths, report what was skipped, fail when nothing is left
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let Discovery { files, skipped } = discover(paths);

    for skip in &skipped {
        println!(
            "{} Skipping {}: {}",
            WARN,
            style(skip.path.display()).yellow(),
            skip.reason
        );
    }

    if files.is_empty() {
        bail!("No pipeline files (.yaml, .yml, .json) found");
    }
    Ok(files)
}

async fn run_pipelines(cmd: &RunCommand, cli: &Cli) -> Result<()> {
    println!("{}", banner());
    let files = collect_files(&cmd.paths)?;
    println!("{}", format_file_list(&files));

    let mut http_config = HttpClientConfig::new();
    if let Some(timeout) = cli.timeout {
        http_config = http_config.with_timeout(timeout);
    }
    let dispatcher = ReqwestDispatcher::new(http_config).context("Failed to create HTTP client")?;

    // Console output for every event
    let engine = ExecutionEngine::new(dispatcher)
        .with_event_handler(|event| println!("{}", format_execution_event(&event)));

    for file in &files {
        println!("{}", separator());
        println!("{} {}", style("FILE:").bold(), style(file.display()).cyan());

        let pipeline = match PipelineConfig::from_file(file) {
            Ok(config) => config.to_pipeline(),
            Err(e) => {
                println!("{} Failed to load {}", CROSS, style(file.display()).bold());
                println!("  {}", style(&e).red());
                error!("{}: {}", file.display(), e);
                std::process::exit(1);
            }
        };

        if !pipeline.description.is_empty() {
            println!("{}", style(&pipeline.description).italic());
        }

        // Each file runs with its own variable store
        if let Err(err) = engine.run(&pipeline).await {
            println!(
                "\n{} {} {}",
                CROSS,
                style(file.display()).bold(),
                style("failed").red()
            );
            println!("  {}", style(&err).red());
            error!("{}: {}", file.display(), err);
            std::process::exit(1);
        }
    }

    println!("{}", separator());
    println!(
        "\n{} {} pipeline file(s) completed {}",
        CHECK,
        files.len(),
        style("successfully").green()
    );

    Ok(())
}

fn validate_pipelines(cmd: &ValidateCommand) -> Result<()> {
    let files = collect_files(&cmd.paths)?;

    for file in &files {
        match PipelineConfig::from_file(file) {
            Ok(config) => {
                let pipeline = config.to_pipeline();
                println!("{} {} is valid", CHECK, style(file.display()).bold());
                println!("  Actions: {}", style(pipeline.actions.len()).cyan());
                if let Some(base_url) = &pipeline.base_url {
                    println!("  Base URL: {}", style(base_url).dim());
                }

                if cmd.json {
                    let json = serde_json::to_string_pretty(&pipeline)?;
                    println!("\n{}", json);
                }
            }
            Err(e) => {
                println!("{} {}: Validation failed", CROSS, style(file.display()).bold());
                println!("  {}", style(e).red());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

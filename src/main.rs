use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use power_fetch::{
    init_logging, PowerFetcher, RunMode, Settings, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILE,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "power-fetch")]
#[command(about = "Fetch daily NASA POWER weather data for configured sites and export it as CSV")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// File that log lines are appended to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write the per-site files only
    #[arg(long, conflicts_with = "combined_only")]
    skip_combined: bool,

    /// Write the combined file only
    #[arg(long)]
    combined_only: bool,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }

    fn mode(&self) -> RunMode {
        if self.skip_combined {
            RunMode::PerSiteOnly
        } else if self.combined_only {
            RunMode::CombinedOnly
        } else {
            RunMode::Full
        }
    }
}

async fn run(config: &Path, mode: RunMode) -> Result<()> {
    let settings = Settings::load(config)
        .with_context(|| format!("Failed to load configuration from {}", config.display()))?;
    let fetcher = PowerFetcher::builder()
        .settings(settings)
        .build()
        .await
        .context("Failed to set up fetcher")?;

    fetcher.print_config_summary();
    fetcher.run(mode).await.context("Unexpected error during run")?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.level(), Some(&cli.log_file));

    tokio::select! {
        result = run(&cli.config, cli.mode()) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            info!("Process interrupted by user");
            ExitCode::SUCCESS
        }
    }
}

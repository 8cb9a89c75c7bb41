mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lotscan_core::{parse_base_url, parse_listing_urls, AppConfig};
use tracing_subscriber::EnvFilter;
use url::Position;

#[derive(Debug, Parser)]
#[command(name = "lotscan-cli")]
#[command(about = "Dealership inventory extractor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect detail links from every listing and extract them all to CSV
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// CSV file to write (overrides LOTSCAN_OUTPUT_PATH)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the detail URLs found on the listings, one per line
    Links {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Extract the given detail URLs to CSV
    Extract {
        /// Absolute detail page URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// CSV file to write (overrides LOTSCAN_OUTPUT_PATH)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,
    },
}

/// Which dealership and listings to walk.
#[derive(Debug, Clone, Default, Args)]
struct TargetArgs {
    /// Dealership origin (overrides LOTSCAN_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Listing path or URL; repeat for several (overrides LOTSCAN_LISTING_PATHS)
    #[arg(long = "listing")]
    listings: Vec<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,
}

impl TargetArgs {
    /// Applies the flags on top of the loaded configuration.
    ///
    /// A new base URL without `--listing` keeps the configured listing paths,
    /// re-rooted on the new origin.
    fn apply(&self, config: &mut AppConfig) -> anyhow::Result<()> {
        if let Some(raw) = &self.base_url {
            let base = parse_base_url(raw).map_err(|reason| anyhow::anyhow!("--base-url: {reason}"))?;
            config.listing_urls = config
                .listing_urls
                .iter()
                .map(|listing| base.join(&listing[Position::BeforePath..]))
                .collect::<Result<_, _>>()?;
            config.base_url = base;
        }
        if !self.listings.is_empty() {
            config.listing_urls = parse_listing_urls(&config.base_url, &self.listings.join(","))
                .map_err(|reason| anyhow::anyhow!("--listing: {reason}"))?;
        }
        if self.headed {
            config.headless = false;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = lotscan_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let command = cli.command.unwrap_or(Commands::Run {
        target: TargetArgs::default(),
        output: None,
    });

    match command {
        Commands::Run { target, output } => {
            target.apply(&mut config)?;
            if let Some(path) = output {
                config.output_path = path;
            }
            run::run_inventory(&config).await
        }
        Commands::Links { target } => {
            target.apply(&mut config)?;
            run::run_links(&config).await
        }
        Commands::Extract {
            urls,
            output,
            headed,
        } => {
            if let Some(path) = output {
                config.output_path = path;
            }
            if headed {
                config.headless = false;
            }
            run::run_extract(&config, &urls).await
        }
    }
}

#[cfg(test)]
mod tests;

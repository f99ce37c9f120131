//! rent-survey - Compare rental listing prices across regions
//!
//! Thin CLI over the survey command.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rent_survey::commands::SurveyCommand;
use rent_survey::config::{Config, OutputFormat};
use rent_survey::format::Formatter;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rent-survey",
    version,
    about = "Compare rental listing prices across regions",
    long_about = "Fetches craigslist search pages for each configured region and reports price statistics per region and sub-location."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all regions and print the price report (default)
    #[command(alias = "s")]
    Survey,

    /// List configured regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command.unwrap_or(Commands::Survey) {
        Commands::Survey => {
            let trailer = Formatter::new(config.format).trailer();
            let cmd = SurveyCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
            if let Some(trailer) = trailer {
                println!("{}", trailer);
            }
        }

        Commands::Regions => {
            println!("Configured regions:\n");
            println!("{:<20} {:<28} {:<13} {:<6} {}", "Name", "Site", "Price", "Pages", "Sub-locations");
            println!("{:-<20} {:-<28} {:-<13} {:-<6} {:-<13}", "", "", "", "", "");

            for region in &config.regions {
                let subs = region
                    .effective_sub_locations()
                    .into_iter()
                    .map(|s| if s.is_empty() { "(all)" } else { s })
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "{:<20} {:<28} {:<13} {:<6} {}",
                    region.name,
                    region.site(),
                    format!("{}-{}", region.price_min, region.price_max),
                    region.pages_per_sub_location,
                    subs
                );
            }
        }
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "visualfabric")]
#[command(about = "VisualFabric CLI - turn a fabric photo into a garment mockup", long_about = None)]
struct Cli {
    /// Base URL of the mockup service (overrides config and VISUALFABRIC_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the outfit options offered by the service
    Outfits,
    /// Generate a mockup from a fabric image
    Generate {
        /// Path to the fabric image
        #[arg(long)]
        fabric: PathBuf,

        /// Outfit option id (see `visualfabric outfits`)
        #[arg(long)]
        outfit: String,

        /// Where to write the mockup (defaults to ./mockup.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = commands::utils::resolve_config(cli.base_url)?;

    match cli.command {
        Commands::Outfits => commands::outfits::run(&config).await?,
        Commands::Generate {
            fabric,
            outfit,
            output,
        } => commands::generate::run(&config, &fabric, &outfit, output).await?,
    }

    Ok(())
}

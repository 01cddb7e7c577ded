//! ticketsieve — parse one support or issue-tracker export and print the
//! normalized ticket as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ticketsieve_core::{ImageRef, TicketSieveConfig, MIN_IMAGE_HEIGHT, MIN_IMAGE_WIDTH};
use ticketsieve_parse::TicketParser;
use ticketsieve_readers::available_readers;

#[derive(Parser)]
#[command(name = "ticketsieve")]
#[command(about = "Parse Jira/Zendesk ticket exports (PDF, Excel, XML, Word)")]
#[command(version)]
struct Cli {
    /// Path to the ticket export
    file: PathBuf,

    /// Extract significant images from a PDF export
    #[arg(long)]
    extract_images: bool,

    /// Only extract images; skip the JSON output
    #[arg(long)]
    images_only: bool,

    /// Write images here instead of <output root>/images_<ticket>/
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error parsing file: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = TicketSieveConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let parser = TicketParser::new(available_readers(), config);
    debug!(
        file = %cli.file.display(),
        output_root = %parser.config().image_output_root.display(),
        "Parsing ticket export"
    );
    let mut ticket = parser.parse(&cli.file)?;

    if cli.extract_images || cli.images_only {
        let images = parser.extract_images(&cli.file, &mut ticket, cli.output_dir.as_deref())?;
        report_images(&images);
    }

    if !cli.images_only {
        let json = ticket.to_summary_json()?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    }

    Ok(())
}

fn report_images(images: &[ImageRef]) {
    if images.is_empty() {
        eprintln!(
            "No meaningful images found (min {}x{}px)",
            MIN_IMAGE_WIDTH, MIN_IMAGE_HEIGHT
        );
        return;
    }

    eprintln!("Extracted {} images:", images.len());
    for image in images {
        eprintln!(
            "  - {} ({}x{}) from page {}",
            image.filename, image.width, image.height, image.page
        );
    }
}

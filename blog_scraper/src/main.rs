use std::process::ExitCode;

use blog_scraper::{process_url, ScraperConfig};
use clap::{error::ErrorKind, Parser};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: blog_scraper <URL>";

#[derive(Parser, Debug)]
#[command(author, version, about = "Save a single blog post as Markdown", long_about = None)]
struct Args {
    /// URL of the post, including http:// or https://
    url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let result = match ScraperConfig::from_env() {
        Ok(config) => process_url(&config, &args.url).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(path) => {
            println!("✅ Saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) if e.is_usage() => {
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "scrape failed");
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

use clap::Parser;
use page_harvest::PageScraper;
use page_harvest::config::AppConfig;
use std::error::Error;
use std::process::ExitCode;

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ::log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    }
    .apply_env();

    match args.command {
        Command::Scrape {
            url,
            categories,
            page_timeout,
            resource_timeout,
            pretty,
        } => {
            let mut scraper = PageScraper::from_config(config.scraper)?;
            if let Some(secs) = page_timeout {
                scraper = scraper.with_page_timeout(secs);
            }
            if let Some(secs) = resource_timeout {
                scraper = scraper.with_resource_timeout(secs);
            }

            let result = scraper.scrape_url(&url, &categories).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{}", json);
        }
        Command::Serve { host, port } => {
            let mut server_config = config.server;
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            let scraper = PageScraper::from_config(config.scraper)?;
            page_harvest::server::serve(scraper, &server_config).await?;
        }
    }
    Ok(())
}

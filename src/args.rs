use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(about = "Extracts markup, text, styles, scripts, images and videos from a web page")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape a single page and print the result as JSON
    Scrape {
        /// Page to scrape
        url: String,

        /// Categories to extract (markup, text, styles, scripts, images, videos)
        #[arg(short, long = "category", required = true, num_args = 1..)]
        categories: Vec<String>,

        /// Override the page fetch timeout in seconds
        #[arg(long)]
        page_timeout: Option<u64>,

        /// Override the stylesheet/script fetch timeout in seconds
        #[arg(long)]
        resource_timeout: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Serve the POST /scrape endpoint
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

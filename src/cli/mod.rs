pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jobharvest")]
#[command(about = "Harvest job listings from a paginated job board into CSV", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/jobharvest/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape listings and write them to a CSV file
    Run(RunArgs),
    /// Print the effective configuration
    Config,
}

/// Overrides for the `[search]` and `[output]` config values
#[derive(Debug, Default, clap::Args)]
pub struct RunArgs {
    /// First results page to load
    #[arg(short, long)]
    pub url: Option<String>,

    /// Category label stored with every record
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory label stored with every record
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Number of results pages to visit
    #[arg(short, long)]
    pub pages: Option<u32>,

    /// Directory for the CSV file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

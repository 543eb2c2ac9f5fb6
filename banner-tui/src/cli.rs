use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "banner-tui")]
#[command(about = "Terminal timeline for scheduling promotional banners")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the banner document store
    Run,
    /// Run in dev mode with local in-memory banners
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}

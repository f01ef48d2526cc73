use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command line options for the interactive list.
#[derive(Debug, Parser)]
#[command(name = "ordered-list", version, about = "Interactive ordered linked list")]
pub struct Config {
    /// Read menu input from FILE instead of the terminal.
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is not set.
    #[arg(long, value_name = "FILTER", default_value = "warn")]
    pub log: String,

    /// Do not print the menu before each prompt.
    #[arg(long)]
    pub quiet: bool,
}

impl Config {
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log))
    }

    /// Installs the global subscriber. Events go to stderr so they stay out
    /// of the menu output.
    pub fn init_tracing(&self) {
        tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
}

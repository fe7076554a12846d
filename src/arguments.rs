/// Command-line arguments
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "armada-playground",
    about = "API backend for the Armada vault playground",
    version
)]
pub struct Arguments {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the bind host from the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port from the config file
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

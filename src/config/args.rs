//! Command-line arguments

use clap::Parser;

/// shorturl - hash-derived short links with visit analytics
#[derive(Debug, Parser)]
#[command(name = "shorturl")]
#[command(version)]
#[command(about = "Hash-derived short links with visit analytics", long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "winenotes", bin_name = "winenotes", version)]
#[command(about = "Personal wine notes service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// TOML configuration file
    #[arg(short, long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Directory holding wines.json and uploads/ (overrides config)
    #[arg(long, global = true, help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print all wines as JSON
    List,

    /// Find photos that no wine references
    Doctor {
        /// Delete the orphaned photos
        #[arg(long)]
        fix: bool,
    },
}

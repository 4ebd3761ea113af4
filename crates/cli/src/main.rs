//! Prebid Mobile request CLI.
//!
//! This tool provides commands for:
//! - Validating and printing SDK settings files
//! - Assembling the OpenRTB bid request for an ad unit
//! - Resolving the auction endpoint

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

mod config;
mod error;
mod request;

use error::CliError;

#[derive(Parser)]
#[command(name = "pbrq")]
#[command(about = "Assemble and inspect Prebid Mobile bid requests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Settings management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Bid request assembly
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a settings file
    Validate {
        /// Path to the TOML settings file
        #[arg(long, short, env = "PREBID_MOBILE_SETTINGS")]
        file: PathBuf,
    },

    /// Print the settings after environment overrides
    Show {
        /// Path to the TOML settings file
        #[arg(long, short, env = "PREBID_MOBILE_SETTINGS")]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum RequestAction {
    /// Build the bid request for an ad unit
    Build {
        /// Path to the TOML settings file
        #[arg(long, short, env = "PREBID_MOBILE_SETTINGS")]
        settings: PathBuf,

        /// Path to the ad unit file (TOML, or JSON with a .json extension)
        #[arg(long, short)]
        ad_unit: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Build as if no in-app browser were available
        #[arg(long)]
        no_browser: bool,

        /// Write the request to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the auction endpoint
    Url {
        /// Path to the TOML settings file
        #[arg(long, short, env = "PREBID_MOBILE_SETTINGS")]
        settings: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = prebid_mobile_common::logging::init_logging(level) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Validate { file } => config::validate(&file, cli.verbose),
            ConfigAction::Show { file } => config::show(&file, cli.verbose),
        },
        Commands::Request { action } => match action {
            RequestAction::Build {
                settings,
                ad_unit,
                pretty,
                no_browser,
                output,
            } => request::build(
                &settings,
                &ad_unit,
                pretty,
                no_browser,
                output.as_deref(),
                cli.verbose,
            ),
            RequestAction::Url { settings } => request::url(&settings, cli.verbose),
        },
    }
}

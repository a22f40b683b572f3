//! wrenchlog CLI - dataset export/import between the two storage engines.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use wrenchlog_store::{Config, Migrator};

#[derive(Parser)]
#[command(name = "wrenchlog")]
#[command(about = "Vehicle maintenance dataset export/import")]
#[command(version)]
struct Cli {
    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    /// Output the result as JSON to stdout
    #[arg(long)]
    output_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the relational dataset into an embedded store archive
    Export,

    /// Import a previously exported archive into the relational engine
    Import {
        /// Path to the archive produced by `export`
        archive: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbosity.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let migrator = Migrator::new(Config::from_env());

    let response = match cli.command {
        Commands::Export => migrator.export().await,
        Commands::Import { archive } => migrator.import(&archive).await,
    };

    if cli.output_json {
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize response: {e}"),
        }
    } else {
        println!("{}", response.message);
    }

    if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

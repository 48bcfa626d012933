//! Viewfinder CLI binary.
//!
//! Runs one planning session and prints the response envelope to stdout:
//! - `viewfinder process --conversation-id <ID>`
//! - `viewfinder process --transcript-file notes.txt --stage locations`
//! - `viewfinder process --intake-file form.json --images`

use clap::Parser;
use std::process::ExitCode;
use viewfinder::{ViewfinderConfig, init_telemetry};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, run_session};

    // Keys may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_telemetry(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Process(args) => match run_session(&args, cli.config.as_deref()).await {
            Ok(response) => {
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to serialize response");
                        return ExitCode::FAILURE;
                    }
                }
                if response.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Session could not start");
                eprintln!("{}", e.summary());
                ExitCode::from(2)
            }
        },

        Commands::Config => {
            let printed = ViewfinderConfig::load_with(cli.config.as_deref()).and_then(|config| {
                serde_json::to_string_pretty(&config).map_err(|e| {
                    viewfinder::ViewfinderError::from(viewfinder::ConfigError::new(e.to_string()))
                })
            });
            match printed {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e.summary());
                    ExitCode::from(2)
                }
            }
        }
    }
}
